use async_trait::async_trait;

use super::repository::{ContactError, ContactRepository};

/// Root of the public contact book API.
pub const DEFAULT_ROOT_URL: &str = "https://mysite.itvarsity.org/api/ContactBook/";

/// API key used when none is configured.
pub const DEFAULT_API_KEY: &str = "appacademy@itvarsity.org";

/// Which contact book to talk to and how to reach it.
///
/// Server-less backends such as `memory` ignore `root_url` and `api_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend name, matched case-insensitively against the registry.
    pub backend: String,
    pub root_url: String,
    pub api_key: String,
}

impl ApiConfig {
    /// `root_url` with exactly one trailing `/`, so endpoint paths can be
    /// appended directly.
    pub fn normalized_root(&self) -> String {
        format!("{}/", self.root_url.trim().trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            root_url: DEFAULT_ROOT_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

/// Builds clients for one kind of contact backend.
#[async_trait]
pub trait ContactClientFactory: Send + Sync {
    /// Lowercase name users select the backend by.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn ContactRepository>, ContactError>;
}

/// The backends a binary ships with.
///
/// ```
/// use pocket_core::contacts::{ContactClientRegistry, InMemoryContactClientFactory};
///
/// let registry = ContactClientRegistry::new().with(InMemoryContactClientFactory);
/// assert_eq!(registry.backend_names(), vec!["memory"]);
/// ```
#[derive(Default)]
pub struct ContactClientRegistry {
    factories: Vec<Box<dyn ContactClientFactory>>,
}

impl ContactClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend. A later factory with the same name takes its place.
    pub fn with(
        mut self,
        factory: impl ContactClientFactory + 'static,
    ) -> Self {
        let name = factory.backend_name();
        self.factories.retain(|f| f.backend_name() != name);
        self.factories.push(Box::new(factory));
        self
    }

    /// Sorted, for help text and error messages.
    pub fn backend_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.iter().map(|f| f.backend_name()).collect();
        names.sort_unstable();
        names
    }

    /// Builds a client for `config.backend`.
    ///
    /// # Errors
    ///
    /// [`ContactError::Configuration`] naming the known backends when none
    /// matches, otherwise whatever the chosen factory reports.
    pub async fn connect(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn ContactRepository>, ContactError> {
        let wanted = config.backend.trim();
        let Some(factory) = self
            .factories
            .iter()
            .find(|f| f.backend_name().eq_ignore_ascii_case(wanted))
        else {
            return Err(ContactError::Configuration(format!(
                "unknown backend '{wanted}' (known: {})",
                self.backend_names().join(", ")
            )));
        };

        factory.create(config).await
    }
}
