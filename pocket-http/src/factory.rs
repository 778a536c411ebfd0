use async_trait::async_trait;
use pocket_core::contacts::{ApiConfig, ContactClientFactory, ContactError, ContactRepository};
use reqwest::Url;

use crate::repository::HttpContactRepository;

/// [`ContactClientFactory`] for the ContactBook web API.
///
/// Adding it to a [`pocket_core::contacts::ContactClientRegistry`] makes
/// the `"http"` backend selectable:
///
/// ```rust,no_run
/// use pocket_core::contacts::ContactClientRegistry;
/// use pocket_http::HttpContactClientFactory;
///
/// let registry = ContactClientRegistry::new().with(HttpContactClientFactory);
/// assert_eq!(registry.backend_names(), vec!["http"]);
/// ```
pub struct HttpContactClientFactory;

#[async_trait]
impl ContactClientFactory for HttpContactClientFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Builds a client for `config.root_url`. No request is made here.
    ///
    /// # Errors
    /// [`ContactError::Configuration`] when the root URL is not an absolute
    /// `http`/`https` URL.
    async fn create(
        &self,
        config: &ApiConfig,
    ) -> Result<Box<dyn ContactRepository>, ContactError> {
        let root = config.normalized_root();
        let url = Url::parse(&root)
            .map_err(|e| ContactError::Configuration(format!("invalid root URL '{root}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ContactError::Configuration(format!(
                "unsupported URL scheme '{}' in '{root}'",
                url.scheme()
            )));
        }

        Ok(Box::new(HttpContactRepository::new(config)?))
    }
}

#[cfg(test)]
mod tests {
    use pocket_core::contacts::{ApiConfig, ContactClientFactory, ContactError};

    use super::HttpContactClientFactory;

    fn config_with_root(root: &str) -> ApiConfig {
        ApiConfig {
            root_url: root.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn backend_name_is_http() {
        assert_eq!(HttpContactClientFactory.backend_name(), "http");
    }

    #[tokio::test]
    async fn creates_client_for_valid_root() {
        let result = HttpContactClientFactory
            .create(&config_with_root("http://localhost:8080/api/ContactBook"))
            .await;

        assert!(result.is_ok(), "failed to create client: {:?}", result.err());
    }

    #[tokio::test]
    async fn rejects_relative_root() {
        let result = HttpContactClientFactory
            .create(&config_with_root("api/ContactBook"))
            .await;

        assert!(matches!(result, Err(ContactError::Configuration(_))));
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let result = HttpContactClientFactory
            .create(&config_with_root("ftp://example.com/contacts"))
            .await;

        assert!(matches!(result, Err(ContactError::Configuration(_))));
    }
}
