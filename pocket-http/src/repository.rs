//! Contact book client for the ContactBook web API.
//!
//! | operation | request |
//! |-----------|---------|
//! | list      | `GET {root}controller/get-contacts/?apiKey=…` → JSON array of `{name, phone}` |
//! | add       | `POST {root}controller/add-contact/`, form fields `apiKey`, `name`, `phone` |
//!
//! The add endpoint has no structured status: a response body of `1` means
//! the contact was stored, anything else is the server's explanation.
//!
//! The API has no lookup, update or delete endpoints, so those operations
//! fail with [`ContactError::Unsupported`].

use async_trait::async_trait;
use pocket_core::contacts::{ApiConfig, Contact, ContactError, ContactRepository, NewContact};
use reqwest::{Client, Response};
use tracing::{debug, warn};

const LIST_PATH: &str = "controller/get-contacts/";
const ADD_PATH: &str = "controller/add-contact/";

/// Body the add endpoint answers with on success.
const SUCCESS_SENTINEL: &str = "1";

pub struct HttpContactRepository {
    client: Client,
    root_url: String,
    api_key: String,
}

impl HttpContactRepository {
    pub fn new(config: &ApiConfig) -> Result<Self, ContactError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ContactError::Configuration(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(
        client: Client,
        config: &ApiConfig,
    ) -> Self {
        Self {
            client,
            root_url: config.normalized_root(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(
        &self,
        path: &str,
    ) -> String {
        format!("{}{}", self.root_url, path)
    }
}

fn transport(err: reqwest::Error) -> ContactError {
    ContactError::Transport(err.to_string())
}

/// Reads the body, turning a non-success status into a transport error.
async fn read_body(response: Response) -> Result<String, ContactError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !status.is_success() {
        warn!(%status, "contact API returned an error status");
        return Err(ContactError::Transport(format!("HTTP {status}: {body}")));
    }
    Ok(body)
}

#[async_trait]
impl ContactRepository for HttpContactRepository {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        let url = self.endpoint(LIST_PATH);
        debug!(%url, "listing contacts");

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(response).await?;

        let contacts: Vec<Contact> =
            serde_json::from_str(&body).map_err(|e| ContactError::Decode(e.to_string()))?;
        debug!(count = contacts.len(), "contacts listed");
        Ok(contacts)
    }

    async fn add_contact(
        &self,
        contact: &NewContact,
    ) -> Result<(), ContactError> {
        let url = self.endpoint(ADD_PATH);
        debug!(%url, name = contact.name(), "adding contact");

        let form = [
            ("apiKey", self.api_key.as_str()),
            ("name", contact.name()),
            ("phone", contact.phone()),
        ];
        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(response).await?;

        if body.trim() == SUCCESS_SENTINEL {
            Ok(())
        } else {
            warn!(response = %body, "contact API rejected the new contact");
            Err(ContactError::Rejected(body))
        }
    }
}
