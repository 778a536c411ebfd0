use async_trait::async_trait;
use thiserror::Error;

use super::models::{Contact, ContactId, NewContact};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Please fill in all fields ({0} is empty)")]
    MissingField(&'static str),

    /// The server answered, but not with the success sentinel. Holds the
    /// raw response body.
    #[error("{0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("no contact with id {0}")]
    NotFound(ContactId),

    /// The backend has no endpoint for this operation.
    #[error("the '{backend}' backend cannot {operation} contacts")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },
}

/// A contact book backend.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All contacts, in the order the backend returns them.
    async fn list_contacts(&self) -> Result<Vec<Contact>, ContactError>;

    async fn add_contact(
        &self,
        contact: &NewContact,
    ) -> Result<(), ContactError>;

    /// Name used in [`ContactError::Unsupported`].
    fn backend_name(&self) -> &'static str;

    async fn get_contact(
        &self,
        _id: ContactId,
    ) -> Result<Contact, ContactError> {
        Err(ContactError::Unsupported {
            backend: self.backend_name(),
            operation: "look up",
        })
    }

    /// Replaces the name and phone of an existing contact and returns the
    /// stored record.
    async fn update_contact(
        &self,
        _id: ContactId,
        _contact: &NewContact,
    ) -> Result<Contact, ContactError> {
        Err(ContactError::Unsupported {
            backend: self.backend_name(),
            operation: "update",
        })
    }

    async fn delete_contact(
        &self,
        _id: ContactId,
    ) -> Result<(), ContactError> {
        Err(ContactError::Unsupported {
            backend: self.backend_name(),
            operation: "delete",
        })
    }
}
