use serde::{Deserialize, Serialize};

use super::repository::ContactError;

/// Backend-assigned contact identifier.
pub type ContactId = u64;

/// A contact as the contact book lists it. Extra fields in the server's
/// records are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Absent when the backend does not hand out identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn with_id(
        mut self,
        id: ContactId,
    ) -> Self {
        self.id = Some(id);
        self
    }
}

/// For adding contacts. Built from raw form input, so both fields are
/// trimmed and must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    name: String,
    phone: String,
}

impl NewContact {
    /// # Errors
    ///
    /// [`ContactError::MissingField`] when either field is empty after
    /// trimming.
    pub fn new(
        name: &str,
        phone: &str,
    ) -> Result<Self, ContactError> {
        let name = name.trim();
        let phone = phone.trim();

        if name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if phone.is_empty() {
            return Err(ContactError::MissingField("phone"));
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl From<NewContact> for Contact {
    fn from(new: NewContact) -> Self {
        Self::new(new.name, new.phone)
    }
}
