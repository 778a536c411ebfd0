//! In-process contact backend. Holds contacts for the lifetime of the
//! process only; useful offline and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::factory::{ApiConfig, ContactClientFactory};
use super::models::{Contact, ContactId, NewContact};
use super::repository::{ContactError, ContactRepository};

#[derive(Debug, Default)]
struct Book {
    contacts: Vec<Contact>,
    last_id: ContactId,
}

impl Book {
    fn position(
        &self,
        id: ContactId,
    ) -> Result<usize, ContactError> {
        self.contacts
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(ContactError::NotFound(id))
    }
}

/// Contacts kept in insertion order. Every stored contact carries an id;
/// ids are never reused within one repository.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    book: RwLock<Book>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `contacts`, kept in the given order. Contacts without an
    /// id are numbered after the highest id already present.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let mut last_id = contacts.iter().filter_map(|c| c.id).max().unwrap_or(0);
        let contacts = contacts
            .into_iter()
            .map(|contact| match contact.id {
                Some(_) => contact,
                None => {
                    last_id += 1;
                    contact.with_id(last_id)
                }
            })
            .collect();

        Self {
            book: RwLock::new(Book { contacts, last_id }),
        }
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.book.read().await.contacts.clone())
    }

    async fn add_contact(
        &self,
        contact: &NewContact,
    ) -> Result<(), ContactError> {
        let mut book = self.book.write().await;
        book.last_id += 1;
        let id = book.last_id;
        book.contacts.push(Contact::from(contact.clone()).with_id(id));
        debug!(id, name = contact.name(), total = book.contacts.len(), "contact added");
        Ok(())
    }

    async fn get_contact(
        &self,
        id: ContactId,
    ) -> Result<Contact, ContactError> {
        let book = self.book.read().await;
        let idx = book.position(id)?;
        Ok(book.contacts[idx].clone())
    }

    async fn update_contact(
        &self,
        id: ContactId,
        contact: &NewContact,
    ) -> Result<Contact, ContactError> {
        let mut book = self.book.write().await;
        let idx = book.position(id)?;
        let stored = &mut book.contacts[idx];
        stored.name = contact.name().to_string();
        stored.phone = contact.phone().to_string();
        debug!(id, name = contact.name(), "contact updated");
        Ok(stored.clone())
    }

    async fn delete_contact(
        &self,
        id: ContactId,
    ) -> Result<(), ContactError> {
        let mut book = self.book.write().await;
        let idx = book.position(id)?;
        book.contacts.remove(idx);
        debug!(id, total = book.contacts.len(), "contact deleted");
        Ok(())
    }
}

/// [`ContactClientFactory`] for the `"memory"` backend. Every call to
/// `create` returns a fresh, empty book.
pub struct InMemoryContactClientFactory;

#[async_trait]
impl ContactClientFactory for InMemoryContactClientFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &ApiConfig,
    ) -> Result<Box<dyn ContactRepository>, ContactError> {
        Ok(Box::new(InMemoryContactRepository::new()))
    }
}
