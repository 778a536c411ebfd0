use std::io::Read;

use pocket_core::contacts::{ContactError, ContactRepository, NewContact};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when importing contacts.
#[derive(Debug, Error)]
pub enum ContactImportError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// A row is missing a required value. `row` is 1-based, header excluded.
    #[error("row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: ContactError,
    },

    /// The backend refused or failed to store a row.
    #[error("row {row}: failed to add contact: {source}")]
    Contact {
        row: usize,
        #[source]
        source: ContactError,
    },
}

impl From<csv::Error> for ContactImportError {
    fn from(err: csv::Error) -> Self {
        ContactImportError::CsvParse(err.to_string())
    }
}

/// A single record from a contacts CSV file.
///
/// Columns are matched by header name, so order does not matter:
/// - `name`: the contact's display name
/// - `phone`: the contact's phone number, kept as text
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
}

/// Bulk loader for contacts from CSV files.
///
/// Records go through the [`ContactRepository`] trait, so any registered
/// backend can be the destination.
pub struct ContactImporter;

impl ContactImporter {
    /// Parse contact records from a CSV reader.
    ///
    /// Values are trimmed; the header row is required.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ContactRecord>, ContactImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ContactRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Add every record to `repo`, in file order.
    ///
    /// All rows are validated before the first request is sent, so a file
    /// with an empty cell adds nothing. Adding stops at the first row the
    /// backend rejects; rows before it stay added.
    ///
    /// Returns the number of contacts added.
    pub async fn load<R: ContactRepository + ?Sized>(
        repo: &R,
        records: &[ContactRecord],
    ) -> Result<usize, ContactImportError> {
        let contacts = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                NewContact::new(&record.name, &record.phone)
                    .map_err(|source| ContactImportError::InvalidRecord { row: idx + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (idx, contact) in contacts.iter().enumerate() {
            repo.add_contact(contact)
                .await
                .map_err(|source| ContactImportError::Contact { row: idx + 1, source })?;
        }

        info!(count = contacts.len(), "contacts imported");
        Ok(contacts.len())
    }
}
