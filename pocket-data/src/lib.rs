mod importer;

pub use importer::{ContactImportError, ContactImporter, ContactRecord};
