//! Case-insensitive name search.

mod query;

pub use query::SearchQuery;
