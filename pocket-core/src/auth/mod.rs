//! Fixed-credential login check.

mod login;

pub use login::{LoginOutcome, SYSTEM_PASSWORD, SYSTEM_USERNAME, check_credentials};
