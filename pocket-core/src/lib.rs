pub mod auth;
pub mod contacts;
pub mod engine;
pub mod search;

pub use auth::{LoginOutcome, check_credentials};
pub use contacts::{Contact, ContactError, ContactId, ContactRepository, NewContact};
pub use engine::{CalcError, Calculator, CalculatorState, DisplaySink, InputToken, Operator};
