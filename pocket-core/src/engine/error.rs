use thiserror::Error;

/// Errors reported by calculator transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalcError {
    /// The pending operation divided by zero. The state has already been
    /// reset to its defaults when this is returned.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// An operand could not be read as a number.
    #[error("invalid operand '{0}'")]
    InvalidOperand(String),

    /// Input text that does not name a calculator key.
    #[error("unrecognised input token '{0}'")]
    InvalidToken(String),
}
