//! Four-function calculator engine.
//!
//! The engine is split into a pure state machine ([`CalculatorState`]) and a
//! thin driver ([`Calculator`]) that pushes the current display text to a
//! [`DisplaySink`] after every input event. Input arrives as discrete
//! [`InputToken`]s: digits, the decimal point, operators, equals and clear.
//!
//! # Example
//!
//! ```
//! use pocket_core::engine::{Calculator, InputToken, Operator};
//!
//! let mut calc = Calculator::new(Vec::<String>::new());
//! calc.dispatch(InputToken::Digit(5)).unwrap();
//! calc.dispatch(InputToken::Operator(Operator::Multiply)).unwrap();
//! calc.dispatch(InputToken::Digit(3)).unwrap();
//! calc.dispatch(InputToken::Equals).unwrap();
//!
//! assert_eq!(calc.state().current_input(), "15");
//! assert_eq!(calc.sink().last().map(String::as_str), Some("15"));
//! ```

mod calculator;
mod error;
mod format;
mod operator;
mod state;
mod token;

pub use calculator::{Calculator, DisplaySink, evaluate_tokens};
pub use error::CalcError;
pub use format::format_number;
pub use operator::Operator;
pub use state::CalculatorState;
pub use token::{InputToken, parse_tokens};
