use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::error::CalcError;
use super::format::format_number;
use super::operator::Operator;
use super::token::InputToken;

const DEFAULT_INPUT: &str = "0";

/// Arithmetic state of the calculator.
///
/// Invariants:
/// - `current_input` holds at most one `.`.
/// - `operator` is set only while `previous_input` is set.
///
/// Every transition runs to completion and leaves the state consistent,
/// including the failing ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    current_input: String,
    previous_input: Option<String>,
    operator: Option<Operator>,
    pending_reset: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_input: DEFAULT_INPUT.to_string(),
            previous_input: None,
            operator: None,
            pending_reset: false,
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value being entered, or the last result. This is what the
    /// display shows.
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Left operand waiting for the pending operator.
    pub fn previous_input(&self) -> Option<&str> {
        self.previous_input.as_deref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// True right after an operator or equals: the next digit starts a new
    /// number instead of extending the current one.
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Feeds one key press through the matching transition.
    pub fn apply(
        &mut self,
        token: InputToken,
    ) -> Result<(), CalcError> {
        match token {
            InputToken::Digit(d) => {
                let c = char::from_digit(u32::from(d), 10)
                    .ok_or_else(|| CalcError::InvalidToken(d.to_string()))?;
                self.append_digit_or_dot(c)
            }
            InputToken::Dot => self.append_digit_or_dot('.'),
            InputToken::Operator(op) => self.choose_operator(op),
            InputToken::Equals => self.compute(),
            InputToken::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    /// Enters a digit or the decimal point.
    ///
    /// After an operator or equals the token starts a fresh number (`.`
    /// becomes `0.`). A lone leading `0` is replaced by the next digit, and a
    /// second `.` is ignored.
    pub fn append_digit_or_dot(
        &mut self,
        token: char,
    ) -> Result<(), CalcError> {
        if !token.is_ascii_digit() && token != '.' {
            return Err(CalcError::InvalidToken(token.to_string()));
        }

        if self.pending_reset {
            self.current_input = if token == '.' {
                "0.".to_string()
            } else {
                token.to_string()
            };
            self.pending_reset = false;
        } else if self.current_input == DEFAULT_INPUT && token != '.' {
            self.current_input = token.to_string();
        } else if token == '.' && self.current_input.contains('.') {
            trace!(input = %self.current_input, "ignoring second decimal point");
            return Ok(());
        } else {
            self.current_input.push(token);
        }

        trace!(input = %self.current_input, "entry updated");
        Ok(())
    }

    /// Records `op` as the pending operator.
    ///
    /// A previously pending operation is collapsed first, so `3 + 4 + 5`
    /// evaluates left to right. If that collapse divides by zero the state
    /// is reset, `op` is still recorded against the reset `0`, and the error
    /// is returned for the caller to report.
    pub fn choose_operator(
        &mut self,
        op: Operator,
    ) -> Result<(), CalcError> {
        let collapsed = if self.operator.is_some() {
            self.compute()
        } else {
            Ok(())
        };
        if let Err(err @ CalcError::InvalidOperand(_)) = collapsed {
            return Err(err);
        }

        self.previous_input = Some(self.current_input.clone());
        self.operator = Some(op);
        self.pending_reset = true;

        debug!(operator = %op, lhs = %self.current_input, "operator chosen");
        collapsed
    }

    /// Evaluates the pending operation.
    ///
    /// Does nothing when no operator is pending, or when no second operand
    /// has been entered since the operator was chosen.
    ///
    /// # Errors
    ///
    /// * [`CalcError::DivisionByZero`] when dividing by an operand equal to
    ///   zero. The state is reset to its defaults before returning.
    /// * [`CalcError::InvalidOperand`] when an operand is not numeric. The
    ///   state is left untouched.
    pub fn compute(&mut self) -> Result<(), CalcError> {
        let (Some(operator), Some(previous)) = (self.operator, self.previous_input.as_deref())
        else {
            return Ok(());
        };
        if self.pending_reset {
            return Ok(());
        }

        let lhs = parse_operand(previous)?;
        let rhs = parse_operand(&self.current_input)?;

        if operator == Operator::Divide && rhs == 0.0 {
            warn!(lhs, "division by zero, resetting calculator");
            self.clear();
            return Err(CalcError::DivisionByZero);
        }

        let result = format_number(operator.apply(lhs, rhs));
        debug!(lhs, operator = %operator, rhs, %result, "computed");

        self.current_input = result;
        self.operator = None;
        self.previous_input = None;
        self.pending_reset = true;
        Ok(())
    }

    /// Restores the defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
        trace!("calculator cleared");
    }
}

fn parse_operand(text: &str) -> Result<f64, CalcError> {
    text.parse::<f64>()
        .map_err(|_| CalcError::InvalidOperand(text.to_string()))
}
