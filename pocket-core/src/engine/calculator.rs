use tracing::debug;

use super::error::CalcError;
use super::state::CalculatorState;
use super::token::{InputToken, parse_tokens};

/// A text surface that shows the calculator display.
///
/// [`Calculator`] calls [`render`](DisplaySink::render) with the current
/// input after every event it handles, failing events included.
pub trait DisplaySink {
    fn render(
        &mut self,
        text: &str,
    );
}

/// Records every rendered frame; handy for tests and transcripts.
impl DisplaySink for Vec<String> {
    fn render(
        &mut self,
        text: &str,
    ) {
        self.push(text.to_string());
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn render(
        &mut self,
        text: &str,
    ) {
        (**self).render(text);
    }
}

/// Owns a [`CalculatorState`] and keeps a [`DisplaySink`] in sync with it.
#[derive(Debug)]
pub struct Calculator<S> {
    state: CalculatorState,
    sink: S,
}

impl<S: DisplaySink> Calculator<S> {
    /// Creates a calculator in the default state and renders the initial
    /// display.
    pub fn new(sink: S) -> Self {
        let mut calculator = Self {
            state: CalculatorState::new(),
            sink,
        };
        calculator.refresh();
        calculator
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Applies one key press and refreshes the display.
    ///
    /// The display is refreshed even when the transition fails, so a
    /// division by zero leaves the sink showing the reset value.
    pub fn dispatch(
        &mut self,
        token: InputToken,
    ) -> Result<(), CalcError> {
        debug!(%token, "dispatch");
        let result = self.state.apply(token);
        self.refresh();
        result
    }

    fn refresh(&mut self) {
        self.sink.render(self.state.current_input());
    }
}

/// Runs a line of key presses on a fresh calculator and returns the final
/// display text.
///
/// Stops at the first failing key press.
///
/// ```
/// use pocket_core::engine::evaluate_tokens;
///
/// assert_eq!(evaluate_tokens("3 + 4 + 5 =").unwrap(), "12");
/// ```
pub fn evaluate_tokens(line: &str) -> Result<String, CalcError> {
    let mut state = CalculatorState::new();
    for token in parse_tokens(line)? {
        state.apply(token)?;
    }
    Ok(state.current_input().to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::Operator;

    fn feed(
        calc: &mut Calculator<Vec<String>>,
        line: &str,
    ) {
        for token in parse_tokens(line).unwrap() {
            calc.dispatch(token).unwrap();
        }
    }

    #[test]
    fn new_renders_initial_display() {
        let calc = Calculator::new(Vec::new());

        assert_eq!(calc.sink(), &vec!["0".to_string()]);
    }

    #[test]
    fn every_event_refreshes_the_display() {
        let mut calc = Calculator::new(Vec::new());

        feed(&mut calc, "12+3=");

        assert_eq!(
            calc.into_sink(),
            vec!["0", "1", "12", "12", "3", "15"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn division_by_zero_renders_the_reset_value() {
        let mut calc = Calculator::new(Vec::new());
        feed(&mut calc, "7/0");

        let result = calc.dispatch(InputToken::Equals);

        assert_eq!(result, Err(CalcError::DivisionByZero));
        assert_eq!(calc.sink().last().map(String::as_str), Some("0"));
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn calculator_keeps_working_after_an_error() {
        let mut calc = Calculator::new(Vec::new());
        feed(&mut calc, "7/0");
        let _ = calc.dispatch(InputToken::Equals);

        feed(&mut calc, "2*4=");

        assert_eq!(calc.state().current_input(), "8");
    }

    #[test]
    fn operator_after_division_by_zero_chains_from_zero() {
        let mut calc = Calculator::new(Vec::new());
        feed(&mut calc, "8/0");

        let result = calc.dispatch(InputToken::Operator(Operator::Multiply));
        feed(&mut calc, "5=");

        assert_eq!(result, Err(CalcError::DivisionByZero));
        assert_eq!(calc.state().current_input(), "0");
    }

    #[test]
    fn borrowed_sink_receives_frames() {
        let mut frames = Vec::new();
        {
            let mut calc = Calculator::new(&mut frames);
            calc.dispatch(InputToken::Digit(9)).unwrap();
            calc.dispatch(InputToken::Operator(Operator::Subtract)).unwrap();
        }

        assert_eq!(frames, vec!["0".to_string(), "9".to_string(), "9".to_string()]);
    }

    #[test]
    fn evaluate_tokens_returns_final_display() {
        assert_eq!(evaluate_tokens("5*3=").unwrap(), "15");
        assert_eq!(evaluate_tokens("5*3").unwrap(), "3");
        assert_eq!(evaluate_tokens("").unwrap(), "0");
    }

    #[test]
    fn evaluate_tokens_stops_at_first_error() {
        assert_eq!(evaluate_tokens("1/0="), Err(CalcError::DivisionByZero));
        assert_eq!(
            evaluate_tokens("1+%"),
            Err(CalcError::InvalidToken("%".to_string()))
        );
    }
}
