use std::fmt;

use super::error::CalcError;
use super::operator::Operator;

/// A single key press delivered to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputToken {
    /// A digit key. Values above 9 are rejected when applied.
    Digit(u8),
    Dot,
    Operator(Operator),
    Equals,
    Clear,
}

impl InputToken {
    /// Maps one key character to a token.
    ///
    /// `c`/`C` is clear and `=` is equals; operators accept the same symbols
    /// as [`Operator::parse`].
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(digit) = c.to_digit(10) {
            // to_digit(10) never exceeds 9
            return Some(Self::Digit(digit as u8));
        }
        match c {
            '.' => Some(Self::Dot),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            _ => {
                let mut buf = [0u8; 4];
                Operator::parse(c.encode_utf8(&mut buf)).map(Self::Operator)
            }
        }
    }

    /// Parses a whole word: either a key name (`clear`, `ac`, `equals`) or
    /// a single key character.
    pub fn parse(word: &str) -> Result<Self, CalcError> {
        match word.to_ascii_lowercase().as_str() {
            "clear" | "ac" => return Ok(Self::Clear),
            "equals" => return Ok(Self::Equals),
            _ => {}
        }

        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| CalcError::InvalidToken(word.to_string()))
            }
            _ => Err(CalcError::InvalidToken(word.to_string())),
        }
    }
}

impl fmt::Display for InputToken {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Dot => f.write_str("."),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Clear => f.write_str("clear"),
        }
    }
}

/// Splits a line of key presses into tokens.
///
/// Whitespace separates words. A word that is a key name becomes one token;
/// any other word is read character by character, so `12+3=` and
/// `1 2 + 3 equals` describe the same presses.
pub fn parse_tokens(line: &str) -> Result<Vec<InputToken>, CalcError> {
    let mut tokens = Vec::new();

    for word in line.split_whitespace() {
        if let Ok(token) = InputToken::parse(word) {
            tokens.push(token);
            continue;
        }
        for c in word.chars() {
            let token = InputToken::from_char(c)
                .ok_or_else(|| CalcError::InvalidToken(c.to_string()))?;
            tokens.push(token);
        }
    }

    Ok(tokens)
}
