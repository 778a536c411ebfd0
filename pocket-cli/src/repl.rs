//! Terminal front-end for the calculator: reads key presses line by line and
//! writes the display after every press.

use std::io::{BufRead, Write};

use pocket_core::engine::{Calculator, DisplaySink, parse_tokens};
use tracing::{error, warn};

/// Words that end an interactive session.
const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

const NOT_UTF8: &str = "ignored a line that is not valid UTF-8";

/// Writes each display frame on its own line.
pub struct LineDisplay<W: Write> {
    out: W,
}

impl<W: Write> LineDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for LineDisplay<W> {
    fn render(
        &mut self,
        text: &str,
    ) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            error!(error = %e, "failed to write display");
        }
    }
}

/// Runs an interactive calculator session until EOF or a quit word.
///
/// Each input line may carry several key presses (`12+3=` or `1 2 + 3
/// equals`). The display goes to `display`; errors such as division by zero
/// are reported on `alerts` and the session continues, so a bad key press
/// never ends it. Only a failing reader or alert writer does.
pub fn run_session<R, W, A>(
    input: R,
    display: W,
    alerts: &mut A,
) -> anyhow::Result<W>
where
    R: BufRead,
    W: Write,
    A: Write,
{
    let mut calculator = Calculator::new(LineDisplay::new(display));

    for bytes in input.split(b'\n') {
        let Ok(line) = String::from_utf8(bytes?) else {
            warn!("skipping input line that is not UTF-8");
            writeln!(alerts, "{NOT_UTF8}")?;
            continue;
        };
        let trimmed = line.trim();
        if QUIT_WORDS.contains(&trimmed.to_ascii_lowercase().as_str()) {
            break;
        }

        let tokens = match parse_tokens(trimmed) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(input = trimmed, error = %e, "unparseable input line");
                writeln!(alerts, "{e}")?;
                continue;
            }
        };

        for token in tokens {
            if let Err(e) = calculator.dispatch(token) {
                writeln!(alerts, "{e}")?;
            }
        }
    }

    Ok(calculator.into_sink().into_inner())
}
