//! Tracing setup for the `pocket` binary.
//!
//! Records go to stderr so they never interleave with the calculator display
//! on stdout. Logging starts before the configuration file is read; the
//! returned [`LogHandle`] then applies the configured level and log file.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

/// Filter used when neither `RUST_LOG` nor the configuration names one.
/// Anything chattier would bury the one-line command output.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// `[12:03:04.517 WARN  pocket_http::repository] message key=value`
struct BracketFormat;

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "31",
        Level::WARN => "33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for BracketFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "[{time} \x1b[{}m{level:<5}\x1b[0m {}] ",
                level_colour(level),
                meta.target()
            )?;
        } else {
            write!(writer, "[{time} {level:<5} {}] ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file shared with the file layer. Writes are dropped until a file is
/// attached.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn attach(
        &self,
        file: File,
    ) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    }
}

impl Write for LogFile {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.lock().unwrap_or_else(PoisonError::into_inner).as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.lock().unwrap_or_else(PoisonError::into_inner).as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Live settings of the installed subscriber.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    file: LogFile,
    from_env: bool,
}

impl LogHandle {
    /// Applies the level and log file resolved from flags and configuration.
    ///
    /// `level` accepts a bare level (`debug`) or any `EnvFilter` directive.
    /// It is ignored when `RUST_LOG` was set at startup.
    pub fn configure(
        &self,
        level: Option<&str>,
        file: Option<&Path>,
    ) -> Result<()> {
        if let Some(level) = level.filter(|_| !self.from_env) {
            let filter = EnvFilter::try_new(level)
                .with_context(|| format!("invalid log level '{level}'"))?;
            self.filter
                .reload(filter)
                .context("cannot change the log filter")?;
        }

        if let Some(path) = file {
            let handle = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            self.file.attach(handle);
        }
        Ok(())
    }
}

/// Installs the global subscriber: stderr (coloured on a terminal) plus a
/// file layer that stays silent until [`LogHandle::configure`] attaches a
/// file. The filter comes from `RUST_LOG` when set, else `default_level`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(default_level: &str) -> Result<LogHandle> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(default_level)));

    let file = LogFile::default();
    let file_writer = file.clone();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(BracketFormat)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(BracketFormat)
                .with_ansi(false)
                .with_writer(move || file_writer.clone()),
        )
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(LogHandle {
        filter: filter_handle,
        file,
        from_env,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detached_log_file_swallows_writes() {
        let mut file = LogFile::default();

        assert_eq!(file.write(b"dropped").unwrap(), 7);
        file.flush().unwrap();
    }

    #[test]
    fn attached_log_file_receives_writes_from_every_clone() {
        let path = std::env::temp_dir().join(format!("pocket-log-{}.log", std::process::id()));
        let file = LogFile::default();
        let mut writer = file.clone();

        file.attach(File::create(&path).unwrap());
        writer.write_all(b"first\n").unwrap();
        file.clone().write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        fs::remove_file(&path).unwrap();
    }

    // The only test that installs the global subscriber.
    #[test]
    fn configured_log_file_receives_formatted_events() {
        let path = std::env::temp_dir().join(format!("pocket-init-{}.log", std::process::id()));
        let handle = init_logging(DEFAULT_LOG_LEVEL).unwrap();

        handle.configure(Some("debug"), Some(&path)).unwrap();
        tracing::error!(code = 7, "disk on fire");

        let logged = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(logged.starts_with('['), "{logged}");
        assert!(
            logged.contains(" ERROR pocket_cli::logging::tests] disk on fire code=7"),
            "{logged}"
        );
        assert!(init_logging(DEFAULT_LOG_LEVEL).is_err());
    }

    #[test]
    fn every_level_has_a_distinct_colour() {
        let mut colours: Vec<_> = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
            .into_iter()
            .map(level_colour)
            .collect();
        colours.sort_unstable();
        colours.dedup();

        assert_eq!(colours.len(), 5);
    }
}
