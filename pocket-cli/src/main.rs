use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use pocket_cli::config::{ApiOverrides, AppConfig};
use pocket_cli::{app, logging, repl};
use pocket_core::engine::evaluate_tokens;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Pocket utilities: a keypad calculator, a login check and a contact book.
#[derive(Debug, Parser)]
#[command(name = "pocket", version, about)]
struct Cli {
    /// Config file (defaults to `pocket.toml` in the working directory, if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `pocket_core=trace`. `RUST_LOG` wins when set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Keypad calculator. Reads key presses from stdin, one or more per line
    /// (`12+3=`, `c` to clear, `q` to quit), and prints the display after each.
    Calc {
        /// Evaluate these key presses once and print the final display.
        #[arg(long)]
        eval: Option<String>,
    },

    /// Check a username and password.
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Contact book.
    Contacts {
        #[command(flatten)]
        api: ApiArgs,

        #[command(subcommand)]
        action: ContactsAction,
    },
}

#[derive(Debug, Args)]
struct ApiArgs {
    /// Contact backend (`http` or `memory`).
    #[arg(long, env = "POCKET_BACKEND")]
    backend: Option<String>,

    /// Root URL of the contact book API.
    #[arg(long, env = "POCKET_API_ROOT")]
    root_url: Option<String>,

    /// API key identifying the contact book.
    #[arg(long, env = "POCKET_API_KEY")]
    api_key: Option<String>,
}

#[derive(Debug, Subcommand)]
enum ContactsAction {
    /// List contacts.
    List {
        /// Only show contacts whose name contains this text (case-insensitive).
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a contact, then show the updated list.
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        phone: String,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(eval: Option<String>) -> anyhow::Result<ExitCode> {
    if let Some(line) = eval {
        return match evaluate_tokens(&line) {
            Ok(display) => {
                println!("{display}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let stdin = io::stdin();
    repl::run_session(stdin.lock(), io::stdout(), &mut io::stderr())
        .context("calculator session failed")?;
    Ok(ExitCode::SUCCESS)
}

fn run_login(
    username: &str,
    password: &str,
) -> ExitCode {
    let (outcome, text) = app::login(username, password, io::stdout().is_terminal());
    println!("{text}");
    if outcome.is_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run_contacts(
    config: &AppConfig,
    api: ApiArgs,
    action: ContactsAction,
) -> anyhow::Result<ExitCode> {
    let api_config = config.api_config(ApiOverrides {
        backend: api.backend,
        root_url: api.root_url,
        api_key: api.api_key,
    });

    debug!(backend = %api_config.backend, root = %api_config.root_url, "contact backend");
    let repo = app::build_registry()
        .connect(&api_config)
        .await
        .with_context(|| format!("cannot set up '{}' contact backend", api_config.backend))?;

    match action {
        ContactsAction::List { search } => {
            println!("{}", app::list_contacts(&*repo, search.as_deref()).await);
            Ok(ExitCode::SUCCESS)
        }
        ContactsAction::Add { name, phone } => {
            let (added, text) = app::add_contact(&*repo, &name, &phone).await;
            if added {
                println!("{text}");
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{text}");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log = logging::init_logging(logging::DEFAULT_LOG_LEVEL)?;
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    log.configure(
        cli.log_level.as_deref().or(config.logging.level.as_deref()),
        cli.log_file.as_deref().or(config.logging.file.as_deref()),
    )?;

    match cli.command {
        Command::Calc { eval } => run_calc(eval),
        Command::Login { username, password } => Ok(run_login(&username, &password)),
        Command::Contacts { api, action } => run_contacts(&config, api, action).await,
    }
}
