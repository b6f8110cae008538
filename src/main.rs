use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calcpad::{Config, Screen, Session, calculate_result, parse_keys};
use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Key-driven calculator with live preview and history.
#[derive(Parser, Debug)]
#[command(name = "calcpad", version, about)]
struct Cli {
    /// Path to a config file (defaults to <config dir>/calcpad/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Decimal places kept in results, overrides the config file
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one expression and print the result
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Replay button presses, e.g. `calcpad keys 1 2 + 5 +/- =`
    Keys {
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read button presses from stdin, one sequence per line
    Repl {
        /// Print the history as JSON on exit
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(precision) = cli.precision {
        config.precision = precision;
        config.validate().context("Invalid --precision")?;
    }

    match cli.command.unwrap_or(Command::Repl { json: false }) {
        Command::Eval { expression } => match calculate_result(&expression, config.precision) {
            Ok(result) => {
                println!("{result}");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{err}");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Keys { keys, json } => {
            let mut session = Session::new(&config);
            session.press_all(parse_keys(&keys.join(" "))?);

            let mut out = io::stdout().lock();
            print_screen(&mut out, &session.screen())?;
            print_history(&mut out, &session, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Repl { json } => {
            let mut session = Session::new(&config);
            let stdin = io::stdin();
            let mut out = io::stdout().lock();

            for line in stdin.lock().lines() {
                let line = line.context("Failed to read from stdin")?;
                match parse_keys(&line) {
                    Ok(keys) => session.press_all(keys),
                    Err(err) => {
                        warn!(%line, "skipping line");
                        eprintln!("{err}");
                        continue;
                    }
                }
                print_screen(&mut out, &session.screen())?;
            }

            print_history(&mut out, &session, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_screen(out: &mut impl Write, screen: &Screen) -> Result<()> {
    if screen.showing_answer {
        writeln!(out, "= {}", screen.display)?;
    } else {
        writeln!(out, "{}", screen.display)?;
    }
    if !screen.preview.is_empty() {
        writeln!(out, "  {}", screen.preview)?;
    }
    Ok(())
}

fn print_history(out: &mut impl Write, session: &Session, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(session.history())
            .context("Failed to serialize history")?;
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    if session.history().is_empty() {
        return Ok(());
    }

    writeln!(out, "history:")?;
    for entry in session.history().list() {
        writeln!(out, "  {entry}")?;
    }
    Ok(())
}
