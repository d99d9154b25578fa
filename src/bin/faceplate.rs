//! Command-line front end.
//!
//! Resolves the first word to a face or a legacy `faceplate-<name>`
//! executable and prints whatever the face renders. Legacy executables run
//! in the foreground and their exit code becomes ours.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use faceplate::config::ENV_LOG;
use faceplate::{Config, Dispatcher, FaceError, Outcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "faceplate",
    version,
    about = "Run a subcommand, or 'help' to list them",
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Same as the 'help' subcommand.
    #[arg(short, long, action = ArgAction::SetTrue)]
    help: bool,

    /// Subcommand, optional action, and their arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err
                .downcast_ref::<FaceError>()
                .is_some_and(FaceError::is_lookup_error)
            {
                eprintln!("See 'faceplate help' for the available subcommands.");
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let config = Config::from_env();
    let dispatcher =
        Dispatcher::from_config(&config).context("registering built-in faces")?;

    let mut argv = cli.command.clone();
    if cli.help {
        argv.insert(0, faceplate::HELP_FACE.to_string());
    }

    match dispatcher.run(&argv)? {
        Outcome::Rendered(text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            Ok(0)
        }
        Outcome::Legacy(status) => match status.code() {
            Some(code) => Ok(code),
            None => anyhow::bail!("Legacy subcommand terminated by signal"),
        },
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
