//! envini - read and edit INI configuration with environment overrides.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging on stderr.
//! - Run the selected command and map failures to exit codes.
//!
//! Does NOT handle:
//! - INI parsing, override resolution or rendering (see `crates/ini`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Command output goes to stdout; logs and errors go to stderr.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use error::ExitCode;
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = envini::load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let json_layer = cli
        .log_json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!cli.log_json).then(|| fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(json_layer)
        .with(text_layer)
        .init();

    let result = {
        let mut out = std::io::stdout().lock();
        dispatch::run(&cli, &mut out).and_then(|()| out.flush().map_err(Into::into))
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}
