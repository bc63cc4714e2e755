//! # Changemaker CLI
//!
//! Command-line front end over `changemaker-core`.
//!
//! ## Usage
//! ```bash
//! # Single transaction
//! changemaker 2.12 3.00
//!
//! # Euro catalog, reproducible random change
//! changemaker --locale fr-FR --seed 42 3.33 5.00
//!
//! # Batch file of "owed,paid" lines
//! changemaker --file transactions.txt
//! cat transactions.txt | changemaker --file - --detailed
//! ```
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main                                                                   │
//! │   ├── init_tracing()         RUST_LOG → stderr                          │
//! │   ├── CliConfig::load()      CHANGEMAKER_* env vars                     │
//! │   ├── Invocation::parse()    flags + positional amounts                 │
//! │   └── commands::execute()    registry → stdout                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use changemaker_core::CurrencyRegistry;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, InputSource, Invocation};
use crate::error::CliResult;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "changemaker failed");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> CliResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = CliConfig::load()?;
    let invocation = Invocation::parse(config, &args)?;
    debug!(
        locale = %invocation.config.locale,
        divisor = invocation.config.divisor,
        seed = ?invocation.config.seed,
        command = ?invocation.command,
        "Configuration loaded"
    );

    let registry = CurrencyRegistry::standard();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(&invocation, &registry, &mut out, read_source)
}

/// Reads the whole batch input.
fn read_source(source: &InputSource) -> io::Result<String> {
    match source {
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        InputSource::File(path) => fs::read_to_string(path),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show dispatch and solver decisions
/// - `RUST_LOG=changemaker_core=trace` - Core crate only
/// - Default: warnings, plus INFO from changemaker crates
///
/// Logs go to stderr; stdout carries only results.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,changemaker=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
