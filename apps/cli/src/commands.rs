//! Command handlers.
//!
//! Each handler takes the resolved configuration and a writer, so the whole
//! command surface runs against in-memory buffers in tests.

use std::io::Write;

use changemaker_core::{BatchProcessor, ChangeRequest, CurrencyRegistry, Locale};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, Command, InputSource, Invocation, OutputFormat};
use crate::error::{CliError, CliResult};

pub const USAGE: &str = "\
Changemaker - cash change calculator

Usage:
  changemaker [OPTIONS] <owed> <paid>
  changemaker [OPTIONS] --file <path|-> [--detailed]
  changemaker --locales

Options:
  -l, --locale <tag>     Currency locale: en-US, fr-FR (env CHANGEMAKER_LOCALE)
  -d, --divisor <n>      Random change when owed cents % n == 0 (env CHANGEMAKER_DIVISOR, default 3)
  -s, --seed <u64>       Seed for reproducible random change (env CHANGEMAKER_SEED)
      --format <fmt>     plain | json (env CHANGEMAKER_FORMAT, default plain)
  -f, --file <path>      Process 'owed,paid' lines from a file, '-' for stdin
      --detailed         Emit a JSON batch report with per-line results
      --locales          List supported locales
  -h, --help             Show this help message";

/// One row of `--locales` output.
#[derive(Debug, Serialize)]
struct LocaleInfo {
    locale: Locale,
    denominations: usize,
}

/// Runs `invocation`, reading batch input through `read_input`.
pub fn execute<W, R>(
    invocation: &Invocation,
    registry: &CurrencyRegistry,
    out: &mut W,
    read_input: R,
) -> CliResult<()>
where
    W: Write,
    R: FnOnce(&InputSource) -> std::io::Result<String>,
{
    let config = &invocation.config;
    match &invocation.command {
        Command::Help => writeln!(out, "{}", USAGE)?,
        Command::ListLocales => list_locales(config, registry, out)?,
        Command::Quote { owed, paid } => quote(config, registry, *owed, *paid, out)?,
        Command::Batch { source, detailed } => {
            let text = read_input(source).map_err(|error| CliError::Input {
                source_name: source.to_string(),
                error,
            })?;
            batch(config, registry, &text, *detailed, out)?;
        }
    }
    Ok(())
}

fn list_locales<W: Write>(config: &CliConfig, registry: &CurrencyRegistry, out: &mut W) -> CliResult<()> {
    let locales = registry.supported_locales();
    match config.format {
        OutputFormat::Plain => {
            for locale in locales {
                writeln!(out, "{}", locale)?;
            }
        }
        OutputFormat::Json => {
            let rows = locales
                .into_iter()
                .map(|locale| {
                    Ok(LocaleInfo {
                        locale,
                        denominations: registry.catalog(locale)?.len(),
                    })
                })
                .collect::<CliResult<Vec<_>>>()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
    }
    Ok(())
}

fn quote<W: Write>(
    config: &CliConfig,
    registry: &CurrencyRegistry,
    owed: Decimal,
    paid: Decimal,
    out: &mut W,
) -> CliResult<()> {
    let mut request = ChangeRequest::new(owed, paid)
        .with_locale(config.locale)
        .with_divisor(config.divisor);
    if let Some(seed) = config.seed {
        request = request.with_seed(seed);
    }

    let receipt = registry.quote(&request)?;
    info!(
        change_minor = receipt.change_minor_units,
        is_random = receipt.is_random,
        locale = %receipt.locale,
        "Change calculated"
    );

    match config.format {
        OutputFormat::Plain => writeln!(out, "{}", receipt.formatted_change)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&receipt)?)?,
    }
    Ok(())
}

fn batch<W: Write>(
    config: &CliConfig,
    registry: &CurrencyRegistry,
    text: &str,
    detailed: bool,
    out: &mut W,
) -> CliResult<()> {
    let processor = BatchProcessor::new(registry.calculator(config.locale)?)
        .with_divisor(config.divisor)?
        .with_seed(config.seed);

    if detailed {
        let report = processor.process_detailed(text);
        info!(
            total = report.total_lines,
            processed = report.processed_lines,
            errors = report.error_lines,
            "Batch processed"
        );
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let lines = processor.process_plain(text);
    info!(lines = lines.len(), "Batch processed");
    match config.format {
        OutputFormat::Plain => {
            for line in &lines {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&lines)?)?,
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
