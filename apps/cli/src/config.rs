//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then overridden by command-line flags.
//!
//! ```text
//! CHANGEMAKER_LOCALE   --locale <tag>     en-US | fr-FR     (default en-US)
//! CHANGEMAKER_DIVISOR  --divisor <n>      n > 0             (default 3)
//! CHANGEMAKER_SEED     --seed <u64>       optional
//! CHANGEMAKER_FORMAT   --format <fmt>     plain | json      (default plain)
//!                      --file <path>      batch mode, "-" = stdin
//!                      --detailed         batch report as JSON
//!                      --locales          list supported locales
//!                      <owed> <paid>      single transaction
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use changemaker_core::{Locale, DEFAULT_DIVISOR};
use rust_decimal::Decimal;

pub const ENV_LOCALE: &str = "CHANGEMAKER_LOCALE";
pub const ENV_DIVISOR: &str = "CHANGEMAKER_DIVISOR";
pub const ENV_SEED: &str = "CHANGEMAKER_SEED";
pub const ENV_FORMAT: &str = "CHANGEMAKER_FORMAT";

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("format".to_string())),
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub locale: Locale,

    /// Owed amounts divisible by this get random change
    pub divisor: u32,

    /// Fixed seed for reproducible random change
    pub seed: Option<u64>,

    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            locale: Locale::default(),
            divisor: DEFAULT_DIVISOR,
            seed: None,
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        CliConfig::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(value) = lookup(ENV_LOCALE) {
            config.locale = parse_locale(ENV_LOCALE, &value)?;
        }
        if let Some(value) = lookup(ENV_DIVISOR) {
            config.divisor = parse_divisor(ENV_DIVISOR, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config.seed = Some(parse_seed(ENV_SEED, &value)?);
        }
        if let Some(value) = lookup(ENV_FORMAT) {
            config.format = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_FORMAT.to_string()))?;
        }

        Ok(config)
    }
}

/// Where batch input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quote { owed: Decimal, paid: Decimal },
    Batch { source: InputSource, detailed: bool },
    ListLocales,
    Help,
}

/// A fully resolved invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: CliConfig,
    pub command: Command,
}

impl Invocation {
    /// Applies command-line flags (program name already stripped) on top
    /// of `config`.
    pub fn parse(mut config: CliConfig, args: &[String]) -> Result<Self, ConfigError> {
        let mut file: Option<InputSource> = None;
        let mut detailed = false;
        let mut list_locales = false;
        let mut positional: Vec<&str> = Vec::new();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--locale" | "-l" => {
                    let value = flag_value(args, &mut i, "--locale")?;
                    config.locale = parse_locale("--locale", value)?;
                }
                "--divisor" | "-d" => {
                    let value = flag_value(args, &mut i, "--divisor")?;
                    config.divisor = parse_divisor("--divisor", value)?;
                }
                "--seed" | "-s" => {
                    let value = flag_value(args, &mut i, "--seed")?;
                    config.seed = Some(parse_seed("--seed", value)?);
                }
                "--format" => {
                    let value = flag_value(args, &mut i, "--format")?;
                    config.format = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("--format".to_string()))?;
                }
                "--file" | "-f" => {
                    let value = flag_value(args, &mut i, "--file")?;
                    file = Some(match value {
                        "-" => InputSource::Stdin,
                        path => InputSource::File(PathBuf::from(path)),
                    });
                }
                "--detailed" => detailed = true,
                "--locales" => list_locales = true,
                "--help" | "-h" => {
                    return Ok(Invocation {
                        config,
                        command: Command::Help,
                    })
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument(flag.to_string()));
                }
                value => positional.push(value),
            }
            i += 1;
        }

        let command = if list_locales {
            Command::ListLocales
        } else if let Some(source) = file {
            if !positional.is_empty() {
                return Err(ConfigError::Conflict(
                    "--file cannot be combined with positional amounts".to_string(),
                ));
            }
            Command::Batch { source, detailed }
        } else {
            match positional.as_slice() {
                [] => Command::Help,
                [owed, paid] => Command::Quote {
                    owed: parse_amount("<owed>", owed)?,
                    paid: parse_amount("<paid>", paid)?,
                },
                [_] => return Err(ConfigError::MissingRequired("<paid>".to_string())),
                [_, _, extra, ..] => return Err(ConfigError::UnknownArgument(extra.to_string())),
            }
        };

        Ok(Invocation { config, command })
    }
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, ConfigError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingRequired(flag.to_string()))
}

fn parse_locale(name: &str, value: &str) -> Result<Locale, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

fn parse_divisor(name: &str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(divisor) if divisor > 0 => Ok(divisor),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

fn parse_seed(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

fn parse_amount(name: &str, value: &str) -> Result<Decimal, ConfigError> {
    changemaker_core::validation::parse_amount(name, value)
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Conflicting arguments: {0}")]
    Conflict(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
