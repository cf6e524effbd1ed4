//! Settings shared by every subcommand.
//!
//! Values come from, in order of precedence: command-line flags, an
//! optional TOML file passed with `--config`, and the built-in defaults.
//!
//! ```toml
//! tax_year = 2026        # or "reform", "legacy", 2025
//! format = "table"       # or "json"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use paye_core::{TaxEngineError, TaxRegime};
use serde::Deserialize;
use thiserror::Error;

use crate::logging::DEFAULT_LOG_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tax_year in config file: {0}")]
    TaxYear(#[from] TaxEngineError),
}

/// `tax_year` may be written as a year or a regime name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum TaxYearValue {
    Year(i32),
    Name(String),
}

impl TaxYearValue {
    fn resolve(self) -> Result<TaxRegime, TaxEngineError> {
        match self {
            Self::Year(year) => TaxRegime::from_tax_year(year),
            Self::Name(name) => name.parse(),
        }
    }
}

/// Contents of the config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    tax_year: Option<TaxYearValue>,
    format: Option<OutputFormat>,
    log_level: Option<String>,
}

/// Flag values that override the config file when present.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tax_year: Option<TaxRegime>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tax_year: TaxRegime,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tax_year: TaxRegime::Reform,
            format: OutputFormat::Table,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Parses config file contents on top of the defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        let defaults = Self::default();

        Ok(Self {
            tax_year: file
                .tax_year
                .map(TaxYearValue::resolve)
                .transpose()?
                .unwrap_or(defaults.tax_year),
            format: file.format.unwrap_or(defaults.format),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }

    /// Reads `path` if given; otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Self::from_toml(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line flags on top of these settings.
    pub fn with_overrides(
        self,
        overrides: Overrides,
    ) -> Self {
        Self {
            tax_year: overrides.tax_year.unwrap_or(self.tax_year),
            format: overrides.format.unwrap_or(self.format),
            log_level: overrides.log_level.unwrap_or(self.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_reform_table_info() {
        let config = AppConfig::load(None).unwrap();

        assert_eq!(
            config,
            AppConfig {
                tax_year: TaxRegime::Reform,
                format: OutputFormat::Table,
                log_level: "info".to_string(),
            }
        );
    }

    #[test]
    fn empty_file_keeps_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn tax_year_accepts_number_or_name() {
        let numeric = AppConfig::from_toml("tax_year = 2025").unwrap();
        let named = AppConfig::from_toml("tax_year = \"legacy\"").unwrap();

        assert_eq!(numeric.tax_year, TaxRegime::Legacy);
        assert_eq!(named.tax_year, TaxRegime::Legacy);
    }

    #[test]
    fn full_file_is_read() {
        let config = AppConfig::from_toml(
            r#"
tax_year = 2026
format = "json"
log_level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn unsupported_tax_year_is_rejected() {
        let err = AppConfig::from_toml("tax_year = 2019").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::TaxYear(TaxEngineError::UnsupportedRegime(_))
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = AppConfig::from_toml("colour = \"red\"").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Some(Path::new("no/such/paye.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn flags_win_over_file() {
        let config = AppConfig::from_toml("format = \"json\"\ntax_year = 2025")
            .unwrap()
            .with_overrides(Overrides {
                tax_year: Some(TaxRegime::Reform),
                format: None,
                log_level: Some("warn".to_string()),
            });

        assert_eq!(config.tax_year, TaxRegime::Reform);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "warn");
    }
}
