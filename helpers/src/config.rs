//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. Command-line flags override them.

use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

pub const COUNTRIES_FILE_VAR: &str = "LANGMAP_COUNTRIES_FILE";
pub const FLAGS_CODES_FILE_VAR: &str = "LANGMAP_FLAGS_CODES_FILE";
pub const EXTENDED_COUNTRIES_FILE_VAR: &str = "LANGMAP_EXTENDED_COUNTRIES_FILE";
pub const STATIC_DIR_VAR: &str = "LANGMAP_STATIC_DIR";
pub const JSON_INDENT_VAR: &str = "LANGMAP_JSON_INDENT";

const DEFAULT_COUNTRIES_FILE: &str = "countries.json";
const DEFAULT_FLAGS_CODES_FILE: &str = "flags_codes.json";
const DEFAULT_EXTENDED_COUNTRIES_FILE: &str = "extended_countries.json";
const DEFAULT_STATIC_DIR: &str = "static/data";
const DEFAULT_JSON_INDENT: usize = 4;
const MAX_JSON_INDENT: usize = 8;

/// File locations used by the flag/code merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePaths {
    /// Primary dataset, enriched in place.
    pub countries: PathBuf,
    /// Secondary dataset providing `cca2` and `flag`.
    pub flags_codes: PathBuf,
    /// Where the enriched primary dataset is written.
    pub output: PathBuf,
}

impl Default for MergePaths {
    fn default() -> Self {
        Self {
            countries: PathBuf::from(DEFAULT_COUNTRIES_FILE),
            flags_codes: PathBuf::from(DEFAULT_FLAGS_CODES_FILE),
            output: PathBuf::from(DEFAULT_EXTENDED_COUNTRIES_FILE),
        }
    }
}

/// Helper configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    pub merge: MergePaths,
    /// Output directory of the static maps.
    pub static_dir: PathBuf,
    /// Indentation width of pretty-printed datasets (0 = compact).
    pub json_indent: usize,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            merge: MergePaths::default(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

impl HelperConfig {
    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = non_empty(lookup(COUNTRIES_FILE_VAR)) {
            config.merge.countries = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup(FLAGS_CODES_FILE_VAR)) {
            config.merge.flags_codes = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup(EXTENDED_COUNTRIES_FILE_VAR)) {
            config.merge.output = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup(STATIC_DIR_VAR)) {
            config.static_dir = PathBuf::from(v);
        }
        if let Some(v) = non_empty(lookup(JSON_INDENT_VAR)) {
            config.json_indent = parse_indent(&v)?;
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_indent(value: &str) -> ConfigResult<usize> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: JSON_INDENT_VAR.to_string(),
        value: value.to_string(),
        message,
    };

    let indent: usize = value
        .parse()
        .map_err(|_| invalid("expected an integer".to_string()))?;

    if indent > MAX_JSON_INDENT {
        return Err(invalid(format!("must be at most {}", MAX_JSON_INDENT)));
    }
    Ok(indent)
}
