//! Presence checks and value checks for country records.
//!
//! Records are checked against small JSON Schema Draft 7 documents embedded
//! at compile time from the `schemas/` directory:
//!
//! - `country-record.json` - `name.common` is a string (the merge join key)
//! - `country-prepared.json` - record is ready for the static maps
//!   (`languages` already converted to an array)
//!
//! Flag emoji are checked with a regex rather than a schema, since a bad flag
//! is only a warning.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use langmap_helpers::validation::{is_valid_flag_emoji, validate_country_record};
//!
//! assert!(validate_country_record(&json!({ "name": { "common": "France" } })).is_ok());
//! assert!(is_valid_flag_emoji("🇫🇷"));
//! ```

use jsonschema::Validator;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

use crate::error::{DatasetError, DatasetResult};
use crate::models::CountryRecord;

static COUNTRY_RECORD_SCHEMA: Lazy<Validator> =
    Lazy::new(|| compile_schema(include_str!("../../schemas/country-record.json")));

static COUNTRY_PREPARED_SCHEMA: Lazy<Validator> =
    Lazy::new(|| compile_schema(include_str!("../../schemas/country-prepared.json")));

/// Exactly two regional-indicator symbols (U+1F1E6..U+1F1FF).
static FLAG_EMOJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{1F1E6}-\x{1F1FF}]{2}$").expect("Invalid flag regex"));

fn compile_schema(source: &str) -> Validator {
    let schema: Value = serde_json::from_str(source).expect("Invalid embedded schema");
    jsonschema::draft7::new(&schema).expect("Invalid embedded schema")
}

/// Validate a JSON value against a compiled schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with every error otherwise
fn validate(validator: &Validator, data: &Value) -> Result<(), Vec<String>> {
    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that a record carries a string `name.common`.
pub fn validate_country_record(data: &Value) -> Result<(), Vec<String>> {
    validate(&COUNTRY_RECORD_SCHEMA, data)
}

/// Check that a record is ready for the static maps.
pub fn validate_prepared_country(data: &Value) -> Result<(), Vec<String>> {
    validate(&COUNTRY_PREPARED_SCHEMA, data)
}

/// Run a record check over a whole dataset, failing on the first bad record.
///
/// Records are moved in and handed back unchanged when every check passes.
pub fn check_dataset<F>(
    path: &Path,
    records: Vec<CountryRecord>,
    check: F,
) -> DatasetResult<Vec<CountryRecord>>
where
    F: Fn(&Value) -> Result<(), Vec<String>>,
{
    let invalid = |index: usize, errors: Vec<String>| DatasetError::InvalidRecord {
        path: path.to_path_buf(),
        index,
        errors,
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let value = Value::Object(record);
            check(&value).map_err(|errors| invalid(index, errors))?;
            match value {
                Value::Object(record) => Ok(record),
                other => Err(invalid(index, vec![format!("expected an object, found {}", other)])),
            }
        })
        .collect()
}

/// True when the string is exactly one flag emoji (two regional indicators).
pub fn is_valid_flag_emoji(flag: &str) -> bool {
    FLAG_EMOJI.is_match(flag)
}
