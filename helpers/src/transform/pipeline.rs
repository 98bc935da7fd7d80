//! File-level entry points: read, transform, write.
//!
//! Each function runs one linear pass and reports through the given
//! [`Logger`]. Failures come back as a typed [`DatasetError`]; the caller
//! decides how to surface them. Output is only written once everything
//! before it has succeeded.
//!
//! # Example
//!
//! ```rust,ignore
//! use langmap_helpers::{run_merge, Logger, MergePaths, RunOptions};
//!
//! let mut logger = Logger::new();
//! let report = run_merge(&MergePaths::default(), &RunOptions::default(), &mut logger)?;
//! println!("{} of {} countries matched", report.matched, report.records);
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::flags::{merge_flags_and_codes, FlagCodeIndex, MergeReport};
use super::languages::{convert_languages, ConvertSummary};
use super::maps::build_static_maps;
use crate::config::{HelperConfig, MergePaths};
use crate::dataset::{load_dataset, save_json, to_json, write_output};
use crate::error::{DatasetError, DatasetResult};
use crate::logs::Logger;
use crate::models::{CountryData, CountryRecord};
use crate::validation::{check_dataset, validate_country_record, validate_prepared_country};

pub const COUNTRY_MAP_FILE: &str = "countryMap.json";
pub const LANGUAGE_MAP_FILE: &str = "languageMap.json";

/// Options shared by the entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Indentation of pretty-printed datasets (0 = compact)
    pub json_indent: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { json_indent: 4 }
    }
}

impl From<&HelperConfig> for RunOptions {
    fn from(config: &HelperConfig) -> Self {
        Self { json_indent: config.json_indent }
    }
}

/// Result of [`run_build_maps`]
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    pub countries: usize,
    pub languages: usize,
    pub country_map: PathBuf,
    pub language_map: PathBuf,
}

/// Convert the `languages` mappings of a dataset file.
pub fn run_convert(
    input: &Path,
    output: &Path,
    options: &RunOptions,
    logger: &mut Logger,
) -> DatasetResult<ConvertSummary> {
    let mut records = load_dataset(input)?;
    let summary = convert_languages(&mut records);

    if summary.skipped > 0 {
        logger.warning(format!(
            "{} records already had a non-mapping 'languages' field (left unchanged)",
            summary.skipped
        ));
    }

    save_json(output, &records, options.json_indent)?;
    logger.info(format!("Conversion successful. Data written to {}", output.display()));

    Ok(summary)
}

/// Merge flags and country codes into the primary dataset and write it out.
pub fn run_merge(
    paths: &MergePaths,
    options: &RunOptions,
    logger: &mut Logger,
) -> DatasetResult<MergeReport> {
    let mut primary = load_keyed_dataset(&paths.countries)?;
    let secondary = load_keyed_dataset(&paths.flags_codes)?;

    let index = FlagCodeIndex::build(&secondary);
    let report = merge_flags_and_codes(&mut primary, &index);

    for warning in &report.warnings {
        logger.warning(warning.to_string());
    }

    let content = to_json(&primary, options.json_indent)?;
    write_output(&paths.output, &content)?;
    logger.success(format!(
        "--- Merge completed --- {}/{} countries matched, written to {}",
        report.matched,
        report.records,
        paths.output.display()
    ));

    Ok(report)
}

/// Build `countryMap.json` and `languageMap.json` from a prepared dataset.
pub fn run_build_maps(input: &Path, out_dir: &Path, logger: &mut Logger) -> DatasetResult<MapSummary> {
    let records = check_dataset(input, load_dataset(input)?, validate_prepared_country)?;
    let countries = to_country_data(input, records)?;

    let maps = build_static_maps(&countries);

    // Serialize both before touching the output directory
    let country_json = to_json(&maps.countries, 0)?;
    let language_json = to_json(&maps.languages, 0)?;

    fs::create_dir_all(out_dir).map_err(|source| DatasetError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let country_path = out_dir.join(COUNTRY_MAP_FILE);
    let language_path = out_dir.join(LANGUAGE_MAP_FILE);
    write_output(&country_path, &country_json)?;
    write_output(&language_path, &language_json)?;

    logger.success(format!(
        "Static data maps ({} countries, {} languages) saved to {}",
        maps.countries.len(),
        maps.languages.len(),
        out_dir.display()
    ));

    Ok(MapSummary {
        countries: maps.countries.len(),
        languages: maps.languages.len(),
        country_map: country_path,
        language_map: language_path,
    })
}

/// Load a dataset whose records must all carry `name.common`.
fn load_keyed_dataset(path: &Path) -> DatasetResult<Vec<CountryRecord>> {
    check_dataset(path, load_dataset(path)?, validate_country_record)
}

fn to_country_data(path: &Path, records: Vec<CountryRecord>) -> DatasetResult<Vec<CountryData>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(serde_json::Value::Object(record)).map_err(|e| {
                DatasetError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    errors: vec![e.to_string()],
                }
            })
        })
        .collect()
}
