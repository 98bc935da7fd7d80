//! Merge country codes and flag emoji into the primary country dataset.
//!
//! Records are joined on `name.common`. Matches receive `cca2` and `flag`
//! from the secondary dataset; records without a match are kept as they are.
//! Bad values are copied anyway and reported as [`MergeWarning`]s.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::models::{common_name, CountryRecord, FlagCode};
use crate::validation::is_valid_flag_emoji;

/// A data-quality problem found while merging. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeWarning {
    /// No secondary record has this common name.
    Unmatched { country: String },
    /// The matched flag is not exactly two regional-indicator symbols.
    InvalidFlag {
        country: String,
        flag: Option<serde_json::Value>,
    },
    /// The matched country code is absent or empty.
    MissingCountryCode { country: String },
    /// A later secondary record repeats a common name; the first one is used.
    DuplicateName { country: String, index: usize },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeWarning::Unmatched { country } => {
                write!(f, "No matching entry found for {} in the flags and codes dataset", country)
            }
            MergeWarning::InvalidFlag { country, flag } => match flag {
                Some(serde_json::Value::String(s)) => {
                    write!(f, "Invalid flag emoji for {}: {}", country, s)
                }
                Some(other) => write!(f, "Invalid flag emoji for {}: {}", country, other),
                None => write!(f, "Invalid flag emoji for {}: (missing)", country),
            },
            MergeWarning::MissingCountryCode { country } => {
                write!(f, "Missing cca2 code for {}", country)
            }
            MergeWarning::DuplicateName { country, index } => {
                write!(f, "Duplicate entry for {} at index {} ignored", country, index)
            }
        }
    }
}

/// Lookup of secondary records by common name.
#[derive(Debug, Default)]
pub struct FlagCodeIndex {
    by_name: HashMap<String, FlagCode>,
    duplicates: Vec<MergeWarning>,
}

impl FlagCodeIndex {
    /// Index a secondary dataset. The first record for a name wins.
    ///
    /// Records without a string `name.common` are skipped; datasets are
    /// expected to be checked before indexing.
    pub fn build(records: &[CountryRecord]) -> Self {
        let mut index = Self::default();

        for (i, record) in records.iter().enumerate() {
            let Some(name) = common_name(record) else {
                continue;
            };
            if index.by_name.contains_key(name) {
                index.duplicates.push(MergeWarning::DuplicateName {
                    country: name.to_string(),
                    index: i,
                });
                continue;
            }
            index.by_name.insert(name.to_string(), FlagCode::from_record(record));
        }

        index
    }

    pub fn get(&self, name: &str) -> Option<&FlagCode> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Duplicate names seen while indexing.
    pub fn duplicates(&self) -> &[MergeWarning] {
        &self.duplicates
    }
}

/// Outcome of a merge pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeReport {
    /// Primary records
    pub records: usize,
    /// Records that found a match
    pub matched: usize,
    /// Warnings in the order they were found (duplicates first)
    pub warnings: Vec<MergeWarning>,
}

impl MergeReport {
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().filter_map(|w| match w {
            MergeWarning::Unmatched { country } => Some(country.as_str()),
            _ => None,
        })
    }
}

/// Copy `cca2` and `flag` into every primary record that has a match.
pub fn merge_flags_and_codes(primary: &mut [CountryRecord], index: &FlagCodeIndex) -> MergeReport {
    let mut report = MergeReport {
        records: primary.len(),
        warnings: index.duplicates().to_vec(),
        ..Default::default()
    };

    for record in primary.iter_mut() {
        let Some(name) = common_name(record).map(str::to_string) else {
            continue;
        };

        let Some(code) = index.get(&name) else {
            report.warnings.push(MergeWarning::Unmatched { country: name });
            continue;
        };

        code.apply_to(record);
        report.matched += 1;

        if !code.flag_str().is_some_and(is_valid_flag_emoji) {
            report.warnings.push(MergeWarning::InvalidFlag {
                country: name.clone(),
                flag: code.flag.clone(),
            });
        }
        if code.cca2_is_missing() {
            report.warnings.push(MergeWarning::MissingCountryCode { country: name });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn dataset(value: Value) -> Vec<CountryRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn merge(a: Value, b: Value) -> (Vec<CountryRecord>, MergeReport) {
        let mut primary = dataset(a);
        let index = FlagCodeIndex::build(&dataset(b));
        let report = merge_flags_and_codes(&mut primary, &index);
        (primary, report)
    }

    #[test]
    fn test_matched_record() {
        let (merged, report) = merge(
            json!([{ "name": { "common": "X" } }]),
            json!([{ "name": { "common": "X" }, "cca2": "XX", "flag": "🇽🇽" }]),
        );

        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!([{ "name": { "common": "X" }, "cca2": "XX", "flag": "🇽🇽" }])
        );
        assert_eq!(report.matched, 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unmatched_record_left_alone() {
        let (merged, report) = merge(
            json!([
                { "name": { "common": "France" }, "population": 1 },
                { "name": { "common": "Atlantis" } }
            ]),
            json!([{ "name": { "common": "France" }, "cca2": "FR", "flag": "🇫🇷" }]),
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0]["cca2"], "FR");
        assert!(merged[1].get("cca2").is_none());
        assert!(merged[1].get("flag").is_none());
        assert_eq!(report.unmatched().collect::<Vec<_>>(), vec!["Atlantis"]);
        assert!(report.warnings[0].to_string().contains("Atlantis"));
    }

    #[test]
    fn test_invalid_flag_is_kept() {
        let (merged, report) = merge(
            json!([{ "name": { "common": "Y" } }]),
            json!([{ "name": { "common": "Y" }, "cca2": "YY", "flag": "\u{1F1FE}" }]),
        );

        assert_eq!(merged[0]["flag"], "\u{1F1FE}");
        assert_eq!(
            report.warnings,
            vec![MergeWarning::InvalidFlag {
                country: "Y".into(),
                flag: Some(json!("\u{1F1FE}")),
            }]
        );
        assert!(report.warnings[0].to_string().starts_with("Invalid flag emoji for Y"));
    }

    #[test]
    fn test_absent_fields_written_as_null() {
        let (merged, report) = merge(
            json!([{ "name": { "common": "Z" } }]),
            json!([{ "name": { "common": "Z" } }]),
        );

        assert_eq!(merged[0]["cca2"], Value::Null);
        assert_eq!(merged[0]["flag"], Value::Null);
        assert!(report.warnings.contains(&MergeWarning::InvalidFlag {
            country: "Z".into(),
            flag: None,
        }));
        assert!(report
            .warnings
            .contains(&MergeWarning::MissingCountryCode { country: "Z".into() }));
    }

    #[test]
    fn test_empty_code_reported() {
        let (merged, report) = merge(
            json!([{ "name": { "common": "Kosovo" } }]),
            json!([{ "name": { "common": "Kosovo" }, "cca2": "", "flag": "🇽🇰" }]),
        );

        assert_eq!(merged[0]["cca2"], "");
        assert_eq!(
            report.warnings,
            vec![MergeWarning::MissingCountryCode { country: "Kosovo".into() }]
        );
    }

    #[test]
    fn test_literal_na_is_not_missing() {
        let (merged, report) = merge(
            json!([{ "name": { "common": "Q" } }]),
            json!([{ "name": { "common": "Q" }, "cca2": "N/A", "flag": "🇶🇦" }]),
        );

        assert_eq!(merged[0]["cca2"], "N/A");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let (merged, report) = merge(
            json!([{ "name": { "common": "Congo" } }]),
            json!([
                { "name": { "common": "Congo" }, "cca2": "CG", "flag": "🇨🇬" },
                { "name": { "common": "Congo" }, "cca2": "CD", "flag": "🇨🇩" }
            ]),
        );

        assert_eq!(merged[0]["cca2"], "CG");
        assert_eq!(merged[0]["flag"], "🇨🇬");
        assert_eq!(
            report.warnings,
            vec![MergeWarning::DuplicateName { country: "Congo".into(), index: 1 }]
        );
    }

    #[test]
    fn test_existing_fields_overwritten_in_place() {
        let (merged, _) = merge(
            json!([{ "cca2": "old", "name": { "common": "X" }, "flag": "old" }]),
            json!([{ "name": { "common": "X" }, "cca2": "XX", "flag": "🇽🇽" }]),
        );

        let keys: Vec<&str> = merged[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cca2", "name", "flag"]);
        assert_eq!(merged[0]["cca2"], "XX");
    }

    #[test]
    fn test_order_preserved() {
        let (merged, report) = merge(
            json!([
                { "name": { "common": "C" } },
                { "name": { "common": "A" } },
                { "name": { "common": "B" } }
            ]),
            json!([
                { "name": { "common": "A" }, "cca2": "AA", "flag": "🇦🇦" },
                { "name": { "common": "B" }, "cca2": "BB", "flag": "🇧🇧" },
                { "name": { "common": "C" }, "cca2": "CC", "flag": "🇨🇨" }
            ]),
        );

        let names: Vec<&str> = merged.iter().filter_map(common_name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(report.records, 3);
        assert_eq!(report.matched, 3);
    }

    #[test]
    fn test_warning_serializes_with_kind() {
        let json = serde_json::to_value(MergeWarning::Unmatched { country: "X".into() }).unwrap();
        assert_eq!(json, json!({ "kind": "unmatched", "country": "X" }));
    }
}
