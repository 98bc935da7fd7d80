//! Convert `languages` mappings into arrays of language records.
//!
//! ```text
//! Input                                  Output
//! ┌───────────────────────────────┐      ┌──────────────────────────────────────────┐
//! │ "languages": {                │      │ "languages": [                           │
//! │   "eng": "English",           │  →   │   { "language": "English", ... null },   │
//! │   "fra": "French"             │      │   { "language": "French",  ... null }    │
//! │ }                             │      │ ]                                        │
//! └───────────────────────────────┘      └──────────────────────────────────────────┘
//! ```
//!
//! Language codes are dropped. Entries keep the mapping's order.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{CountryRecord, LanguageEntry};

/// What a conversion pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertSummary {
    /// Records in the dataset
    pub records: usize,
    /// Records whose mapping was converted
    pub converted: usize,
    /// Records with no `languages` field
    pub without_languages: usize,
    /// Records whose `languages` was not a mapping (left as is)
    pub skipped: usize,
}

/// Convert every record's `languages` mapping in place.
pub fn convert_languages(records: &mut [CountryRecord]) -> ConvertSummary {
    let mut summary = ConvertSummary {
        records: records.len(),
        ..Default::default()
    };

    for record in records.iter_mut() {
        let entries = match record.get("languages") {
            None => {
                summary.without_languages += 1;
                continue;
            }
            Some(Value::Object(mapping)) => language_entries(mapping.values()),
            Some(_) => {
                summary.skipped += 1;
                continue;
            }
        };

        // Overwriting an existing key keeps its position in the record.
        record.insert("languages".to_string(), entries);
        summary.converted += 1;
    }

    summary
}

/// Build the array of placeholder entries from the mapping's values.
///
/// Non-string names are rendered as JSON text rather than dropped.
fn language_entries<'a>(names: impl Iterator<Item = &'a Value>) -> Value {
    let entries: Vec<Value> = names
        .map(|name| {
            let language = match name {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            json!(LanguageEntry::placeholder(language))
        })
        .collect();
    Value::Array(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(value: Value) -> Vec<CountryRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_mapping_to_array() {
        let mut records = dataset(json!([{
            "name": { "common": "X" },
            "languages": { "eng": "English", "fra": "French" }
        }]));

        let summary = convert_languages(&mut records);

        assert_eq!(summary.converted, 1);
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([{
                "name": { "common": "X" },
                "languages": [
                    { "language": "English", "percentage": null, "notes": null },
                    { "language": "French", "percentage": null, "notes": null }
                ]
            }])
        );
    }

    #[test]
    fn test_keeps_mapping_order() {
        let mut records = dataset(json!([{
            "languages": { "zul": "Zulu", "afr": "Afrikaans", "eng": "English" }
        }]));

        convert_languages(&mut records);

        let names: Vec<&str> = records[0]["languages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["language"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Zulu", "Afrikaans", "English"]);
    }

    #[test]
    fn test_count_and_order_preserved() {
        let mut records = dataset(json!([
            { "name": { "common": "A" }, "languages": { "a": "Alpha" } },
            { "name": { "common": "B" } },
            { "name": { "common": "C" }, "languages": {} }
        ]));

        let summary = convert_languages(&mut records);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["name"]["common"], "A");
        assert_eq!(records[1]["name"]["common"], "B");
        assert_eq!(records[2]["name"]["common"], "C");
        assert_eq!(records[2]["languages"], json!([]));
        assert_eq!(summary.records, 3);
        assert_eq!(summary.converted, 2);
        assert_eq!(summary.without_languages, 1);
    }

    #[test]
    fn test_record_without_languages_untouched() {
        let original = json!({ "name": { "common": "B" }, "population": 12, "tld": [".b"] });
        let mut records = dataset(json!([original.clone()]));

        convert_languages(&mut records);

        assert_eq!(Value::Object(records[0].clone()), original);
    }

    #[test]
    fn test_languages_field_keeps_position() {
        let mut records = dataset(json!([{
            "cca3": "XXX",
            "languages": { "eng": "English" },
            "population": 1
        }]));

        convert_languages(&mut records);

        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cca3", "languages", "population"]);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut records = dataset(json!([{ "languages": { "eng": "English" } }]));
        convert_languages(&mut records);
        let once = records.clone();

        let summary = convert_languages(&mut records);

        assert_eq!(records, once);
        assert_eq!(summary.converted, 0);
        assert_eq!(summary.skipped, 1);
    }
}
