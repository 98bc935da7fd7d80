//! Dataset file I/O.
//!
//! A dataset is a UTF-8 JSON array of country objects, loaded wholesale.
//! Output is always serialized in full before the file is opened, so a
//! failed run never leaves a half-written file behind.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

use crate::error::{DatasetError, DatasetResult};
use crate::models::CountryRecord;

/// Load a JSON array of country objects.
pub fn load_dataset(path: &Path) -> DatasetResult<Vec<CountryRecord>> {
    let content = fs::read_to_string(path).map_err(|e| DatasetError::from_read(path, e))?;
    parse_dataset(path, &content)
}

/// Parse dataset text; `path` is only used for error context.
pub fn parse_dataset(path: &Path, content: &str) -> DatasetResult<Vec<CountryRecord>> {
    // Tolerate a UTF-8 byte order mark left by some editors.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    serde_json::from_str(content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize to JSON text. Non-ASCII characters are written literally.
///
/// `indent == 0` produces compact output.
pub fn to_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> DatasetResult<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let indent_str = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent_str.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write already-serialized output.
pub fn write_output(path: &Path, content: &str) -> DatasetResult<()> {
    fs::write(path, content).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize and write a value in one step.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: usize) -> DatasetResult<()> {
    let content = to_json(value, indent)?;
    write_output(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_dataset(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
    }

    #[test]
    fn test_parse_errors() {
        let path = Path::new("countries.json");
        assert!(matches!(parse_dataset(path, "[{"), Err(DatasetError::Parse { .. })));
        // An array of non-objects is not a dataset
        assert!(matches!(parse_dataset(path, "[1, 2]"), Err(DatasetError::Parse { .. })));
        assert!(matches!(parse_dataset(path, "{}"), Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let records = parse_dataset(
            Path::new("countries.json"),
            "\u{feff}[{\"zeta\": 1, \"alpha\": 2, \"name\": {\"common\": \"X\"}}]",
        )
        .unwrap();
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "name"]);
    }

    #[test]
    fn test_to_json_indent_and_unicode() {
        let value = json!([{ "flag": "🇫🇷", "name": "Côte d'Ivoire" }]);

        let pretty = to_json(&value, 4).unwrap();
        assert!(pretty.contains("\n        \"flag\": \"🇫🇷\""));
        assert!(pretty.contains("Côte d'Ivoire"));
        assert!(!pretty.contains("\\u"));

        let compact = to_json(&value, 0).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let value = json!([{ "name": { "common": "X" } }]);

        save_json(&path, &value, 4).unwrap();
        let records = load_dataset(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"]["common"], "X");
    }

    #[test]
    fn test_write_into_missing_dir() {
        let dir = tempdir().unwrap();
        let err = write_output(&dir.path().join("missing/out.json"), "[]").unwrap_err();
        assert!(matches!(err, DatasetError::Write { .. }));
    }
}
