//! Record import/export
//!
//! Writes are all-or-nothing: the JSON is serialized into a temp file in
//! the destination directory and renamed over the target only after a
//! complete write, so a failed export never leaves a partial file.

use super::document::NerdmDocument;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors surfaced when writing or reading a record file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write record: {0}")]
    Io(#[from] std::io::Error),
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `doc` to `path` as pretty-printed UTF-8 JSON
pub fn write_document(doc: &NerdmDocument, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(doc)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;
    Ok(())
}

/// Read a record back from disk
pub fn load_document(path: &Path) -> Result<NerdmDocument, ExportError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nerdm::{build_document, validate, RecordEnvelope};
    use crate::schema::resource_fields;
    use crate::state::FormState;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_document() -> NerdmDocument {
        let fields = resource_fields();
        let mut form = FormState::new(&fields);
        form.set_text("title", "Dataset A");
        form.set_text("description", "A description.");
        form.set_list("keyword", vec!["a".to_string(), "b".to_string()]);
        form.set_text("issued", "2024-03-09");
        let validated = validate(&form, &fields).unwrap();
        build_document(
            validated,
            RecordEnvelope {
                id: "urn:uuid:00000000-0000-0000-0000-000000000002".to_string(),
                author: "tester".to_string(),
                created_on: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
            },
        )
    }

    #[test]
    fn test_round_trip_preserves_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        let doc = sample_document();

        write_document(&doc, &path).unwrap();
        let restored = load_document(&path).unwrap();
        assert_eq!(doc, restored);
    }

    #[test]
    fn test_exported_file_is_exact_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        write_document(&sample_document(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["title"], "Dataset A");
        assert_eq!(value["keyword"], serde_json::json!(["a", "b"]));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_unwritable_path_errors_and_leaves_no_file() {
        let doc = sample_document();
        let path = Path::new("/nonexistent-dir-for-sure/record.json");
        let err = write_document(&doc, path).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_overwrite_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "{\"stale\": true} trailing garbage").unwrap();

        write_document(&sample_document(), &path).unwrap();
        let restored = load_document(&path).unwrap();
        assert_eq!(restored.title, "Dataset A");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_document(&path).unwrap_err(),
            ExportError::Json(_)
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            load_document(&path).unwrap_err(),
            ExportError::Io(_)
        ));
    }
}
