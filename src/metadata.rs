/// Metadata retrieval and normalization.
///
/// This module is the heart of the application: it shells out to `exiftool`
/// for structured (JSON) metadata, strips fields that only repeat the path
/// the user already typed, and converts every failure into a displayable
/// error record so the GUI never has to handle an extraction error itself.
use serde_json::{Map, Value};
use std::process::Command;
use thiserror::Error;

/// One metadata record: an ordered mapping of namespaced field names
/// (e.g. `"EXIF:Make"`) to values. A single file can yield several records
/// when exiftool reports composite streams.
pub type MetadataRecord = Map<String, Value>;

/// Fields that only restate the input path, removed from every record.
pub const NOISE_FIELDS: &[&str] = &["SourceFile", "File:Directory", "File:FileName"];

/// Failures specific to running the external extractor. Anything else
/// (a bug in this program) is allowed to propagate normally.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to run {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Tool(String),
    #[error("unreadable extractor output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Handle on the external extraction tool.
#[derive(Debug, Clone)]
pub struct Extractor {
    tool: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor {
            tool: "exiftool".to_string(),
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Extractor::default()
    }

    /// Use a different executable in place of `exiftool`. Used by tests.
    pub fn with_tool(tool: impl Into<String>) -> Self {
        Extractor { tool: tool.into() }
    }

    /// Run the extractor on `path` and parse its JSON output.
    ///
    /// `-G` prefixes every field with its group name (`File:FileName`),
    /// `-j` requests JSON. One synchronous call, no retries, no timeout.
    pub fn extract(&self, path: &str) -> Result<Vec<MetadataRecord>, ExtractError> {
        tracing::debug!("running {} on {:?}", self.tool, path);

        let output = Command::new(&self.tool)
            .arg("-G")
            .arg("-j")
            .arg(path)
            .output()
            .map_err(|source| ExtractError::Launch {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.tool, output.status)
            } else {
                stderr
            };
            return Err(ExtractError::Tool(message));
        }

        let records: Vec<MetadataRecord> = serde_json::from_slice(&output.stdout)?;
        Ok(records)
    }

    /// Extract metadata for `path`, with noise fields removed.
    ///
    /// Never fails: any extraction error comes back as a single record
    /// with one `"error"` key, so the caller always has something to show.
    pub fn retrieve(&self, path: &str) -> Vec<MetadataRecord> {
        match self.extract(path) {
            Ok(mut records) => {
                for record in &mut records {
                    strip_noise_fields(record);
                }
                records
            }
            Err(e) => {
                tracing::warn!("extraction failed for {:?}: {}", path, e);
                vec![error_record(e.to_string())]
            }
        }
    }
}

/// Remove the path-echoing fields from a record. Absent keys are fine.
/// `shift_remove` keeps the remaining fields in extractor order, where a
/// plain `remove` would swap the last entry into the freed slot.
pub fn strip_noise_fields(record: &mut MetadataRecord) {
    for field in NOISE_FIELDS {
        record.shift_remove(*field);
    }
}

fn error_record(message: String) -> MetadataRecord {
    let mut record = MetadataRecord::new();
    record.insert("error".to_string(), Value::String(message));
    record
}

/// Render a value the way it appears on screen: strings without quotes,
/// everything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Plain-text rendering of a result, one `key: value` line per field,
/// record order then field order. This is what the Copy button puts on
/// the clipboard.
pub fn to_plain_text(records: &[MetadataRecord]) -> String {
    let mut out = String::new();
    for record in records {
        for (key, value) in record {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value_text(value));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MetadataRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_strip_noise_fields() {
        let mut rec = record(json!({
            "SourceFile": "/a/b.jpg",
            "File:Directory": "/a",
            "File:FileName": "b.jpg",
            "EXIF:Make": "Canon"
        }));
        strip_noise_fields(&mut rec);

        assert_eq!(rec.len(), 1);
        assert_eq!(rec["EXIF:Make"], json!("Canon"));
    }

    #[test]
    fn test_strip_noise_fields_preserves_order() {
        let mut rec = record(json!({
            "File:FileSize": "12 kB",
            "SourceFile": "/a/b.jpg",
            "EXIF:Make": "Canon",
            "EXIF:Model": "EOS R5"
        }));
        strip_noise_fields(&mut rec);

        let keys: Vec<&str> = rec.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["File:FileSize", "EXIF:Make", "EXIF:Model"]);
    }

    #[test]
    fn test_strip_noise_fields_absent_keys_ok() {
        let mut rec = record(json!({"EXIF:Make": "Canon"}));
        strip_noise_fields(&mut rec);
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn test_retrieve_missing_tool_returns_error_record() {
        let extractor = Extractor::with_tool("definitely-not-a-real-extractor");
        let result = extractor.retrieve("/some/file.jpg");

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 1);
        assert!(result[0].contains_key("error"));
    }

    #[test]
    fn test_retrieve_is_idempotent() {
        let extractor = Extractor::with_tool("definitely-not-a-real-extractor");
        let first = extractor.retrieve("/some/file.jpg");
        let second = extractor.retrieve("/some/file.jpg");
        assert_eq!(first, second);
    }

    #[test]
    fn test_retrieve_empty_path_is_well_formed() {
        // Works whether or not exiftool is installed: either the spawn
        // fails or the tool rejects the empty path, both become an
        // error record.
        let extractor = Extractor::new();
        let result = extractor.retrieve("");

        assert_eq!(result.len(), 1);
        assert!(result[0].contains_key("error"));
    }

    #[test]
    fn test_to_plain_text() {
        let records = vec![
            record(json!({"EXIF:Make": "Canon", "EXIF:ISO": 100})),
            record(json!({"XMP:Rating": 5})),
        ];
        assert_eq!(
            to_plain_text(&records),
            "EXIF:Make: Canon\nEXIF:ISO: 100\nXMP:Rating: 5\n"
        );
    }

    #[test]
    fn test_value_text_unquotes_strings() {
        assert_eq!(value_text(&json!("Canon")), "Canon");
        assert_eq!(value_text(&json!(100)), "100");
        assert_eq!(value_text(&json!({"n": 1})), "{\"n\":1}");
    }

    #[cfg(unix)]
    #[test]
    fn test_retrieve_with_fake_extractor() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        // A stand-in extractor that prints two records, one of them
        // carrying every noise field.
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-exiftool");
        let mut f = std::fs::File::create(&script).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();
        writeln!(
            f,
            "echo '[{{\"SourceFile\":\"/a/b.jpg\",\"File:Directory\":\"/a\",\
             \"File:FileName\":\"b.jpg\",\"EXIF:Make\":\"Canon\",\
             \"EXIF:Model\":\"EOS R5\",\"EXIF:ISO\":100}},\
             {{\"QuickTime:Duration\":\"10 s\"}}]'"
        )
        .unwrap();
        drop(f);
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let extractor = Extractor::with_tool(script.to_string_lossy().to_string());
        let result = extractor.retrieve("/a/b.jpg");

        assert_eq!(result.len(), 2);
        // Surviving fields keep the extractor's order even though the
        // stripped SourceFile came first.
        let keys: Vec<&str> = result[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["EXIF:Make", "EXIF:Model", "EXIF:ISO"]);
        assert_eq!(result[0]["EXIF:Make"], serde_json::json!("Canon"));
        assert_eq!(result[1]["QuickTime:Duration"], serde_json::json!("10 s"));
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_nonzero_exit_uses_stderr() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("failing-exiftool");
        let mut f = std::fs::File::create(&script).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();
        writeln!(f, "echo 'File not found' >&2").unwrap();
        writeln!(f, "exit 1").unwrap();
        drop(f);
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let extractor = Extractor::with_tool(script.to_string_lossy().to_string());
        match extractor.extract("/missing.jpg") {
            Err(ExtractError::Tool(message)) => assert_eq!(message, "File not found"),
            other => panic!("expected Tool error, got {:?}", other),
        }
    }
}
