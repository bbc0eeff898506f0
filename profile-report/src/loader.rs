//! Batch file loading.
//!
//! Every regular file in the directory is one batch: a JSON array of
//! enrichment records. Files are read in file-name order so later batches
//! reliably overwrite earlier ones. Empty files are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use profile_enricher::EnrichmentRecord;

/// Errors that abort a report run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed batch file {path}: {source}")]
    MalformedBatch {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ReportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Batch files in `dir`, sorted by file name.
fn batch_files(dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ReportError::io(dir, e))? {
        let path = entry.map_err(|e| ReportError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-file entry");
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load and concatenate every batch in `dir`.
pub fn load_batches(dir: &Path) -> Result<Vec<EnrichmentRecord>, ReportError> {
    let mut records = Vec::new();
    let mut batches = 0usize;

    for path in batch_files(dir)? {
        let data = fs::read(&path).map_err(|e| ReportError::io(&path, e))?;
        if data.iter().all(u8::is_ascii_whitespace) {
            debug!(path = %path.display(), "Skipping empty batch file");
            continue;
        }

        let batch: Vec<EnrichmentRecord> = serde_json::from_slice(&data)
            .map_err(|source| ReportError::MalformedBatch {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), records = batch.len(), "Loaded batch");

        records.extend(batch);
        batches += 1;
    }

    info!(dir = %dir.display(), batches, records = records.len(), "Batches loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_load_concatenates_in_file_name_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "batch-2.json", r#"[{"name": "c.id"}]"#);
        write(&dir, "batch-1.json", r#"[{"name": "a.id"}, {"name": "b.id"}]"#);

        let records = load_batches(dir.path()).unwrap();

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a.id", "b.id", "c.id"]);
    }

    #[test]
    fn test_skips_empty_files_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(&dir, "empty.json", "");
        write(&dir, "blank.json", "\n");
        write(&dir, "data.json", r#"[{"name": "a.id", "appList": ["https://x"]}]"#);
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner.json"), r#"[{"name": "z.id"}]"#).unwrap();

        let records = load_batches(dir.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].app_list, vec!["https://x"]);
    }

    #[test]
    fn test_null_fields_load_as_defaults() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "batch.json",
            r#"[{"name": "x.id", "numProofs": null, "expired": null, "apps": null},
                {"name": "y.id", "address": null, "validProofs": null, "numProofs": 2}]"#,
        );

        let records = load_batches(dir.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].num_proofs, 0);
        assert!(!records[0].expired);
        assert_eq!(records[1].address, "");
        assert_eq!(records[1].valid_proofs, 0);
        assert_eq!(records[1].num_proofs, 2);
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.json", "[]");
        write(&dir, "bad.json", "{not json");

        let err = load_batches(dir.path()).unwrap_err();

        match err {
            ReportError::MalformedBatch { path, .. } => {
                assert_eq!(path.file_name().unwrap(), "bad.json");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        assert!(matches!(load_batches(&missing), Err(ReportError::Io { .. })));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(load_batches(dir.path()).unwrap().is_empty());
    }
}
