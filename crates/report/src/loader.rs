// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Loading of result documents from a results directory.
//!
//! The loader never aborts on a single bad file: unreadable or malformed
//! documents are logged and reported in [`LoadOutcome::skipped`].

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::record::ResultRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A result file that was not loaded.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// File name within the results directory.
    pub file_name: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Records loaded from a directory plus the files that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Successfully decoded records, in file-name order.
    pub records: Vec<ResultRecord>,
    /// Files that were candidates but failed to load.
    pub skipped: Vec<SkippedFile>,
}

impl LoadOutcome {
    /// Whether no records were loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load every result document from `dir`.
///
/// Only regular files with the configured extension are considered, and
/// the configured excluded file is always ignored. The directory is not
/// searched recursively.
///
/// # Errors
///
/// Returns [`ReportError::ReadDir`] if the directory itself cannot be
/// enumerated. Per-file failures are not errors.
pub fn load_results(dir: impl AsRef<Path>, config: &ReportConfig) -> Result<LoadOutcome> {
    let dir = dir.as_ref();
    let mut outcome = LoadOutcome::default();

    for path in candidate_files(dir, config)? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match load_record(&path, config.strict) {
            Ok(record) => {
                debug!(file = %file_name, system = %record.system, scenario = %record.scenario, "loaded result");
                outcome.records.push(record);
            }
            Err(e) => {
                warn!("Could not load {}: {}", path.display(), e);
                outcome.skipped.push(SkippedFile {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(outcome)
}

/// Read and decode a single result document.
pub fn load_record(path: &Path, strict: bool) -> Result<ResultRecord> {
    let content = fs::read_to_string(path).map_err(|source| ReportError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    ResultRecord::from_value(path, &value, strict)
}

/// List result files in `dir`, sorted by file name.
fn candidate_files(dir: &Path, config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let read_dir_err = |source: std::io::Error| ReportError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();

        if !path.is_file() {
            continue;
        }
        if path.file_name().map_or(false, |n| n == config.excluded_file.as_str()) {
            continue;
        }
        if path
            .extension()
            .map_or(false, |ext| ext == config.result_extension.as_str())
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn result_doc(system: &str, scenario: &str, rps: f64) -> String {
        json!({
            "system": system,
            "scenario": scenario,
            "metrics": { "requests_per_sec": rps, "latency_mean": "1ms", "total_requests": 1000 }
        })
        .to_string()
    }

    #[test]
    fn test_loads_json_files_in_name_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.json", &result_doc("envoy", "api", 2.0));
        write(tmp.path(), "a.json", &result_doc("nginx", "api", 1.0));
        write(tmp.path(), "notes.txt", "not a result");

        let outcome = load_results(tmp.path(), &ReportConfig::default()).unwrap();

        let names: Vec<_> = outcome.records.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.json", &result_doc("nginx", "api", 1.0));
        write(tmp.path(), "broken.json", "{ not json");

        let outcome = load_results(tmp.path(), &ReportConfig::default()).unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].file_name, "broken.json");
        assert!(outcome.skipped[0].reason.contains("broken.json"));
    }

    #[test]
    fn test_excluded_file_and_subdirectories_ignored() {
        let tmp = TempDir::new().unwrap();
        let config = ReportConfig::builder().excluded_file("config.json").build();
        write(tmp.path(), "config.json", &result_doc("nginx", "api", 1.0));
        fs::create_dir(tmp.path().join("nested.json")).unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        write(&tmp.path().join("sub"), "deep.json", &result_doc("nginx", "api", 1.0));

        let outcome = load_results(tmp.path(), &config).unwrap();

        assert!(outcome.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_strict_mode_skips_invalid_field() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "slow.json",
            &json!({ "system": "nginx", "metrics": { "requests_per_sec": "fast" } }).to_string(),
        );

        let lenient = load_results(tmp.path(), &ReportConfig::default()).unwrap();
        assert_eq!(lenient.records.len(), 1);
        assert_eq!(lenient.records[0].throughput(), 0.0);

        let strict = load_results(tmp.path(), &ReportConfig::builder().strict(true).build()).unwrap();
        assert!(strict.is_empty());
        assert_eq!(strict.skipped[0].file_name, "slow.json");
        assert!(strict.skipped[0].reason.contains("requests_per_sec"));
    }

    #[test]
    fn test_missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        let err = load_results(tmp.path().join("absent"), &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::ReadDir { .. }));
    }
}
