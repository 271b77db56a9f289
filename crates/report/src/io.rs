// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Writing report artifacts to the reports directory.

use crate::config::{OutputFormat, ReportConfig};
use crate::error::{ReportError, Result};
use crate::markdown::{self, MARKDOWN_FILE};
use crate::summary::ReportSummary;
use crate::text;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the JSON summary inside the reports directory.
pub const SUMMARY_JSON_FILE: &str = "summary.json";

/// Create the reports directory if it does not exist.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path`, replacing any existing file.
pub fn write_artifact(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote report artifact");
    Ok(())
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary_json(summary: &ReportSummary, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    write_artifact(path, &json)
}

/// Reports written by [`write_reports`].
#[derive(Debug, Clone)]
pub struct WrittenReports {
    /// Contents of `report.txt`.
    pub text: String,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

/// Write every configured report format into `output_dir`.
///
/// `report.txt` is always written; markdown and JSON follow the
/// configured format selection.
pub fn write_reports(
    summary: &ReportSummary,
    output_dir: &Path,
    config: &ReportConfig,
) -> Result<WrittenReports> {
    ensure_output_dir(output_dir)?;

    let text = text::write_text_report(summary, output_dir)?;
    let mut files = vec![output_dir.join(text::REPORT_FILE)];

    if config.wants(OutputFormat::Markdown) {
        let path = output_dir.join(MARKDOWN_FILE);
        write_artifact(&path, &markdown::generate_markdown(summary))?;
        files.push(path);
    }

    if config.wants(OutputFormat::Json) {
        let path = output_dir.join(SUMMARY_JSON_FILE);
        write_summary_json(summary, &path)?;
        files.push(path);
    }

    Ok(WrittenReports { text, files })
}
