// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report configuration.
//!
//! All tunables for a single report run live in [`ReportConfig`]. The CLI
//! builds one from its arguments; library users can use the builder.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default extension of result files.
pub const DEFAULT_RESULT_EXTENSION: &str = "json";

/// File that lives next to results but is never a result document.
pub const DEFAULT_EXCLUDED_FILE: &str = "benchmark.yaml";

/// Default name of the output directory created under the results directory.
pub const DEFAULT_REPORTS_SUBDIR: &str = "reports";

/// Output formats written alongside the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Fixed-width text report (`report.txt`).
    Text,
    /// Markdown tables (`report.md`).
    Markdown,
    /// Machine-readable summary (`summary.json`).
    Json,
}

impl OutputFormat {
    /// Parse a format selection. `all` expands to every format.
    pub fn parse_selection(s: &str) -> Option<Vec<OutputFormat>> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(vec![Self::Text]),
            "markdown" | "md" => Some(vec![Self::Text, Self::Markdown]),
            "json" => Some(vec![Self::Text, Self::Json]),
            "all" => Some(vec![Self::Text, Self::Markdown, Self::Json]),
            _ => None,
        }
    }
}

/// Configuration for one report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Extension (without the dot) of files considered result documents.
    pub result_extension: String,
    /// Exact file name that is never loaded.
    pub excluded_file: String,
    /// Subdirectory of the results directory that receives the reports.
    pub reports_subdir: String,
    /// Explicit reports directory, overriding `reports_subdir`.
    pub reports_dir: Option<PathBuf>,
    /// Skip files with invalid fields instead of defaulting them.
    pub strict: bool,
    /// Render charts when the backend is available.
    pub charts: bool,
    /// Output formats. `Text` is always written.
    pub formats: Vec<OutputFormat>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            result_extension: DEFAULT_RESULT_EXTENSION.to_string(),
            excluded_file: DEFAULT_EXCLUDED_FILE.to_string(),
            reports_subdir: DEFAULT_REPORTS_SUBDIR.to_string(),
            reports_dir: None,
            strict: false,
            charts: true,
            formats: vec![OutputFormat::Text],
        }
    }
}

impl ReportConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Resolve the directory that receives report artifacts.
    pub fn reports_dir(&self, results_dir: &Path) -> PathBuf {
        match &self.reports_dir {
            Some(dir) => dir.clone(),
            None => results_dir.join(&self.reports_subdir),
        }
    }

    /// Whether the given output format is selected.
    pub fn wants(&self, format: OutputFormat) -> bool {
        format == OutputFormat::Text || self.formats.contains(&format)
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Set the result file extension.
    pub fn result_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.result_extension = ext.into();
        self
    }

    /// Set the excluded file name.
    pub fn excluded_file(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_file = name.into();
        self
    }

    /// Override the reports directory.
    pub fn reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.reports_dir = Some(dir.into());
        self
    }

    /// Enable or disable strict field validation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Enable or disable chart rendering.
    pub fn charts(mut self, charts: bool) -> Self {
        self.config.charts = charts;
        self
    }

    /// Select output formats.
    pub fn formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.config.formats = formats;
        self
    }

    /// Finish building.
    pub fn build(self) -> ReportConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.result_extension, "json");
        assert_eq!(config.excluded_file, "benchmark.yaml");
        assert!(!config.strict);
        assert!(config.charts);
        assert_eq!(
            config.reports_dir(Path::new("/tmp/results")),
            PathBuf::from("/tmp/results/reports")
        );
    }

    #[test]
    fn test_reports_dir_override() {
        let config = ReportConfig::builder().reports_dir("/out").build();
        assert_eq!(
            config.reports_dir(Path::new("/tmp/results")),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(
            OutputFormat::parse_selection("all").unwrap().len(),
            3
        );
        assert_eq!(
            OutputFormat::parse_selection("MD").unwrap(),
            vec![OutputFormat::Text, OutputFormat::Markdown]
        );
        assert!(OutputFormat::parse_selection("pdf").is_none());
    }

    #[test]
    fn test_text_always_wanted() {
        let config = ReportConfig::builder().formats(vec![]).build();
        assert!(config.wants(OutputFormat::Text));
        assert!(!config.wants(OutputFormat::Json));
    }
}
