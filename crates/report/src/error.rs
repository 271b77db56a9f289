// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for loading results and writing reports.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading results or producing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The results directory could not be enumerated.
    #[error("Failed to read results directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A result file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A result file is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A result file parsed, but its shape is not a result document.
    #[error("Invalid result document {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// A field is present but cannot be coerced to its expected type.
    #[error("Invalid field `{field}` in {path}: {reason}")]
    InvalidField {
        path: PathBuf,
        field: String,
        reason: String,
    },

    /// The given results path is missing or not a directory.
    #[error("Results directory not found: {0}")]
    NotADirectory(PathBuf),

    /// No usable result files were found.
    #[error("No result files found in {0}")]
    NoResults(PathBuf),

    /// The reports directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A report artifact could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A summary could not be serialized.
    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Chart rendering failed.
    #[error("Chart rendering failed for {path}: {reason}")]
    Chart { path: PathBuf, reason: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
