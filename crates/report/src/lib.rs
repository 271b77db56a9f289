//! Benchmark result aggregation and reporting.
//!
//! This crate turns a directory of benchmark result documents (one JSON
//! file per run) into a fixed-width text report and, with the `charts`
//! feature, a set of PNG comparison charts.
//!
//! # Quick Start
//!
//! ```no_run
//! use bench_report::{load_results, ChartRenderer, ReportConfig, ReportSummary};
//! use std::path::Path;
//!
//! let config = ReportConfig::default();
//! let results_dir = Path::new("results/20260107_143000");
//! let outcome = load_results(results_dir, &config)?;
//!
//! let out = config.reports_dir(results_dir);
//! let summary = ReportSummary::from_records(&outcome.records, chrono::Utc::now());
//! let written = bench_report::io::write_reports(&summary, &out, &config)?;
//! println!("{}", written.text);
//!
//! ChartRenderer::new(config.charts).render(&outcome.records, &out)?;
//! # Ok::<(), bench_report::ReportError>(())
//! ```
//!
//! # Modules
//!
//! - [`record`] - The `ResultRecord` type and field coercion
//! - [`loader`] - Directory scanning and parse-and-skip loading
//! - [`summary`] - Grouping, ordering and per-system averages
//! - [`text`] - Fixed-width text report
//! - [`markdown`] - Markdown report generation
//! - [`io`] - Writing report artifacts
//! - [`charts`] - Chart data and rendering

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod charts;
pub mod config;
pub mod error;
pub mod io;
pub mod loader;
pub mod markdown;
pub mod record;
pub mod summary;
pub mod text;

pub use charts::{ChartData, ChartRenderer};
pub use config::{OutputFormat, ReportConfig};
pub use error::{ReportError, Result};
pub use loader::{load_results, LoadOutcome, SkippedFile};
pub use record::{Metrics, ResultRecord};
pub use summary::ReportSummary;
pub use text::generate_text_report;
