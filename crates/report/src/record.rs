// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result record types.
//!
//! A [`ResultRecord`] is one parsed benchmark run. Documents are decoded
//! from loose JSON: labels and metrics may be missing or carry the wrong
//! type, so every field goes through an explicit coercion step that
//! either produces a value or records the default it fell back to.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Label used for a missing `system` or `scenario`.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Latency text used when a document carries none.
pub const LATENCY_NOT_AVAILABLE: &str = "N/A";

/// Keys accepted for the system label, in lookup order.
const SYSTEM_KEYS: &[&str] = &["system", "proxy"];

/// Keys accepted for the nested metrics object, in lookup order.
const METRICS_KEYS: &[&str] = &["metrics", "h2load"];

/// Metrics reported by a single benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Throughput in requests per second.
    pub requests_per_sec: f64,
    /// Mean latency, kept as display text (`"12.5ms"`, `"3.2"`, `"N/A"`).
    pub latency_mean: String,
    /// Total requests completed.
    pub total_requests: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            requests_per_sec: 0.0,
            latency_mean: LATENCY_NOT_AVAILABLE.to_string(),
            total_requests: 0,
        }
    }
}

/// Why a field fell back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    /// The field was absent or null.
    Missing,
    /// The field was present but could not be coerced.
    Invalid,
}

/// A field that was filled with its default value during loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefault {
    /// Dotted field path, e.g. `metrics.requests_per_sec`.
    pub field: String,
    /// Why the default was used.
    pub reason: DefaultReason,
}

/// One parsed benchmark result, tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Name of the originating file.
    pub source_name: String,
    /// Benchmarked subject that produced this result.
    pub system: String,
    /// Scenario the result was measured under.
    pub scenario: String,
    /// Measured metrics.
    pub metrics: Metrics,
    /// Fields that were defaulted while loading.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaults: Vec<FieldDefault>,
}

impl ResultRecord {
    /// Create a record from already-validated parts.
    pub fn new(
        source_name: impl Into<String>,
        system: impl Into<String>,
        scenario: impl Into<String>,
        metrics: Metrics,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            system: system.into(),
            scenario: scenario.into(),
            metrics,
            defaults: Vec::new(),
        }
    }

    /// Throughput used for sorting and averaging.
    pub fn throughput(&self) -> f64 {
        self.metrics.requests_per_sec
    }

    /// Decode a record from a parsed JSON document.
    ///
    /// `path` is only used for diagnostics. In strict mode a field that is
    /// present but not coercible fails the whole document; otherwise it
    /// is defaulted and logged.
    pub fn from_value(path: &Path, value: &Value, strict: bool) -> Result<Self> {
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let doc = value.as_object().ok_or_else(|| ReportError::InvalidDocument {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object, found {}", json_kind(value)),
        })?;

        let mut reader = FieldReader::new(path, strict);

        let system = reader.read(
            "system",
            lookup(doc, SYSTEM_KEYS),
            coerce_label,
            UNKNOWN_LABEL.to_string(),
        )?;
        let scenario = reader.read(
            "scenario",
            doc.get("scenario"),
            coerce_label,
            UNKNOWN_LABEL.to_string(),
        )?;

        let empty = Map::new();
        let metrics_doc = match lookup(doc, METRICS_KEYS) {
            Some(Value::Object(m)) => m,
            None => {
                reader.missing("metrics");
                &empty
            }
            Some(other) => {
                reader.invalid(
                    "metrics",
                    format!("expected an object, found {}", json_kind(other)),
                )?;
                &empty
            }
        };

        let defaults = Metrics::default();
        let metrics = Metrics {
            requests_per_sec: reader.read(
                "metrics.requests_per_sec",
                metrics_doc.get("requests_per_sec"),
                coerce_f64,
                defaults.requests_per_sec,
            )?,
            latency_mean: reader.read(
                "metrics.latency_mean",
                metrics_doc.get("latency_mean"),
                coerce_latency,
                defaults.latency_mean,
            )?,
            total_requests: reader.read(
                "metrics.total_requests",
                metrics_doc.get("total_requests"),
                coerce_count,
                defaults.total_requests,
            )?,
        };

        Ok(Self {
            source_name,
            system,
            scenario,
            metrics,
            defaults: reader.defaults,
        })
    }
}

/// Tracks defaults applied while decoding one document.
struct FieldReader<'a> {
    path: &'a Path,
    strict: bool,
    defaults: Vec<FieldDefault>,
}

impl<'a> FieldReader<'a> {
    fn new(path: &'a Path, strict: bool) -> Self {
        Self {
            path,
            strict,
            defaults: Vec::new(),
        }
    }

    fn read<T>(
        &mut self,
        field: &str,
        value: Option<&Value>,
        coerce: fn(&Value) -> std::result::Result<T, String>,
        default: T,
    ) -> Result<T> {
        match value {
            None | Some(Value::Null) => {
                self.missing(field);
                Ok(default)
            }
            Some(v) => match coerce(v) {
                Ok(parsed) => Ok(parsed),
                Err(reason) => {
                    self.invalid(field, reason)?;
                    Ok(default)
                }
            },
        }
    }

    fn missing(&mut self, field: &str) {
        debug!(file = %self.path.display(), field, "field missing, using default");
        self.defaults.push(FieldDefault {
            field: field.to_string(),
            reason: DefaultReason::Missing,
        });
    }

    fn invalid(&mut self, field: &str, reason: String) -> Result<()> {
        if self.strict {
            return Err(ReportError::InvalidField {
                path: self.path.to_path_buf(),
                field: field.to_string(),
                reason,
            });
        }
        warn!(
            file = %self.path.display(),
            field,
            %reason,
            "invalid field, using default"
        );
        self.defaults.push(FieldDefault {
            field: field.to_string(),
            reason: DefaultReason::Invalid,
        });
        Ok(())
    }
}

fn lookup<'v>(doc: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter().find_map(|k| doc.get(*k).filter(|v| !v.is_null()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn coerce_label(value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected a string, found {}", json_kind(other))),
    }
}

fn coerce_f64(value: &Value) -> std::result::Result<f64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(format!("expected a number, found {value}")),
    }
}

fn coerce_count(value: &Value) -> std::result::Result<u64, String> {
    let whole = |v: f64| (v.is_finite() && v >= 0.0 && v.fract() == 0.0).then_some(v as u64);
    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    };
    parsed.ok_or_else(|| format!("expected a non-negative integer, found {value}"))
}

fn coerce_latency(value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!(
            "expected a string or number, found {}",
            json_kind(other)
        )),
    }
}
