// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Grouping and aggregation shared by every report format.
//!
//! [`ReportSummary`] fixes the row order once: scenarios ascending, rows
//! within a scenario by throughput descending (stable), systems ascending.
//! Renderers only format what it contains.

use crate::record::ResultRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of a per-scenario table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    /// System label.
    pub system: String,
    /// File the row was loaded from.
    pub source_name: String,
    /// Throughput in requests per second.
    pub requests_per_sec: f64,
    /// Mean latency display text.
    pub latency_mean: String,
    /// Total requests completed.
    pub total_requests: u64,
}

impl From<&ResultRecord> for ScenarioRow {
    fn from(record: &ResultRecord) -> Self {
        Self {
            system: record.system.clone(),
            source_name: record.source_name.clone(),
            requests_per_sec: record.metrics.requests_per_sec,
            latency_mean: record.metrics.latency_mean.clone(),
            total_requests: record.metrics.total_requests,
        }
    }
}

/// All results measured under one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioTable {
    /// Scenario label.
    pub scenario: String,
    /// Rows ordered by throughput, highest first.
    pub rows: Vec<ScenarioRow>,
}

/// Per-system throughput average across every scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    /// System label.
    pub system: String,
    /// Sum of throughput over all of the system's records.
    pub total_requests_per_sec: f64,
    /// Number of records contributing to the sum.
    pub tests_run: usize,
    /// `total_requests_per_sec / tests_run`, or 0 with no records.
    pub avg_requests_per_sec: f64,
}

/// Aggregated view of a set of result records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records aggregated.
    pub record_count: usize,
    /// Per-scenario tables, scenarios in ascending order.
    pub scenarios: Vec<ScenarioTable>,
    /// Per-system averages, systems in ascending order.
    pub systems: Vec<SystemSummary>,
}

impl ReportSummary {
    /// Aggregate `records`, stamping the summary with `generated_at`.
    pub fn from_records(records: &[ResultRecord], generated_at: DateTime<Utc>) -> Self {
        let scenarios = group_by_scenario(records)
            .into_iter()
            .map(|(scenario, group)| {
                let mut rows: Vec<ScenarioRow> = group.into_iter().map(ScenarioRow::from).collect();
                rows.sort_by(|a, b| b.requests_per_sec.total_cmp(&a.requests_per_sec));
                ScenarioTable {
                    scenario: scenario.to_string(),
                    rows,
                }
            })
            .collect();

        Self {
            generated_at,
            record_count: records.len(),
            scenarios,
            systems: summarize_systems(records),
        }
    }
}

/// Partition records by scenario. Scenario keys iterate in ascending
/// order; records within a group keep their input order.
pub fn group_by_scenario(records: &[ResultRecord]) -> BTreeMap<&str, Vec<&ResultRecord>> {
    let mut groups: BTreeMap<&str, Vec<&ResultRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.scenario.as_str()).or_default().push(record);
    }
    groups
}

/// Sum and count throughput per system, across all scenarios.
pub fn summarize_systems(records: &[ResultRecord]) -> Vec<SystemSummary> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.system.as_str()).or_insert((0.0, 0));
        entry.0 += record.throughput();
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(system, (total, count))| SystemSummary {
            system: system.to_string(),
            total_requests_per_sec: total,
            tests_run: count,
            avg_requests_per_sec: if count > 0 { total / count as f64 } else { 0.0 },
        })
        .collect()
}
