// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width text report.
//!
//! The report has one table per scenario followed by a per-system
//! summary. Lines are joined with `\n` and the text has no trailing
//! newline, so the returned string and the written file are identical.

use crate::error::Result;
use crate::io;
use crate::record::ResultRecord;
use crate::summary::{ReportSummary, ScenarioTable, SystemSummary};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

/// File name of the text report inside the reports directory.
pub const REPORT_FILE: &str = "report.txt";

const REPORT_TITLE: &str = "BENCHMARK COMPARISON REPORT";
const SUMMARY_TITLE: &str = "SUMMARY BY SYSTEM";
const WIDE_RULE: usize = 70;
const SUMMARY_RULE: usize = 40;

/// Render the text report for an already aggregated summary.
pub fn render(summary: &ReportSummary, output_dir: &Path) -> String {
    let heavy = "=".repeat(WIDE_RULE);
    let light = "-".repeat(WIDE_RULE);
    let mut lines = vec![
        heavy.clone(),
        REPORT_TITLE.to_string(),
        heavy.clone(),
        format!(
            "Generated: {}",
            summary
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        format!("Results directory: {}", output_dir.display()),
        String::new(),
    ];

    for table in &summary.scenarios {
        push_scenario_table(&mut lines, table, &light);
    }

    lines.push(heavy.clone());
    lines.push(SUMMARY_TITLE.to_string());
    lines.push(heavy);
    lines.push(format!("{:<12} {:>15} {:>12}", "System", "Avg Req/sec", "Tests Run"));
    lines.push("-".repeat(SUMMARY_RULE));
    lines.extend(summary.systems.iter().map(summary_row));

    lines.join("\n")
}

fn push_scenario_table(lines: &mut Vec<String>, table: &ScenarioTable, rule: &str) {
    lines.push(rule.to_string());
    lines.push(format!("Scenario: {}", table.scenario));
    lines.push(rule.to_string());
    lines.push(format!(
        "{:<12} {:>12} {:>15} {:>12}",
        "System", "Req/sec", "Latency Mean", "Total Reqs"
    ));
    lines.push(rule.to_string());
    for row in &table.rows {
        lines.push(format!(
            "{:<12} {:>12.2} {:>15} {:>12}",
            row.system, row.requests_per_sec, row.latency_mean, row.total_requests
        ));
    }
    lines.push(String::new());
}

fn summary_row(system: &SystemSummary) -> String {
    format!(
        "{:<12} {:>15.2} {:>12}",
        system.system, system.avg_requests_per_sec, system.tests_run
    )
}

/// Aggregate `records`, write `report.txt` into `output_dir`, and return
/// the report text.
///
/// # Errors
///
/// Returns an error if the report file cannot be written.
pub fn generate_text_report(
    records: &[ResultRecord],
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let summary = ReportSummary::from_records(records, generated_at);
    write_text_report(&summary, output_dir)
}

/// Write `report.txt` for an existing summary and return its text.
pub fn write_text_report(summary: &ReportSummary, output_dir: &Path) -> Result<String> {
    let report = render(summary, output_dir);
    io::write_artifact(output_dir.join(REPORT_FILE), &report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::tests::{fixed_time, record};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_layout() {
        let records = vec![
            record("1.json", "nginx", "static", 1000.0),
            record("2.json", "envoy", "static", 2500.5),
        ];
        let summary = ReportSummary::from_records(&records, fixed_time());

        let text = render(&summary, Path::new("/results/reports"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(70));
        assert_eq!(lines[1], "BENCHMARK COMPARISON REPORT");
        assert_eq!(lines[3], "Generated: 2026-01-07T14:30:00Z");
        assert_eq!(lines[4], "Results directory: /results/reports");
        assert_eq!(lines[7], "Scenario: static");
        assert_eq!(
            lines[9],
            "System            Req/sec    Latency Mean   Total Reqs"
        );
        assert_eq!(
            lines[11],
            "envoy             2500.50          1.00ms         1000"
        );
        assert_eq!(
            lines[12],
            "nginx             1000.00          1.00ms         1000"
        );
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_summary_average() {
        let records = vec![
            record("1.json", "nginx", "a", 1000.0),
            record("2.json", "nginx", "b", 2000.0),
        ];
        let summary = ReportSummary::from_records(&records, fixed_time());

        let text = render(&summary, Path::new("out"));

        assert!(text.contains("SUMMARY BY SYSTEM"));
        assert_eq!(
            text.lines().last().unwrap(),
            "nginx                1500.00            2"
        );
    }

    #[test]
    fn test_summary_systems_sorted() {
        let records = vec![
            record("1.json", "zeta", "a", 1.0),
            record("2.json", "alpha", "a", 2.0),
            record("3.json", "mid", "a", 3.0),
        ];
        let summary = ReportSummary::from_records(&records, fixed_time());
        let text = render(&summary, Path::new("out"));

        let tail: Vec<&str> = text
            .lines()
            .rev()
            .take(3)
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(tail, vec!["zeta", "mid", "alpha"]);
    }

    #[test]
    fn test_unknown_scenario_group() {
        let records = vec![record("1.json", "nginx", crate::record::UNKNOWN_LABEL, 5.0)];
        let summary = ReportSummary::from_records(&records, fixed_time());
        assert!(render(&summary, Path::new("out")).contains("Scenario: unknown"));
    }

    #[test]
    fn test_written_file_matches_returned_text() {
        let tmp = TempDir::new().unwrap();
        let records = vec![record("1.json", "nginx", "static", 42.0)];

        let report = generate_text_report(&records, tmp.path(), fixed_time()).unwrap();

        let written = fs::read_to_string(tmp.path().join(REPORT_FILE)).unwrap();
        assert_eq!(report, written);
    }

    #[test]
    fn test_overwrites_existing_report() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(REPORT_FILE), "stale").unwrap();

        let records = vec![record("1.json", "nginx", "static", 42.0)];
        let report = generate_text_report(&records, tmp.path(), fixed_time()).unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join(REPORT_FILE)).unwrap(), report);
    }
}
