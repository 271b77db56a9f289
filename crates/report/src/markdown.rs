// Copyright 2025 Bench Report Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for benchmark summaries.
//!
//! Produces the same scenario and system tables as the text report, as
//! GitHub-flavored markdown.

use crate::summary::ReportSummary;
use chrono::SecondsFormat;
use std::fmt::Write;

/// File name of the markdown report inside the reports directory.
pub const MARKDOWN_FILE: &str = "report.md";

/// Generate a markdown report from an aggregated summary.
pub fn generate_markdown(summary: &ReportSummary) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = write_markdown(&mut output, summary);
    output
}

fn write_markdown(output: &mut String, summary: &ReportSummary) -> std::fmt::Result {
    writeln!(output, "# Benchmark Comparison Report")?;
    writeln!(output)?;
    writeln!(
        output,
        "Generated: {}",
        summary.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(output)?;

    for table in &summary.scenarios {
        writeln!(output, "## Scenario: {}", escape_cell(&table.scenario))?;
        writeln!(output)?;
        writeln!(output, "| System | Req/sec | Latency Mean | Total Reqs |")?;
        writeln!(output, "|--------|--------:|-------------:|-----------:|")?;
        for row in &table.rows {
            writeln!(
                output,
                "| {} | {:.2} | {} | {} |",
                escape_cell(&row.system),
                row.requests_per_sec,
                escape_cell(&row.latency_mean),
                row.total_requests
            )?;
        }
        writeln!(output)?;
    }

    writeln!(output, "## Summary by System")?;
    writeln!(output)?;
    writeln!(output, "| System | Avg Req/sec | Tests Run |")?;
    writeln!(output, "|--------|------------:|----------:|")?;
    for system in &summary.systems {
        writeln!(
            output,
            "| {} | {:.2} | {} |",
            escape_cell(&system.system),
            system.avg_requests_per_sec,
            system.tests_run
        )?;
    }

    writeln!(output)?;
    writeln!(output, "---")?;
    writeln!(output, "Total results: {}", summary.record_count)?;

    Ok(())
}

/// Escape characters that would break a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
