//! CLI for the benchmark report generator.
//!
//! Loads every result document in a results directory, writes the text
//! report (plus optional markdown/JSON) into a `reports` subdirectory,
//! and renders comparison charts when chart support is compiled in.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod logging;

use anyhow::{bail, Context};
use bench_report::{
    io, load_results, ChartRenderer, OutputFormat, ReportConfig, ReportError, ReportSummary,
};
use chrono::Utc;
use clap::builder::FalseyValueParser;
use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, warn};

/// Benchmark report generator.
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing benchmark result files (one JSON document per run).
    pub results_dir: Option<PathBuf>,

    /// Write reports here instead of `<RESULTS_DIR>/reports`.
    #[arg(short = 'o', long, env = "BENCH_REPORT_REPORTS_DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Report formats to write in addition to report.txt.
    #[arg(
        short,
        long,
        default_value = "text",
        env = "BENCH_REPORT_FORMAT",
        value_parser = ["text", "markdown", "md", "json", "all"]
    )]
    pub format: String,

    /// Skip result files with invalid metric fields instead of defaulting them.
    #[arg(long, env = "BENCH_REPORT_STRICT", value_parser = FalseyValueParser::new())]
    pub strict: bool,

    /// Do not render charts.
    #[arg(long, env = "BENCH_REPORT_NO_CHARTS", value_parser = FalseyValueParser::new())]
    pub no_charts: bool,

    /// Do not echo the report to stdout.
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the report configuration selected by the arguments.
    pub fn report_config(&self) -> anyhow::Result<ReportConfig> {
        let formats = OutputFormat::parse_selection(&self.format)
            .with_context(|| format!("unknown report format `{}`", self.format))?;

        let mut builder = ReportConfig::builder()
            .strict(self.strict)
            .charts(!self.no_charts)
            .formats(formats);
        if let Some(dir) = &self.reports_dir {
            builder = builder.reports_dir(dir);
        }
        Ok(builder.build())
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Directory the reports were written to.
    pub reports_dir: PathBuf,
    /// Number of records aggregated.
    pub records: usize,
    /// Names of result files that were skipped.
    pub skipped: Vec<String>,
    /// Every artifact written, charts included.
    pub files: Vec<PathBuf>,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the run fails.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = std::io::stdout();
    execute(&cli, &mut stdout.lock())?;
    Ok(())
}

/// Execute one report run, writing progress and the report to `out`.
///
/// # Errors
///
/// Fails when the results directory is missing or not a directory, when
/// no result could be loaded, or when a report file cannot be written.
/// Chart rendering failures are logged and do not fail the run.
pub fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<RunSummary> {
    let Some(results_dir) = cli.results_dir.clone() else {
        writeln!(out, "{}", Cli::command().render_usage())?;
        writeln!(out, "Example: bench-report results/20260107_143000")?;
        bail!("missing results directory argument");
    };

    let config = cli.report_config()?;
    let renderer = ChartRenderer::new(config.charts);
    if config.charts && !ChartRenderer::is_available() {
        warn!("chart support is not compiled in; charts will not be generated (rebuild with --features charts)");
    }

    if !results_dir.is_dir() {
        return Err(ReportError::NotADirectory(results_dir).into());
    }

    writeln!(out, "Loading results from {}...", results_dir.display())?;
    let outcome = load_results(&results_dir, &config)
        .with_context(|| format!("failed to load results from {}", results_dir.display()))?;

    if outcome.is_empty() {
        return Err(ReportError::NoResults(results_dir).into());
    }
    writeln!(out, "Found {} result files", outcome.records.len())?;
    if !outcome.skipped.is_empty() {
        writeln!(out, "Skipped {} unreadable result files", outcome.skipped.len())?;
    }

    let reports_dir = config.reports_dir(&results_dir);

    writeln!(out, "\nGenerating text report...")?;
    let summary = ReportSummary::from_records(&outcome.records, Utc::now());
    let written = io::write_reports(&summary, &reports_dir, &config)
        .with_context(|| format!("failed to write reports to {}", reports_dir.display()))?;
    if !cli.quiet {
        writeln!(out, "{}", written.text)?;
    }

    let mut files = written.files;
    if renderer.is_active() {
        writeln!(out, "\nGenerating charts...")?;
        match renderer.render(&outcome.records, &reports_dir) {
            Ok(charts) => {
                files.extend(charts);
                writeln!(out, "Charts saved to {}", reports_dir.display())?;
            }
            Err(e) => error!("{e}"),
        }
    }

    writeln!(out, "\nReports saved to: {}", reports_dir.display())?;

    Ok(RunSummary {
        reports_dir,
        records: outcome.records.len(),
        skipped: outcome.skipped.into_iter().map(|s| s.file_name).collect(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that read or set `BENCH_REPORT_*` variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["bench-report"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_result(dir: &Path, name: &str, system: &str, scenario: &str, rps: f64) {
        let doc = json!({
            "system": system,
            "scenario": scenario,
            "metrics": { "requests_per_sec": rps, "latency_mean": "1.5ms", "total_requests": 3000 }
        });
        fs::write(dir.join(name), doc.to_string()).unwrap();
    }

    fn run_in(cli: &Cli) -> (anyhow::Result<RunSummary>, String) {
        let mut out = Vec::new();
        let result = execute(cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cli = cli(&["results"]);
        assert_eq!(cli.results_dir, Some(PathBuf::from("results")));
        assert_eq!(cli.format, "text");
        assert!(!cli.strict);

        let config = cli.report_config().unwrap();
        assert!(config.charts);
        assert_eq!(config.formats, vec![OutputFormat::Text]);
    }

    #[test]
    fn test_parse_flags() {
        let cli = cli(&["results", "--strict", "--no-charts", "-f", "all", "-o", "/tmp/out"]);
        let config = cli.report_config().unwrap();

        assert!(config.strict);
        assert!(!config.charts);
        assert_eq!(config.formats.len(), 3);
        assert_eq!(config.reports_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_bool_flags_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("BENCH_REPORT_STRICT", "1");
        std::env::set_var("BENCH_REPORT_NO_CHARTS", "yes");
        let enabled = Cli::try_parse_from(["bench-report", "results"]);

        std::env::set_var("BENCH_REPORT_STRICT", "0");
        std::env::set_var("BENCH_REPORT_NO_CHARTS", "off");
        let disabled = Cli::try_parse_from(["bench-report", "results"]);

        std::env::remove_var("BENCH_REPORT_STRICT");
        std::env::remove_var("BENCH_REPORT_NO_CHARTS");

        let enabled = enabled.unwrap();
        assert!(enabled.strict);
        assert!(enabled.no_charts);

        let disabled = disabled.unwrap();
        assert!(!disabled.strict);
        assert!(!disabled.no_charts);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["bench-report", "results", "-f", "pdf"]).is_err());
    }

    #[test]
    fn test_missing_argument_prints_usage() {
        let (result, output) = run_in(&cli(&[]));

        assert!(result.is_err());
        assert!(output.contains("Usage:"));
    }

    #[test]
    fn test_nonexistent_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let (result, _) = run_in(&cli(&[missing.to_str().unwrap()]));

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_no_results_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "not json").unwrap();
        fs::write(tmp.path().join("benchmark.yaml"), "rounds: 3").unwrap();

        let (result, _) = run_in(&cli(&[tmp.path().to_str().unwrap()]));

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::NoResults(_))
        ));
        assert!(!tmp.path().join("reports").exists());
    }

    #[test]
    fn test_full_run() {
        let tmp = TempDir::new().unwrap();
        write_result(tmp.path(), "nginx-static.json", "nginx", "static-cached", 1000.0);
        write_result(tmp.path(), "nginx-api.json", "nginx", "api-uncached", 2000.0);
        write_result(tmp.path(), "envoy-static.json", "envoy", "static-cached", 1500.0);
        fs::write(tmp.path().join("broken.json"), "{").unwrap();

        let (result, output) = run_in(&cli(&[tmp.path().to_str().unwrap(), "--no-charts"]));
        let summary = result.unwrap();

        assert_eq!(summary.records, 3);
        assert_eq!(summary.skipped, vec!["broken.json".to_string()]);
        assert_eq!(summary.reports_dir, tmp.path().join("reports"));

        let report = fs::read_to_string(summary.reports_dir.join("report.txt")).unwrap();
        assert!(output.contains(&report));
        assert!(output.contains("Found 3 result files"));
        assert!(report.contains("nginx                1500.00            2"));
        assert!(report.contains("envoy                1500.00            1"));
    }

    #[test]
    fn test_quiet_and_extra_formats() {
        let tmp = TempDir::new().unwrap();
        write_result(tmp.path(), "a.json", "nginx", "api", 10.0);

        let (result, output) = run_in(&cli(&[
            tmp.path().to_str().unwrap(),
            "--quiet",
            "--no-charts",
            "--format",
            "all",
        ]));
        let summary = result.unwrap();

        assert!(!output.contains("SUMMARY BY SYSTEM"));
        assert_eq!(summary.files.len(), 3);
        assert!(summary.reports_dir.join("report.md").is_file());
        assert!(summary.reports_dir.join("summary.json").is_file());
    }
}
