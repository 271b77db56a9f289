//! Benchmark report generator entry point.

fn main() {
    if let Err(e) = bench_report_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
