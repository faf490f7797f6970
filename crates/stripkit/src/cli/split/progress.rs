//! Progress bar and end-of-run summary.

use indicatif::{ProgressBar, ProgressStyle};
use stripkit_core::ExportReport;

pub fn create_progress_bar(total: u64, hidden: bool) -> ProgressBar {
    if hidden || total == 0 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} strips {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the export.
pub fn print_summary(report: &ExportReport, rejected: usize) {
    let elapsed = report.elapsed_ms as f64 / 1000.0;
    let bytes: u64 = report.strips.iter().map(|s| s.file_size).sum();

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Images:       {:>8}", report.images_exported);
    eprintln!("    Strips:       {:>8}", report.files_written());
    if rejected > 0 {
        eprintln!("    Rejected:     {:>8}", rejected);
    }
    if !report.failures.is_empty() {
        eprintln!("    Failed:       {:>8}", report.failures.len());
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Written:      {:>7.1} MB", bytes as f64 / 1_000_000.0);
    eprintln!("    Duration:     {:>7.1}s", elapsed);
    eprintln!("  ====================================");
    for failure in &report.failures {
        eprintln!("    {}", failure.error);
    }
}
