//! Console output for organize runs.
//!
//! All user-facing printing goes through [`OutputFormatter`], so the rest of
//! the crate never formats terminal text itself.

use crate::file_organizer::OrganizeReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use std::path::Path;

/// Styled CLI output.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for the move loop.
    ///
    /// The length is set by the organizer once the folder has been listed.
    /// Nothing is drawn when stderr is not a terminal.
    pub fn create_progress_bar() -> ProgressBar {
        let pb = ProgressBar::new(0);
        let template = "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// One `<category>: <count> file(s)` line per category, in first-seen order.
    pub fn summary_lines(report: &OrganizeReport) -> Vec<String> {
        report
            .summary()
            .into_iter()
            .map(|(category, count)| {
                format!(
                    "{}: {} {}",
                    category,
                    count,
                    if count == 1 { "file" } else { "files" }
                )
            })
            .collect()
    }

    /// Prints the per-category summary and where the log went.
    pub fn summary(report: &OrganizeReport, log_file: &Path) {
        if report.is_empty() {
            Self::info("No files found to organize.");
        } else {
            Self::header(if report.dry_run {
                "WOULD ORGANIZE"
            } else {
                "ORGANIZED"
            });
            for line in Self::summary_lines(report) {
                println!("  {}", line);
            }
            println!(
                "  {} {}",
                "Total:".bold(),
                report.total().to_string().green().bold()
            );
        }

        if report.dry_run {
            Self::dry_run_notice("No files were modified.");
        }
        Self::success(&format!("Done. Check {} for details.", log_file.display()));
    }

    /// Renders the report as a JSON document.
    pub fn json_report(report: &OrganizeReport, log_file: &Path) -> Value {
        json!({
            "dry_run": report.dry_run,
            "log_file": log_file.to_string_lossy(),
            "total": report.total(),
            "categories": report.categories.iter().map(|group| {
                json!({
                    "category": group.category,
                    "count": group.moves.len(),
                    "moves": group.moves.iter().map(|record| {
                        json!({
                            "source": record.source.to_string_lossy(),
                            "destination": record.destination.to_string_lossy(),
                        })
                    }).collect::<Vec<_>>(),
                })
            }).collect::<Vec<_>>(),
        })
    }
}
