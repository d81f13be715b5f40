//! Shared output formatting for lint results.

use anyhow::Result;
use fla_lint_core::RunReport;
use std::fmt::Write as _;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(report: &RunReport, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Compact => render_compact(report),
    };
    println!("{rendered}");
    Ok(())
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    for (file, violations) in report.by_file() {
        let _ = writeln!(out, "{file}");
        for v in violations {
            let _ = writeln!(
                out,
                "  {}:{}  \x1b[31merror\x1b[0m  [{}] {}",
                v.location.line, v.location.column, v.rule_id, v.message
            );
        }
        out.push('\n');
    }

    if !report.summary.rule_counts.is_empty() {
        for (rule, count) in &report.summary.rule_counts {
            let _ = writeln!(out, "{rule}: {count}");
        }
        out.push('\n');
    }

    let color = if report.has_errors() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };
    let _ = write!(
        out,
        "{color}Scanned {} files. Found {} errors.\x1b[0m",
        report.summary.scanned_files, report.summary.error_count
    );
    out
}

fn render_compact(report: &RunReport) -> String {
    let mut out = String::new();
    for v in &report.violations {
        let _ = writeln!(out, "{v}");
    }
    let _ = write!(
        out,
        "Scanned {} files. Found {} errors.",
        report.summary.scanned_files, report.summary.error_count
    );
    out
}
