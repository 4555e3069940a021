//! Report rendering for scan results.
//!
//! Text mode prints bare paths so the output can be piped; everything
//! decorative goes to stderr.

use crate::core::error::GuardError;
use crate::core::walker::{Finding, ScanSummary};
use colored::Colorize;

pub fn path_line(finding: &Finding) -> String {
    finding.path.display().to_string()
}

pub fn render_json(summary: &ScanSummary) -> Result<String, GuardError> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// One-line human summary for `--verbose`.
pub fn summary_line(summary: &ScanSummary) -> String {
    let flagged = summary.flagged.len();
    let status = if flagged == 0 {
        "clean".green().bold()
    } else {
        format!("{} flagged", flagged).red().bold()
    };
    let mut line = format!(
        "{} {}: {} candidate file(s)",
        status,
        summary.root.display(),
        summary.candidates
    );
    if summary.skipped > 0 {
        line.push_str(&format!(", {} unreadable", summary.skipped).yellow().to_string());
    }
    line
}
