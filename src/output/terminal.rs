//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::{LinkResult, Outcome, ScanReport, UnavailableInfo};

/// Format a completed scan for human-readable terminal output.
pub fn format_report(report: &ScanReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("history-oracle\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    let attempts = report.calibration.attempts;
    output.push_str(&format!(
        "  Calibration: {} passes per link, {:.0} px blur ({} attempt{})\n",
        report.calibration.reps,
        report.calibration.blur,
        attempts,
        if attempts == 1 { "" } else { "s" }
    ));
    output.push_str(&format!(
        "  Candidates:  {} tested, {} visited\n",
        report.results.len(),
        report.visited_urls().len()
    ));
    output.push('\n');

    for result in report.results.values() {
        output.push_str(&format_link(result));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output.push_str("Note: verdicts compare per-link timing medians against the calibration baseline.\n");

    output
}

fn format_link(result: &LinkResult) -> String {
    let mut line = String::new();
    if result.visited {
        line.push_str(&format!("  {} {}\n", "\u{2713}".green().bold(), result.url.green()));
    } else {
        line.push_str(&format!("  {} {}\n", "\u{2717}".dimmed(), result.url.dimmed()));
    }
    line.push_str(&format!("      test: {}\n", list_times(&result.test_series)));
    line
}

/// Format a terminal failure.
pub fn format_unavailable(info: &UnavailableInfo) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "  {}\n",
        "\u{26A0} Attack doesn't work in your browser".yellow().bold()
    ));
    output.push_str(&format!(
        "    Calibration attempts: {}\n    Reason: {}\n",
        info.attempts, info.reason
    ));
    output
}

/// Format either outcome of a run.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Completed(report) => format_report(report),
        Outcome::Unavailable(info) => format_unavailable(info),
    }
}

/// Render a series the way the results list shows it: whole milliseconds,
/// comma separated.
fn list_times(series: &[f64]) -> String {
    series
        .iter()
        .map(|t| format!("{}", t.round() as i64))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CalibrationSummary;
    use indexmap::IndexMap;

    fn make_report() -> ScanReport {
        let mut results = IndexMap::new();
        results.insert(
            "https://a.example".to_owned(),
            LinkResult {
                url: "https://a.example".to_owned(),
                visited: true,
                test_series: vec![33.4, 39.9, 33.1, 40.2],
                baseline_series: vec![33.3, 33.5, 33.2, 33.4],
            },
        );
        results.insert(
            "https://b.example".to_owned(),
            LinkResult {
                url: "https://b.example".to_owned(),
                visited: false,
                test_series: vec![33.2, 33.6, 33.4, 33.3],
                baseline_series: vec![33.3, 33.5, 33.2, 33.4],
            },
        );
        ScanReport {
            results,
            calibration: CalibrationSummary {
                reps: 2,
                blur: 40.0,
                attempts: 1,
            },
        }
    }

    #[test]
    fn report_lists_every_candidate() {
        let text = format_report(&make_report());
        assert!(text.contains("https://a.example"));
        assert!(text.contains("https://b.example"));
        assert!(text.contains("2 passes per link"));
        assert!(text.contains("2 tested, 1 visited"));
        // Rounded series detail.
        assert!(text.contains("test: 33, 40, 33, 40"));
    }

    #[test]
    fn unavailable_shows_the_terminal_message() {
        let text = format_unavailable(&UnavailableInfo {
            attempts: 4,
            reason: "calibration failed after 4 attempts".to_owned(),
        });
        assert!(text.contains("Attack doesn't work in your browser"));
        assert!(text.contains("4"));
    }
}
