//! Validation report generation and display.
//!
//! - [`ValidationReport`] holds every case
//!   - [`CaseResult`] one filter setting
//!     - [`SignalResult`] one test signal and its metrics

use crate::metrics::ComparisonResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Seconds since the Unix epoch.
    pub timestamp: String,
    pub sample_rate: f64,
    pub cases: BTreeMap<String, CaseResult>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_cases: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub description: String,
    pub kind: String,
    pub passed: bool,
    pub error: Option<String>,
    pub signals: Vec<SignalResult>,
}

impl CaseResult {
    /// A case that never produced output.
    pub fn failed(description: &str, kind: &str, error: String) -> Self {
        Self {
            description: description.to_string(),
            kind: kind.to_string(),
            passed: false,
            error: Some(error),
            signals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub label: String,
    pub passed: bool,
    /// Peak level of the second half of the WDF output.
    pub level_db: f64,
    pub comparison: ComparisonResult,
}

impl ValidationReport {
    pub fn new(cases: BTreeMap<String, CaseResult>, sample_rate: f64) -> Self {
        let total = cases.len();
        let passed = cases.values().filter(|c| c.passed).count();
        let pass_rate = if total > 0 {
            passed as f64 / total as f64
        } else {
            0.0
        };
        Self {
            timestamp: unix_timestamp(),
            sample_rate,
            cases,
            summary: ReportSummary {
                total_cases: total,
                passed,
                failed: total - passed,
                pass_rate,
            },
        }
    }

    pub fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    /// Print human-readable summary to terminal.
    pub fn print_summary(&self) {
        use colored::Colorize;

        println!("\n{}", "═".repeat(60).bold());
        println!("{}", " WDFLADDER VALIDATION REPORT ".bold().on_blue());
        println!("{}", "═".repeat(60).bold());
        println!("Timestamp:   {}", self.timestamp.dimmed());
        println!("Sample rate: {} Hz", self.sample_rate);
        println!();

        for (name, case) in &self.cases {
            let status = if case.passed {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            println!(
                "[{}] {} ({}) - {}",
                status,
                name.bold(),
                case.kind,
                case.description.dimmed()
            );
            if let Some(ref err) = case.error {
                println!("    {} {}", "Error:".red(), err);
            }
            for signal in &case.signals {
                let mark = if signal.passed {
                    "✓".green()
                } else {
                    "✗".red()
                };
                println!(
                    "    {} {} | Level: {:.1}dB | RMS: {:.1}dB | Peak: {:.1}dB",
                    mark,
                    signal.label.dimmed(),
                    signal.level_db,
                    signal.comparison.normalized_rms_error_db,
                    signal.comparison.peak_error_db
                );
            }
        }

        println!("{}", "─".repeat(60));
        let overall = if self.all_passed() {
            "ALL CASES PASSED".green().bold()
        } else {
            format!("{} CASES FAILED", self.summary.failed).red().bold()
        };
        println!(
            "{} | {}/{} passed ({:.1}%)",
            overall,
            self.summary.passed,
            self.summary.total_cases,
            self.summary.pass_rate * 100.0
        );
        println!("{}\n", "═".repeat(60).bold());
    }
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing(label: &str) -> SignalResult {
        SignalResult {
            label: label.to_string(),
            passed: true,
            level_db: -6.0,
            comparison: ComparisonResult {
                normalized_rms_error_db: -200.0,
                peak_error_db: -190.0,
            },
        }
    }

    #[test]
    fn summary_counts_cases() {
        let mut cases = BTreeMap::new();
        cases.insert(
            "a".to_string(),
            CaseResult {
                description: "a".to_string(),
                kind: "butter_lpf3".to_string(),
                passed: true,
                error: None,
                signals: vec![passing("impulse")],
            },
        );
        cases.insert(
            "b".to_string(),
            CaseResult::failed("b", "ideal_rlc_lpf", "bad fc".to_string()),
        );
        let report = ValidationReport::new(cases, 48_000.0);
        assert_eq!(report.summary.total_cases, 2);
        assert_eq!(report.summary.failed, 1);
        assert!((report.summary.pass_rate - 0.5).abs() < 1e-12);
        assert!(!report.all_passed());
    }

    #[test]
    fn json_report_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = ValidationReport::new(BTreeMap::new(), 48_000.0);
        report.save_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: ValidationReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.summary.total_cases, 0);
        assert!(back.all_passed());
    }
}
