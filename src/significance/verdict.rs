// Significance verdict for an exam's t-test against random guessing
//
// Turns a StatsSummary into a labelled verdict plus a human-readable
// report. The threshold comes from SignificanceConfig.

use crate::significance::config::SignificanceConfig;
use crate::stats::{StatsSummary, NULL_HYPOTHESIS_MEAN};
use serde::Serialize;

/// Which side of the baseline the class mean falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    AboveBaseline,
    BelowBaseline,
}

/// Final verdict for one exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SignificanceVerdict {
    /// No submissions yet
    NoData,

    /// Fewer submissions than `min_sample_size`
    InsufficientData { count: usize, required: usize },

    /// p-value below the significance level
    Significant { direction: Direction },

    /// Difference from random guessing not statistically significant
    NotSignificant,
}

impl SignificanceVerdict {
    pub fn is_significant(&self) -> bool {
        matches!(self, SignificanceVerdict::Significant { .. })
    }
}

/// Verdict together with the inputs that produced it
#[derive(Debug, Clone, Serialize)]
pub struct SignificanceAssessment {
    pub verdict: SignificanceVerdict,
    pub summary: StatsSummary,
    pub config: SignificanceConfig,
}

impl SignificanceAssessment {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let s = &self.summary;

        match &self.verdict {
            SignificanceVerdict::NoData => {
                report.push_str("No submissions yet\n");
                return report;
            }
            SignificanceVerdict::InsufficientData { count, required } => {
                report.push_str(&format!(
                    "INSUFFICIENT DATA ({} of {} submissions needed for a t-test)\n\n",
                    count, required
                ));
            }
            SignificanceVerdict::Significant { direction } => {
                let side = match direction {
                    Direction::AboveBaseline => "above",
                    Direction::BelowBaseline => "below",
                };
                report.push_str(&format!(
                    "SIGNIFICANT: class mean is {} random guessing ({}%)\n\n",
                    side, NULL_HYPOTHESIS_MEAN
                ));
            }
            SignificanceVerdict::NotSignificant => {
                report.push_str("NOT SIGNIFICANT: no clear difference from random guessing\n\n");
            }
        }

        report.push_str(&format!("Participants: {}\n", s.count));
        report.push_str(&format!("Average Score: {:.1} / 100\n", s.mean));
        report.push_str(&format!("Standard Deviation: {:.4}\n", s.std_dev));
        report.push_str(&format!("Median Score: {:.2}%\n", s.median));
        report.push_str(&format!("Mode Score: {:.2}%\n", s.mode));
        report.push_str(&format!(
            "Highest: {:.0}%  Lowest: {:.0}%\n",
            s.max, s.min
        ));
        report.push_str(&format!(
            "T-Test (vs {}%): t={:.2}, p-value: {}\n",
            NULL_HYPOTHESIS_MEAN,
            s.t_value,
            format_p_value(s.p_value)
        ));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n",
            self.config.significance_level,
            (1.0 - self.config.significance_level) * 100.0
        ));

        report
    }
}

/// Format a p-value for display, collapsing tiny values
pub fn format_p_value(p_value: f64) -> String {
    if p_value < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{:.4}", p_value)
    }
}

/// Assess whether an exam's results differ from random guessing
///
/// # Example
/// ```
/// use quizstats::significance::{assess_significance, SignificanceConfig};
/// use quizstats::stats::{compute_stats, Submission};
///
/// let subs = [Submission::new(8, 10), Submission::new(10, 10)];
/// let stats = compute_stats(&subs, 10).unwrap();
/// let assessment = assess_significance(&stats, &SignificanceConfig::default());
/// assert!(assessment.verdict.is_significant());
/// ```
pub fn assess_significance(
    summary: &StatsSummary,
    config: &SignificanceConfig,
) -> SignificanceAssessment {
    let verdict = if summary.is_empty() {
        SignificanceVerdict::NoData
    } else if summary.count < config.min_sample_size {
        SignificanceVerdict::InsufficientData {
            count: summary.count,
            required: config.min_sample_size,
        }
    } else if summary.p_value < config.significance_level {
        let direction = if summary.t_value >= 0.0 {
            Direction::AboveBaseline
        } else {
            Direction::BelowBaseline
        };
        SignificanceVerdict::Significant { direction }
    } else {
        SignificanceVerdict::NotSignificant
    };

    SignificanceAssessment {
        verdict,
        summary: *summary,
        config: config.clone(),
    }
}
