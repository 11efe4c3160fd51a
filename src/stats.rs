//! Exam statistics engine
//!
//! Computes descriptive statistics over percentage scores and a one-sample
//! t-test against the random-guessing baseline (50%).
//!
//! All statistics operate on scores normalized to 0-100, never on raw
//! scores, so exams with different question counts are comparable.

use crate::model::ExamResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean percentage under the null hypothesis (random guessing)
pub const NULL_HYPOTHESIS_MEAN: f64 = 50.0;

/// Errors raised by the statistics engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Invalid question count: exam must have at least one question")]
    InvalidQuestionCount,
}

/// One student's submission as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Number of correct answers
    pub score: u32,
    /// Number of questions in the exam when it was taken
    pub total_questions: u32,
}

impl Submission {
    pub fn new(score: u32, total_questions: u32) -> Self {
        Self {
            score,
            total_questions,
        }
    }
}

impl From<&ExamResult> for Submission {
    fn from(result: &ExamResult) -> Self {
        Self {
            score: result.score,
            total_questions: result.total_questions,
        }
    }
}

/// Aggregate statistics for one exam (all values are percentages except
/// `count`, `t_value` and `p_value`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divisor `count`)
    pub std_dev: f64,
    /// One-sample t statistic against [`NULL_HYPOTHESIS_MEAN`]
    pub t_value: f64,
    /// Approximate tail probability for `t_value`
    pub p_value: f64,
}

impl StatsSummary {
    /// True when the summary was computed from zero submissions
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Normalize a raw score to a 0-100 percentage
///
/// `total_questions` must be non-zero.
pub fn percentage(score: u32, total_questions: u32) -> f64 {
    (f64::from(score) / f64::from(total_questions)) * 100.0
}

/// Approximate tail probability for a t statistic
///
/// Abramowitz & Stegun style rational/exponential approximation of the
/// complementary error function, evaluated at `|t|`. This is the large-sample
/// normal approximation: the degrees of freedom are accepted for API
/// symmetry but do not affect the result.
///
/// Coefficients and evaluation order are fixed; changing either changes
/// every reported p-value.
pub fn approx_p_value(t: f64, _degrees_of_freedom: f64) -> f64 {
    let x = t.abs();
    let t_val = 1.0 / (1.0 + 0.5 * x);
    let exponent = -x * x - 1.26551223
        + t_val
            * (1.00002368
                + t_val
                    * (0.37409196
                        + t_val
                            * (0.09678418
                                + t_val
                                    * (-0.18628806
                                        + t_val
                                            * (0.27886807
                                                + t_val
                                                    * (-1.13520398
                                                        + t_val
                                                            * (1.48851587
                                                                + t_val
                                                                    * (-0.82215223
                                                                        + t_val * 0.17087277))))))));
    t_val * exponent.exp()
}

/// Compute statistics for a set of submissions
///
/// # Arguments
/// * `submissions` - Submissions for a single exam, in any order
/// * `total_questions` - Question count of the exam; every score is
///   normalized against this value
///
/// # Returns
/// A zeroed [`StatsSummary`] for empty input, otherwise the full summary.
/// `StatsError::InvalidQuestionCount` when `total_questions` is zero and
/// there is at least one submission.
///
/// # Example
/// ```
/// use quizstats::stats::{compute_stats, Submission};
///
/// let subs = [Submission::new(8, 10), Submission::new(10, 10)];
/// let stats = compute_stats(&subs, 10).unwrap();
/// assert_eq!(stats.mean, 90.0);
/// assert_eq!(stats.std_dev, 10.0);
/// ```
pub fn compute_stats(
    submissions: &[Submission],
    total_questions: u32,
) -> Result<StatsSummary, StatsError> {
    if submissions.is_empty() {
        return Ok(StatsSummary::default());
    }
    if total_questions == 0 {
        return Err(StatsError::InvalidQuestionCount);
    }

    let scores: Vec<f64> = submissions
        .iter()
        .map(|s| percentage(s.score, total_questions))
        .collect();
    let count = scores.len();
    let n = count as f64;

    let sum: f64 = scores.iter().fold(0.0, |acc, s| acc + s);
    let mean = sum / n;

    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let min = sorted[0];
    let max = sorted[count - 1];

    let mid = count / 2;
    let median = if count % 2 != 0 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    };

    let mode = mode_of_sorted(&sorted);

    // Identical scores: the summed mean can be off in the last bit for
    // values like 100/3, which would leave a tiny variance and a huge t.
    let (std_dev, t_value) = if min == max {
        (0.0, 0.0)
    } else {
        let variance = scores
            .iter()
            .fold(0.0, |acc, s| acc + (s - mean).powi(2))
            / n;
        let std_dev = variance.sqrt();

        let std_err = std_dev / n.sqrt();
        let t_value = if std_err == 0.0 {
            0.0
        } else {
            (mean - NULL_HYPOTHESIS_MEAN) / std_err
        };
        (std_dev, t_value)
    };
    let p_value = approx_p_value(t_value, n - 1.0);

    tracing::debug!(
        count,
        mean,
        std_dev,
        t_value,
        p_value,
        "computed exam statistics"
    );

    Ok(StatsSummary {
        count,
        mean,
        median,
        mode,
        min,
        max,
        std_dev,
        t_value,
        p_value,
    })
}

/// Most frequent value of an ascending slice
///
/// Ties go to the first run reached, i.e. the smallest value.
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut mode = sorted[0];
    let mut max_freq = 0usize;
    let mut i = 0;

    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|&&s| s == value).count();
        if run > max_freq {
            max_freq = run;
            mode = value;
        }
        i += run;
    }

    mode
}

/// Compute statistics directly from stored exam results
pub fn compute_exam_stats(
    results: &[ExamResult],
    total_questions: u32,
) -> Result<StatsSummary, StatsError> {
    let submissions: Vec<Submission> = results.iter().map(Submission::from).collect();
    compute_stats(&submissions, total_questions)
}
