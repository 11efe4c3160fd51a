//! Score distribution histogram
//!
//! Percentages are bucketed into five 20-point bins for display. The bin
//! index is `min(floor(pct / 20), 4)`, so a score of exactly 20% lands in
//! the `21-40%` bin and 100% lands in `81-100%`.

use crate::model::ExamResult;
use crate::stats::percentage;
use serde::Serialize;

/// Display labels, lowest bin first
pub const BIN_LABELS: [&str; 5] = ["0-20%", "21-40%", "41-60%", "61-80%", "81-100%"];

const BIN_WIDTH: f64 = 20.0;

/// A single histogram bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub label: &'static str,
    pub count: usize,
}

/// Five-bin score distribution for one exam
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreHistogram {
    counts: [usize; 5],
}

impl ScoreHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bin index for a percentage score
    pub fn bin_index(pct: f64) -> usize {
        ((pct / BIN_WIDTH).floor() as usize).min(BIN_LABELS.len() - 1)
    }

    /// Record one percentage score
    pub fn record(&mut self, pct: f64) {
        self.counts[Self::bin_index(pct)] += 1;
    }

    /// Build from stored results, normalizing against the exam's question count
    ///
    /// `total_questions` must be non-zero.
    pub fn from_results(results: &[ExamResult], total_questions: u32) -> Self {
        let mut histogram = Self::new();
        for result in results {
            histogram.record(percentage(result.score, total_questions));
        }
        histogram
    }

    /// Total number of recorded scores
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bins in display order
    pub fn bins(&self) -> Vec<HistogramBin> {
        BIN_LABELS
            .iter()
            .zip(self.counts.iter())
            .map(|(&label, &count)| HistogramBin { label, count })
            .collect()
    }

    /// Render as a text bar chart, one line per bin
    pub fn to_text(&self, max_width: usize) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0);
        let mut output = String::new();

        for bin in self.bins() {
            let bar = if peak == 0 {
                0
            } else {
                bin.count * max_width / peak
            };
            output.push_str(&format!(
                "{:>8} | {:<max_width$} {}\n",
                bin.label,
                "#".repeat(bar),
                bin.count
            ));
        }

        output
    }
}
