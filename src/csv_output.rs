//! CSV export of exam results
//!
//! One row per submission for spreadsheet analysis.

use crate::model::ExamResult;
use crate::stats::percentage;

/// Header row, in column order
pub const CSV_HEADER: &str = "Student Name,Score,Total,Percentage,Submitted At";

/// CSV output formatter for one exam's results
#[derive(Debug)]
pub struct CsvResultsOutput {
    total_questions: u32,
    rows: Vec<CsvResultRow>,
}

/// CSV record for a single submission
#[derive(Debug, Clone)]
pub struct CsvResultRow {
    pub student_name: String,
    pub score: u32,
    /// Unix milliseconds
    pub submitted_at: u64,
}

impl From<&ExamResult> for CsvResultRow {
    fn from(result: &ExamResult) -> Self {
        Self {
            student_name: result.student_name.clone(),
            score: result.score,
            submitted_at: result.submitted_at,
        }
    }
}

impl CsvResultsOutput {
    /// Create a formatter; `total_questions` is the exam's question count
    /// and must be non-zero
    pub fn new(total_questions: u32) -> Self {
        Self {
            total_questions,
            rows: Vec::new(),
        }
    }

    /// Create a formatter pre-filled with stored results
    pub fn from_results(results: &[ExamResult], total_questions: u32) -> Self {
        let mut output = Self::new(total_questions);
        for result in results {
            output.add_row(result.into());
        }
        output
    }

    /// Add a row to the output
    pub fn add_row(&mut self, row: CsvResultRow) {
        self.rows.push(row);
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(&self, row: &CsvResultRow) -> String {
        [
            Self::escape_field(&row.student_name),
            row.score.to_string(),
            self.total_questions.to_string(),
            format!("{:.2}%", percentage(row.score, self.total_questions)),
            row.submitted_at.to_string(),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(CSV_HEADER);
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.format_row(row));
            output.push('\n');
        }

        output
    }
}
