//! JSON output format for exam reports
//!
//! Everything a results view needs in one document: summary statistics,
//! significance verdict, score distribution and leaderboard.

use crate::histogram::{HistogramBin, ScoreHistogram};
use crate::leaderboard::{build_leaderboard, LeaderboardEntry};
use crate::model::{Exam, ExamResult, ExamStatus};
use crate::significance::{assess_significance, SignificanceConfig, SignificanceVerdict};
use crate::stats::{compute_exam_stats, StatsError, StatsSummary};
use serde::Serialize;

/// Exam identity block
#[derive(Debug, Clone, Serialize)]
pub struct JsonExamInfo {
    pub id: String,
    pub title: String,
    pub room_code: String,
    pub status: ExamStatus,
    pub total_questions: u32,
}

impl From<&Exam> for JsonExamInfo {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id.clone(),
            title: exam.title.clone(),
            room_code: exam.room_code.clone(),
            status: exam.status,
            total_questions: exam.total_questions(),
        }
    }
}

/// Significance block
#[derive(Debug, Clone, Serialize)]
pub struct JsonSignificance {
    pub significance_level: f64,
    #[serde(flatten)]
    pub verdict: SignificanceVerdict,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub exam: JsonExamInfo,
    pub summary: StatsSummary,
    pub significance: JsonSignificance,
    pub histogram: Vec<HistogramBin>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl JsonReport {
    /// Build the report for one exam
    pub fn build(
        exam: &Exam,
        results: &[ExamResult],
        config: &SignificanceConfig,
    ) -> Result<Self, StatsError> {
        let total_questions = exam.total_questions();
        let summary = compute_exam_stats(results, total_questions)?;
        let assessment = assess_significance(&summary, config);

        // An empty exam is already rejected above unless there are no results
        let (histogram, leaderboard) = if results.is_empty() {
            (ScoreHistogram::new().bins(), Vec::new())
        } else {
            (
                ScoreHistogram::from_results(results, total_questions).bins(),
                build_leaderboard(results, total_questions),
            )
        };

        Ok(Self {
            exam: exam.into(),
            summary,
            significance: JsonSignificance {
                significance_level: config.significance_level,
                verdict: assessment.verdict,
            },
            histogram,
            leaderboard,
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn exam(questions: usize) -> Exam {
        Exam {
            id: "e1".to_string(),
            teacher_id: "t1".to_string(),
            title: "Rivers".to_string(),
            room_code: "RIV3RS".to_string(),
            questions: (0..questions)
                .map(|i| Question {
                    id: i as i64,
                    text: format!("Q{}", i),
                    options: vec!["yes".into(), "no".into()],
                    correct_answer_index: 0,
                })
                .collect(),
            created_at: 0,
            status: ExamStatus::Open,
        }
    }

    fn result(student: &str, score: u32) -> ExamResult {
        ExamResult {
            id: format!("r-{}", student),
            exam_id: "e1".to_string(),
            student_id: student.to_string(),
            student_name: student.to_string(),
            score,
            total_questions: 10,
            answers: vec![],
            submitted_at: 0,
        }
    }

    #[test]
    fn test_report_contents() {
        let results = vec![result("a", 8), result("b", 10)];
        let report = JsonReport::build(&exam(10), &results, &SignificanceConfig::default()).unwrap();

        assert_eq!(report.summary.count, 2);
        assert_eq!(report.summary.mean, 90.0);
        assert_eq!(report.histogram[4].count, 2);
        assert_eq!(report.leaderboard[0].student_name, "b");
        assert!(report.significance.verdict.is_significant());
    }

    #[test]
    fn test_report_json_shape() {
        let results = vec![result("a", 8), result("b", 10)];
        let report = JsonReport::build(&exam(10), &results, &SignificanceConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["exam"]["room_code"], "RIV3RS");
        assert_eq!(json["exam"]["status"], "OPEN");
        assert_eq!(json["summary"]["std_dev"], 10.0);
        assert_eq!(json["significance"]["verdict"], "significant");
        assert_eq!(json["significance"]["direction"], "above_baseline");
        assert_eq!(json["histogram"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_report_without_results() {
        let report = JsonReport::build(&exam(0), &[], &SignificanceConfig::default()).unwrap();

        assert_eq!(report.summary, StatsSummary::default());
        assert_eq!(report.significance.verdict, SignificanceVerdict::NoData);
        assert!(report.leaderboard.is_empty());
        assert!(report.histogram.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_report_rejects_exam_without_questions() {
        let results = vec![result("a", 1)];
        let err = JsonReport::build(&exam(0), &results, &SignificanceConfig::default()).unwrap_err();
        assert_eq!(err, StatsError::InvalidQuestionCount);
    }
}
