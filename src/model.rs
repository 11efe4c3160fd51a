//! Domain records shared by the store, the exam session flow and reports
//!
//! Field names serialize in camelCase so documents written by the browser
//! client load unchanged.

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Teacher,
    Student,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub correct_answer_index: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamStatus {
    Open,
    Closed,
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamStatus::Open => f.pad("OPEN"),
            ExamStatus::Closed => f.pad("CLOSED"),
        }
    }
}

/// An exam created by a teacher and joined by room code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub teacher_id: String,
    pub title: String,
    pub room_code: String,
    pub questions: Vec<Question>,
    /// Unix milliseconds
    pub created_at: u64,
    pub status: ExamStatus,
}

impl Exam {
    /// Number of questions, the denominator for every percentage
    pub fn total_questions(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    pub fn is_open(&self) -> bool {
        self.status == ExamStatus::Open
    }
}

/// One student's completed exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    pub student_name: String,
    pub score: u32,
    pub total_questions: u32,
    /// Selected option per question, -1 when unanswered
    pub answers: Vec<i32>,
    /// Unix milliseconds
    pub submitted_at: u64,
}
