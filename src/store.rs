//! Exam and result persistence
//!
//! The statistics engine never touches storage; callers go through
//! [`ExamRepository`]. Two implementations ship: [`MemoryStore`] for tests
//! and embedding, and [`JsonFileStore`], which keeps every record in one
//! JSON document and rewrites it on each change. A change that fails to
//! write is not applied in memory either.

use crate::model::{Exam, ExamResult, ExamStatus, User};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid store document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Exam not found: {0}")]
    ExamNotFound(String),

    #[error("Student {student_id} already submitted exam {exam_id}")]
    DuplicateSubmission { exam_id: String, student_id: String },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// A student's result joined with the exam title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentResult {
    pub result: ExamResult,
    pub exam_title: String,
}

/// Title shown for results whose exam no longer exists
pub const UNKNOWN_EXAM_TITLE: &str = "Unknown Exam";

/// Storage capabilities the rest of the crate depends on
pub trait ExamRepository {
    /// Look up an exam by id
    fn exam(&self, exam_id: &str) -> Result<Option<Exam>>;

    /// Look up an exam by its room code (exact match)
    fn exam_by_room_code(&self, room_code: &str) -> Result<Option<Exam>>;

    /// Exams created by a teacher, newest first
    fn exams_for_teacher(&self, teacher_id: &str) -> Result<Vec<Exam>>;

    /// Submissions for an exam, highest score first
    fn results_for_exam(&self, exam_id: &str) -> Result<Vec<ExamResult>>;

    /// A student's submissions with exam titles, in submission order
    fn results_for_student(&self, student_id: &str) -> Result<Vec<StudentResult>>;

    fn save_exam(&mut self, exam: Exam) -> Result<()>;

    /// Store a submission; a second submission by the same student for the
    /// same exam is rejected
    fn save_result(&mut self, result: ExamResult) -> Result<()>;

    fn set_exam_status(&mut self, exam_id: &str, status: ExamStatus) -> Result<()>;
}

/// Everything the store holds, serialized as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub results: Vec<ExamResult>,
}

impl StoreDocument {
    fn exam(&self, exam_id: &str) -> Option<Exam> {
        self.exams.iter().find(|e| e.id == exam_id).cloned()
    }

    fn exam_by_room_code(&self, room_code: &str) -> Option<Exam> {
        self.exams.iter().find(|e| e.room_code == room_code).cloned()
    }

    fn exams_for_teacher(&self, teacher_id: &str) -> Vec<Exam> {
        let mut exams: Vec<Exam> = self
            .exams
            .iter()
            .filter(|e| e.teacher_id == teacher_id)
            .cloned()
            .collect();
        exams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        exams
    }

    fn results_for_exam(&self, exam_id: &str) -> Vec<ExamResult> {
        let mut results: Vec<ExamResult> = self
            .results
            .iter()
            .filter(|r| r.exam_id == exam_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }

    fn results_for_student(&self, student_id: &str) -> Vec<StudentResult> {
        self.results
            .iter()
            .filter(|r| r.student_id == student_id)
            .map(|r| StudentResult {
                result: r.clone(),
                exam_title: self
                    .exams
                    .iter()
                    .find(|e| e.id == r.exam_id)
                    .map_or_else(|| UNKNOWN_EXAM_TITLE.to_string(), |e| e.title.clone()),
            })
            .collect()
    }

    fn insert_result(&mut self, result: ExamResult) -> Result<()> {
        let duplicate = self
            .results
            .iter()
            .any(|r| r.exam_id == result.exam_id && r.student_id == result.student_id);
        if duplicate {
            return Err(StoreError::DuplicateSubmission {
                exam_id: result.exam_id,
                student_id: result.student_id,
            });
        }
        self.results.push(result);
        Ok(())
    }

    fn set_exam_status(&mut self, exam_id: &str, status: ExamStatus) -> Result<()> {
        let exam = self
            .exams
            .iter_mut()
            .find(|e| e.id == exam_id)
            .ok_or_else(|| StoreError::ExamNotFound(exam_id.to_string()))?;
        exam.status = status;
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: StoreDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: StoreDocument) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &StoreDocument {
        &self.doc
    }
}

impl ExamRepository for MemoryStore {
    fn exam(&self, exam_id: &str) -> Result<Option<Exam>> {
        Ok(self.doc.exam(exam_id))
    }

    fn exam_by_room_code(&self, room_code: &str) -> Result<Option<Exam>> {
        Ok(self.doc.exam_by_room_code(room_code))
    }

    fn exams_for_teacher(&self, teacher_id: &str) -> Result<Vec<Exam>> {
        Ok(self.doc.exams_for_teacher(teacher_id))
    }

    fn results_for_exam(&self, exam_id: &str) -> Result<Vec<ExamResult>> {
        Ok(self.doc.results_for_exam(exam_id))
    }

    fn results_for_student(&self, student_id: &str) -> Result<Vec<StudentResult>> {
        Ok(self.doc.results_for_student(student_id))
    }

    fn save_exam(&mut self, exam: Exam) -> Result<()> {
        self.doc.exams.push(exam);
        Ok(())
    }

    fn save_result(&mut self, result: ExamResult) -> Result<()> {
        self.doc.insert_result(result)
    }

    fn set_exam_status(&mut self, exam_id: &str, status: ExamStatus) -> Result<()> {
        self.doc.set_exam_status(exam_id, status)
    }
}

/// Store backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl JsonFileStore {
    /// Open a store file; a missing file starts an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let doc = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                StoreDocument::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            StoreDocument::default()
        };

        tracing::debug!(
            path = %path.display(),
            exams = doc.exams.len(),
            results = doc.results.len(),
            "opened store"
        );

        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &StoreDocument {
        &self.doc
    }

    /// Write `doc` to disk and adopt it; on failure the store keeps the
    /// last document that was written
    fn commit(&mut self, doc: StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, json)?;
        self.doc = doc;
        Ok(())
    }
}

impl ExamRepository for JsonFileStore {
    fn exam(&self, exam_id: &str) -> Result<Option<Exam>> {
        Ok(self.doc.exam(exam_id))
    }

    fn exam_by_room_code(&self, room_code: &str) -> Result<Option<Exam>> {
        Ok(self.doc.exam_by_room_code(room_code))
    }

    fn exams_for_teacher(&self, teacher_id: &str) -> Result<Vec<Exam>> {
        Ok(self.doc.exams_for_teacher(teacher_id))
    }

    fn results_for_exam(&self, exam_id: &str) -> Result<Vec<ExamResult>> {
        Ok(self.doc.results_for_exam(exam_id))
    }

    fn results_for_student(&self, student_id: &str) -> Result<Vec<StudentResult>> {
        Ok(self.doc.results_for_student(student_id))
    }

    fn save_exam(&mut self, exam: Exam) -> Result<()> {
        let mut doc = self.doc.clone();
        doc.exams.push(exam);
        self.commit(doc)
    }

    fn save_result(&mut self, result: ExamResult) -> Result<()> {
        let mut doc = self.doc.clone();
        doc.insert_result(result)?;
        self.commit(doc)
    }

    fn set_exam_status(&mut self, exam_id: &str, status: ExamStatus) -> Result<()> {
        let mut doc = self.doc.clone();
        doc.set_exam_status(exam_id, status)?;
        self.commit(doc)
    }
}
