//! Exam lifecycle: creation from generated questions, joining by room
//! code, grading and submission

use crate::model::{Exam, ExamResult, ExamStatus, Question};
use crate::store::{ExamRepository, StoreError};
use rand::Rng;
use thiserror::Error;

/// Room codes are this many characters of `[0-9A-Z]`
pub const ROOM_CODE_LEN: usize = 6;

const ROOM_CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source text beyond this many characters is not sent to the generator
pub const MAX_SOURCE_CHARS: usize = 30_000;

const MAX_ROOM_CODE_ATTEMPTS: usize = 32;

/// Marker for an unanswered question
pub const UNANSWERED: i32 = -1;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid room code: {0}")]
    InvalidRoomCode(String),

    #[error("This exam is closed")]
    ExamClosed,

    #[error("You have already submitted this exam")]
    AlreadySubmitted,

    #[error("Generator returned no questions, try different content")]
    NoQuestions,

    #[error("Question generation failed: {0}")]
    Generation(String),

    #[error("Could not allocate a unique room code after {0} attempts")]
    RoomCodeExhausted(usize),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// External service that turns a prompt into question JSON text
pub trait QuestionGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the generator prompt for a block of source text
pub fn build_prompt(content: &str) -> String {
    let truncated: String = content.chars().take(MAX_SOURCE_CHARS).collect();
    format!(
        "You are an expert teacher. Create a multiple-choice quiz based on the text content provided below.\n\
         Generate at least 5 questions.\n\n\
         Content:\n{}\n\n\
         The output must be a valid JSON array of objects.\n",
        truncated
    )
}

/// Parse generator output into questions
///
/// Markdown code fences are stripped first. Unparsable output yields an
/// empty list.
pub fn parse_generated_questions(text: &str) -> Vec<Question> {
    let cleaned = text.replace("```json", "").replace("```", "");
    match serde_json::from_str::<Vec<Question>>(cleaned.trim()) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::warn!("Failed to parse generated questions: {}", e);
            Vec::new()
        }
    }
}

/// Ask the generator for questions about `content`
pub fn generate_questions<G: QuestionGenerator + ?Sized>(
    generator: &G,
    content: &str,
) -> Result<Vec<Question>> {
    let text = generator.generate(&build_prompt(content))?;
    let questions = parse_generated_questions(&text);
    if questions.is_empty() {
        return Err(SessionError::NoQuestions);
    }
    Ok(questions)
}

/// Random room code of [`ROOM_CODE_LEN`] characters from `[0-9A-Z]`
pub fn generate_room_code<R: Rng>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Room code not used by any stored exam
pub fn unique_room_code<S, R>(store: &S, rng: &mut R) -> Result<String>
where
    S: ExamRepository + ?Sized,
    R: Rng,
{
    for _ in 0..MAX_ROOM_CODE_ATTEMPTS {
        let code = generate_room_code(rng);
        if store.exam_by_room_code(&code)?.is_none() {
            return Ok(code);
        }
        tracing::debug!(%code, "room code collision, retrying");
    }
    Err(SessionError::RoomCodeExhausted(MAX_ROOM_CODE_ATTEMPTS))
}

/// Fields a teacher supplies for a new exam
#[derive(Debug, Clone)]
pub struct NewExam {
    pub id: String,
    pub teacher_id: String,
    pub title: String,
    pub questions: Vec<Question>,
    /// Unix milliseconds
    pub created_at: u64,
}

/// Create and store an open exam with a fresh room code
pub fn create_exam<S, R>(store: &mut S, rng: &mut R, new: NewExam) -> Result<Exam>
where
    S: ExamRepository + ?Sized,
    R: Rng,
{
    if new.questions.is_empty() {
        return Err(SessionError::NoQuestions);
    }

    let exam = Exam {
        id: new.id,
        teacher_id: new.teacher_id,
        title: new.title,
        room_code: unique_room_code(&*store, rng)?,
        questions: new.questions,
        created_at: new.created_at,
        status: ExamStatus::Open,
    };
    store.save_exam(exam.clone())?;

    tracing::debug!(exam_id = %exam.id, room_code = %exam.room_code, "created exam");
    Ok(exam)
}

/// Resolve a room code to an exam a student may take
///
/// The code is matched case-insensitively.
pub fn join_exam<S: ExamRepository + ?Sized>(
    store: &S,
    room_code: &str,
    student_id: &str,
) -> Result<Exam> {
    let code = room_code.trim().to_uppercase();
    let exam = store
        .exam_by_room_code(&code)?
        .ok_or(SessionError::InvalidRoomCode(code))?;

    if !exam.is_open() {
        return Err(SessionError::ExamClosed);
    }

    let already_taken = store
        .results_for_student(student_id)?
        .iter()
        .any(|h| h.result.exam_id == exam.id);
    if already_taken {
        return Err(SessionError::AlreadySubmitted);
    }

    Ok(exam)
}

/// Count answers matching the correct option, question by question
pub fn grade_answers(exam: &Exam, answers: &[i32]) -> u32 {
    let correct = exam
        .questions
        .iter()
        .zip(answers)
        .filter(|(q, &a)| a != UNANSWERED && a == q.correct_answer_index)
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

/// A student's finished attempt
#[derive(Debug, Clone)]
pub struct Attempt {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub answers: Vec<i32>,
    /// Unix milliseconds
    pub submitted_at: u64,
}

/// Grade an attempt and store the result
pub fn submit_attempt<S: ExamRepository + ?Sized>(
    store: &mut S,
    exam: &Exam,
    attempt: Attempt,
) -> Result<ExamResult> {
    let result = ExamResult {
        id: attempt.id,
        exam_id: exam.id.clone(),
        student_id: attempt.student_id,
        student_name: attempt.student_name,
        score: grade_answers(exam, &attempt.answers),
        total_questions: exam.total_questions(),
        answers: attempt.answers,
        submitted_at: attempt.submitted_at,
    };

    store.save_result(result.clone()).map_err(|e| match e {
        StoreError::DuplicateSubmission { .. } => SessionError::AlreadySubmitted,
        other => SessionError::Store(other),
    })?;

    Ok(result)
}
