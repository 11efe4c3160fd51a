//! Student leaderboard for one exam

use crate::model::ExamResult;
use crate::stats::percentage;
use serde::Serialize;

/// Ranks that get highlighted in the leaderboard
pub const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub student_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub podium: bool,
}

/// Rank results by score, highest first
///
/// Equal scores keep their input order. `total_questions` is the exam's
/// question count and must be non-zero.
pub fn build_leaderboard(results: &[ExamResult], total_questions: u32) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&ExamResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    ranked
        .into_iter()
        .enumerate()
        .map(|(idx, result)| LeaderboardEntry {
            rank: idx + 1,
            student_name: result.student_name.clone(),
            score: result.score,
            total_questions,
            percentage: percentage(result.score, total_questions),
            podium: idx < PODIUM_SIZE,
        })
        .collect()
}
