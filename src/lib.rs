//! quizstats - Exam result statistics for a classroom quiz platform
//!
//! The core is the statistics engine in [`stats`]: descriptive statistics
//! over percentage scores plus a one-sample t-test against the 50%
//! random-guessing baseline. The other modules supply what a results view
//! needs around it: exam and result records, a repository abstraction,
//! histogram, leaderboard, CSV and JSON output, and the join/grade flow.

pub mod cli;
pub mod csv_output;
pub mod exam_session;
pub mod histogram;
pub mod json_output;
pub mod leaderboard;
pub mod model;
pub mod significance;
pub mod stats;
pub mod store;
