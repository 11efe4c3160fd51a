//! CLI argument parsing for quizstats

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for exam reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "quizstats")]
#[command(version)]
#[command(about = "Exam result statistics and significance testing against random guessing", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Significance config file (TOML)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the significance level (alpha) from the config
    #[arg(long = "alpha", value_name = "ALPHA", global = true)]
    pub significance_level: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Store and exam selection shared by exam-level commands
#[derive(Args, Debug, Clone)]
pub struct ExamArgs {
    /// JSON store file
    #[arg(short = 's', long = "store", value_name = "FILE")]
    pub store: PathBuf,

    /// Exam id
    #[arg(short = 'e', long = "exam", value_name = "ID")]
    pub exam: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show statistics, significance, distribution and leaderboard for an exam
    Stats {
        #[command(flatten)]
        target: ExamArgs,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Export an exam's results as CSV
    Export {
        #[command(flatten)]
        target: ExamArgs,

        /// Write to a file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List a teacher's exams, newest first
    Exams {
        /// JSON store file
        #[arg(short = 's', long = "store", value_name = "FILE")]
        store: PathBuf,

        /// Teacher id
        #[arg(short = 't', long = "teacher", value_name = "ID")]
        teacher: String,
    },

    /// Stop accepting submissions for an exam
    Close {
        #[command(flatten)]
        target: ExamArgs,
    },

    /// Accept submissions for an exam again
    Open {
        #[command(flatten)]
        target: ExamArgs,
    },
}
