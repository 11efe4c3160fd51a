use anyhow::{Context, Result};
use clap::Parser;
use quizstats::cli::{Cli, Command, ExamArgs, OutputFormat};
use quizstats::csv_output::CsvResultsOutput;
use quizstats::histogram::ScoreHistogram;
use quizstats::json_output::JsonReport;
use quizstats::leaderboard::build_leaderboard;
use quizstats::model::{Exam, ExamResult, ExamStatus};
use quizstats::significance::{assess_significance, SignificanceConfig};
use quizstats::stats::compute_exam_stats;
use quizstats::store::{ExamRepository, JsonFileStore};
use std::fs;
use tracing_subscriber::EnvFilter;

const HISTOGRAM_WIDTH: usize = 40;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the significance config from file and command-line override
fn load_config(args: &Cli) -> Result<SignificanceConfig> {
    let mut config = match &args.config {
        Some(path) => SignificanceConfig::from_file(path)?,
        None => SignificanceConfig::default(),
    };

    if let Some(alpha) = args.significance_level {
        config.significance_level = alpha;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid value for --alpha: {}", e))?;
    }

    Ok(config)
}

/// Load an exam and its results, highest score first
fn load_exam(target: &ExamArgs) -> Result<(JsonFileStore, Exam, Vec<ExamResult>)> {
    let store = JsonFileStore::open(&target.store)
        .with_context(|| format!("Failed to open store {}", target.store.display()))?;
    let exam = store
        .exam(&target.exam)?
        .with_context(|| format!("Exam not found: {}", target.exam))?;
    let results = store.results_for_exam(&exam.id)?;
    Ok((store, exam, results))
}

/// Percentages need a non-zero denominator once there are results
fn ensure_gradable(exam: &Exam, results: &[ExamResult]) -> Result<()> {
    if exam.questions.is_empty() && !results.is_empty() {
        anyhow::bail!(
            "Exam {} has no questions; cannot compute percentages",
            exam.id
        );
    }
    Ok(())
}

/// Print the human-readable statistics view
fn print_text_report(exam: &Exam, results: &[ExamResult], config: &SignificanceConfig) -> Result<()> {
    let total_questions = exam.total_questions();
    let summary = compute_exam_stats(results, total_questions)?;
    let assessment = assess_significance(&summary, config);

    println!("=== {} Statistics ===", exam.title);
    println!("Room Code: {} ({})", exam.room_code, exam.status);
    println!();
    print!("{}", assessment.to_report_string());

    if summary.is_empty() {
        return Ok(());
    }

    println!();
    println!("Score Distribution:");
    println!("─────────────────────────────────────────");
    print!(
        "{}",
        ScoreHistogram::from_results(results, total_questions).to_text(HISTOGRAM_WIDTH)
    );
    println!();

    println!("Student Leaderboard:");
    println!("─────────────────────────────────────────");
    for entry in build_leaderboard(results, total_questions) {
        println!(
            "{}{:>3}. {:<24} {:>3}/{:<3} {:>4.0}%",
            if entry.podium { "*" } else { " " },
            entry.rank,
            entry.student_name,
            entry.score,
            entry.total_questions,
            entry.percentage
        );
    }

    Ok(())
}

fn run_stats(target: &ExamArgs, format: OutputFormat, config: &SignificanceConfig) -> Result<()> {
    let (_, exam, results) = load_exam(target)?;
    ensure_gradable(&exam, &results)?;

    match format {
        OutputFormat::Text => print_text_report(&exam, &results, config)?,
        OutputFormat::Json => {
            let report = JsonReport::build(&exam, &results, config)?;
            println!("{}", report.to_json()?);
        }
        OutputFormat::Csv => {
            let csv = CsvResultsOutput::from_results(&results, exam.total_questions());
            print!("{}", csv.to_csv());
        }
    }

    Ok(())
}

fn run_export(target: &ExamArgs, output: Option<&std::path::Path>) -> Result<()> {
    let (_, exam, results) = load_exam(target)?;
    ensure_gradable(&exam, &results)?;

    let csv = CsvResultsOutput::from_results(&results, exam.total_questions()).to_csv();
    match output {
        Some(path) => {
            fs::write(path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} results to {}", results.len(), path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}

fn run_list_exams(store_path: &std::path::Path, teacher: &str) -> Result<()> {
    let store = JsonFileStore::open(store_path)
        .with_context(|| format!("Failed to open store {}", store_path.display()))?;

    for exam in store.exams_for_teacher(teacher)? {
        let submissions = store.results_for_exam(&exam.id)?.len();
        println!(
            "{}  {}  {:<6}  {:>3} questions  {:>3} submissions  {}",
            exam.id,
            exam.room_code,
            exam.status,
            exam.questions.len(),
            submissions,
            exam.title
        );
    }

    Ok(())
}

fn run_set_status(target: &ExamArgs, status: ExamStatus) -> Result<()> {
    let (mut store, exam, _) = load_exam(target)?;
    store.set_exam_status(&exam.id, status)?;
    eprintln!("Exam {} is now {}", exam.id, status);
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    match &args.command {
        Command::Stats { target, format } => run_stats(target, *format, &load_config(&args)?),
        Command::Export { target, output } => run_export(target, output.as_deref()),
        Command::Exams { store, teacher } => run_list_exams(store, teacher),
        Command::Close { target } => run_set_status(target, ExamStatus::Closed),
        Command::Open { target } => run_set_status(target, ExamStatus::Open),
    }
}
