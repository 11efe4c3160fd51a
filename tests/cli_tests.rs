// Command-line integration tests
//
// Each test writes a small JSON store to a temp dir and drives the
// quizstats binary against it.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const STORE: &str = r#"{
  "users": [],
  "exams": [
    {
      "id": "e1",
      "teacherId": "t1",
      "title": "Water Cycle",
      "roomCode": "WAT3R1",
      "questions": [
        {"id": 1, "text": "Q1", "options": ["a", "b"], "correctAnswerIndex": 0},
        {"id": 2, "text": "Q2", "options": ["a", "b"], "correctAnswerIndex": 1},
        {"id": 3, "text": "Q3", "options": ["a", "b"], "correctAnswerIndex": 0},
        {"id": 4, "text": "Q4", "options": ["a", "b"], "correctAnswerIndex": 1},
        {"id": 5, "text": "Q5", "options": ["a", "b"], "correctAnswerIndex": 0},
        {"id": 6, "text": "Q6", "options": ["a", "b"], "correctAnswerIndex": 1},
        {"id": 7, "text": "Q7", "options": ["a", "b"], "correctAnswerIndex": 0},
        {"id": 8, "text": "Q8", "options": ["a", "b"], "correctAnswerIndex": 1},
        {"id": 9, "text": "Q9", "options": ["a", "b"], "correctAnswerIndex": 0},
        {"id": 10, "text": "Q10", "options": ["a", "b"], "correctAnswerIndex": 1}
      ],
      "createdAt": 1700000000000,
      "status": "OPEN"
    },
    {
      "id": "e2",
      "teacherId": "t1",
      "title": "Empty Quiz",
      "roomCode": "EMPTY2",
      "questions": [
        {"id": 1, "text": "Q1", "options": ["a", "b"], "correctAnswerIndex": 0}
      ],
      "createdAt": 1700000500000,
      "status": "CLOSED"
    }
  ],
  "results": [
    {
      "id": "r1", "examId": "e1", "studentId": "s1", "studentName": "Ada",
      "score": 8, "totalQuestions": 10, "answers": [], "submittedAt": 1700000100000
    },
    {
      "id": "r2", "examId": "e1", "studentId": "s2", "studentName": "Lovelace, Grace",
      "score": 10, "totalQuestions": 10, "answers": [], "submittedAt": 1700000200000
    }
  ]
}"#;

fn write_store(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("store.json");
    fs::write(&path, STORE).unwrap();
    path
}

#[test]
fn test_stats_text_report() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.arg("stats").arg("-s").arg(&store).arg("-e").arg("e1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Water Cycle Statistics"))
        .stdout(predicate::str::contains("Room Code: WAT3R1"))
        .stdout(predicate::str::contains("Participants: 2"))
        .stdout(predicate::str::contains("Average Score: 90.0 / 100"))
        .stdout(predicate::str::contains("SIGNIFICANT"))
        .stdout(predicate::str::contains("Score Distribution:"))
        .stdout(predicate::str::contains("Student Leaderboard:"));
}

#[test]
fn test_stats_json_report() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    let output = cmd
        .args(["stats", "--format", "json", "-e", "e1", "-s"])
        .arg(&store)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["count"], 2);
    assert_eq!(json["summary"]["mean"], 90.0);
    assert_eq!(json["summary"]["std_dev"], 10.0);
    assert_eq!(json["leaderboard"][0]["student_name"], "Lovelace, Grace");
    assert_eq!(json["histogram"][4]["count"], 2);
}

#[test]
fn test_stats_no_submissions() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["stats", "-e", "e2", "-s"]).arg(&store);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No submissions yet"))
        .stdout(predicate::str::contains("Leaderboard").not());
}

#[test]
fn test_stats_unknown_exam_fails() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["stats", "-e", "nope", "-s"]).arg(&store);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Exam not found: nope"));
}

#[test]
fn test_export_csv_to_file() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);
    let out = tmp.path().join("results.csv");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["export", "-e", "e1", "-s"])
        .arg(&store)
        .arg("-o")
        .arg(&out);
    cmd.assert().success();

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Student Name,Score,Total,Percentage,Submitted At");
    assert_eq!(lines[1], "\"Lovelace, Grace\",10,10,100.00%,1700000200000");
    assert_eq!(lines[2], "Ada,8,10,80.00%,1700000100000");
}

#[test]
fn test_exams_listing_newest_first() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    let output = cmd
        .args(["exams", "-t", "t1", "-s"])
        .arg(&store)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("e2"));
    assert!(lines[1].starts_with("e1"));
    assert!(lines[1].contains("2 submissions"));
}

#[test]
fn test_close_persists_status() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["close", "-e", "e1", "-s"]).arg(&store);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Exam e1 is now CLOSED"));

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(doc["exams"][0]["status"], "CLOSED");
}

#[test]
fn test_invalid_alpha_rejected() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["stats", "-e", "e1", "--alpha", "3", "-s"]).arg(&store);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for --alpha"));
}

#[test]
fn test_config_file_strict_level() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);
    let config = tmp.path().join("quizstats.toml");
    fs::write(&config, "significance_level = 0.01\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["stats", "-e", "e1", "-s"])
        .arg(&store)
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("99% confidence"));
}

#[test]
fn test_status_commands_ignore_significance_options() {
    let tmp = TempDir::new().unwrap();
    let store = write_store(&tmp);
    let missing_config = tmp.path().join("absent.toml");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["close", "-e", "e1", "--alpha", "3", "-s"])
        .arg(&store)
        .arg("--config")
        .arg(&missing_config);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Exam e1 is now CLOSED"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("quizstats");
    cmd.args(["exams", "-t", "t1", "--alpha", "3", "-s"]).arg(&store);
    cmd.assert().success();
}
