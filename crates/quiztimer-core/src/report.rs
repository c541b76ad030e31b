//! Session reports with JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{AnswerRecord, SessionEnd, SessionOutcome};

/// A saved record of one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Question file the session used.
    pub source: PathBuf,
    /// Number of correct answers.
    pub score: usize,
    /// Number of questions in the quiz.
    pub total: usize,
    /// The configured time limit in seconds.
    pub limit_secs: u64,
    pub end: SessionEnd,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
    pub answers: Vec<AnswerRecord>,
}

impl SessionReport {
    pub fn from_outcome(outcome: &SessionOutcome, source: &Path, limit_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.to_path_buf(),
            score: outcome.score(),
            total: outcome.total,
            limit_secs,
            end: outcome.end,
            elapsed_ms: outcome.elapsed.as_millis() as u64,
            answers: outcome.answers.clone(),
        }
    }

    /// Fraction of all questions answered correctly.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn outcome() -> SessionOutcome {
        SessionOutcome {
            total: 4,
            answers: vec![
                AnswerRecord {
                    number: 1,
                    prompt: "5+5".into(),
                    expected: "10".into(),
                    given: "10".into(),
                    correct: true,
                },
                AnswerRecord {
                    number: 2,
                    prompt: "1+1".into(),
                    expected: "2".into(),
                    given: "11".into(),
                    correct: false,
                },
            ],
            end: SessionEnd::TimedOut,
            elapsed: Duration::from_millis(30_000),
        }
    }

    #[test]
    fn report_from_outcome() {
        let report = SessionReport::from_outcome(&outcome(), Path::new("problems.csv"), 30);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 4);
        assert_eq!(report.elapsed_ms, 30_000);
        assert_eq!(report.end, SessionEnd::TimedOut);
        assert!((report.accuracy() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_quiz_accuracy_is_zero() {
        let empty = SessionOutcome {
            total: 0,
            answers: vec![],
            end: SessionEnd::Completed,
            elapsed: Duration::ZERO,
        };
        let report = SessionReport::from_outcome(&empty, Path::new("empty.csv"), 30);
        assert_eq!(report.accuracy(), 0.0);
    }

    #[test]
    fn end_reason_serializes_snake_case() {
        let report = SessionReport::from_outcome(&outcome(), Path::new("problems.csv"), 30);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"end\":\"timed_out\""));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = SessionReport::from_outcome(&outcome(), Path::new("problems.csv"), 30);
        report.save_json(&path).unwrap();

        let loaded = SessionReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.answers, report.answers);
        assert_eq!(loaded.limit_secs, 30);
    }

    #[test]
    fn load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SessionReport::load_json(&path).is_err());
    }
}
