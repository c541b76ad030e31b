//! The `quiztimer run` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::BufReader;

use quiztimer_core::config::load_config_from;
use quiztimer_core::parser::{self, ParseOptions};
use quiztimer_core::report::SessionReport;
use quiztimer_core::session::{shuffle_questions, AnswerRecord};
use quiztimer_core::{QuizSession, SessionConfig, SessionEnd};

/// Settings for one `run` invocation as given on the command line.
///
/// `None` leaves a setting to the config file and environment.
#[derive(Debug)]
pub struct RunOptions {
    pub csv: Option<PathBuf>,
    pub limit: Option<u64>,
    pub shuffle: Option<bool>,
    pub seed: Option<u64>,
    pub delimiter: Option<char>,
    pub wait_for_start: Option<bool>,
    pub review: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Fold an `--x` / `--no-x` flag pair into an optional override.
pub fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub async fn execute(opts: RunOptions) -> Result<()> {
    let config = load_config_from(opts.config.as_deref())?;

    // Flags win over config and environment
    let csv = opts.csv.unwrap_or(config.csv);
    let limit_secs = opts.limit.unwrap_or(config.limit_secs);
    let seed = opts.seed;
    let shuffle = opts.shuffle.unwrap_or(config.shuffle || seed.is_some());
    let delimiter = opts.delimiter.unwrap_or(config.delimiter);
    let wait_for_start = opts.wait_for_start.unwrap_or(config.wait_for_start);
    let review = opts.review;
    let output = opts.output;

    let options = ParseOptions::with_delimiter(delimiter)?;
    let set = parser::parse_quiz_file(&csv, &options)?;
    if set.is_empty() {
        tracing::warn!("no questions found in {}", csv.display());
    }

    let mut questions = set.questions;
    if shuffle {
        shuffle_questions(&mut questions, seed);
    }

    let session = QuizSession::new(
        questions,
        SessionConfig {
            time_limit: Duration::from_secs(limit_secs),
            wait_for_start,
        },
    );

    let outcome = session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    // The last prompt is still open on this line
    if outcome.end != SessionEnd::Completed {
        println!();
    }
    println!("You scored {} out of {}.", outcome.score(), outcome.total);

    if review && !outcome.answers.is_empty() {
        print_review(&outcome.answers);
    }

    if let Some(path) = output {
        let report = SessionReport::from_outcome(&outcome, &csv, limit_secs);
        report
            .save_json(&path)
            .with_context(|| format!("failed to save session report for {}", csv.display()))?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

pub(crate) fn print_review(answers: &[AnswerRecord]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Expected", "Result"]);

    for a in answers {
        table.add_row(vec![
            Cell::new(a.number),
            Cell::new(&a.prompt),
            Cell::new(&a.given),
            Cell::new(&a.expected),
            Cell::new(if a.correct { "OK" } else { "WRONG" }),
        ]);
    }

    println!("\n{table}");
}
