//! Timed quiz session.
//!
//! A background task asks each question and reads one line of input per
//! question, sending every answer back over a channel. The session races
//! that channel against a single timer covering the whole quiz: whichever
//! finishes first ends the session.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::QuizError;
use crate::model::{normalize_answer, Question};

/// Shuffle questions in place. A seed makes the order reproducible.
pub fn shuffle_questions(questions: &mut [Question], seed: Option<u64>) {
    match seed {
        Some(seed) => questions.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => questions.shuffle(&mut rand::rng()),
    }
}

/// Configuration for a quiz session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Wall-clock limit for the whole quiz.
    pub time_limit: Duration,
    /// Wait for a line of input before starting the clock.
    pub wait_for_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            wait_for_start: true,
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// Every question was answered.
    Completed,
    /// The time limit expired first.
    TimedOut,
    /// Input ended before the last question.
    InputClosed,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEnd::Completed => write!(f, "completed"),
            SessionEnd::TimedOut => write!(f, "timed out"),
            SessionEnd::InputClosed => write!(f, "input closed"),
        }
    }
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// 1-based position in the session.
    pub number: usize,
    pub prompt: String,
    pub expected: String,
    /// What the user typed, normalized.
    pub given: String,
    pub correct: bool,
}

/// The result of running a session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// Number of questions in the quiz, asked or not.
    pub total: usize,
    /// Answers received before the session ended, in order.
    pub answers: Vec<AnswerRecord>,
    pub end: SessionEnd,
    /// Time from the start of the clock to the end of the session.
    pub elapsed: Duration,
}

impl SessionOutcome {
    /// Number of correct answers.
    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    /// Number of questions never answered.
    pub fn unanswered(&self) -> usize {
        self.total - self.answers.len()
    }
}

/// A quiz session over a fixed list of questions.
pub struct QuizSession {
    questions: Arc<[Question]>,
    config: SessionConfig,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, config: SessionConfig) -> Self {
        Self {
            questions: questions.into(),
            config,
        }
    }

    /// Run the session, prompting on `writer` and reading answers from `reader`.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<SessionOutcome, QuizError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        if self.config.wait_for_start {
            write_prompt(&mut writer, "Press Enter to start quiz\n").await?;
            let mut line = String::new();
            reader.read_line(&mut line).await.map_err(QuizError::Input)?;
        }

        let total = self.questions.len();
        let (tx, mut rx) = mpsc::channel(total.max(1));
        let questions = Arc::clone(&self.questions);
        let asker = tokio::spawn(ask_questions(questions, reader, writer, tx));

        tracing::debug!(
            "starting quiz: {total} questions, {}s limit",
            self.config.time_limit.as_secs()
        );
        let start = Instant::now();
        let mut answers = Vec::with_capacity(total);
        let timed_out = collect_answers(
            &mut rx,
            tokio::time::sleep(self.config.time_limit),
            &mut answers,
        )
        .await;

        let end = if timed_out {
            asker.abort();
            // Cancellation is the expected result once aborted
            let _ = asker.await;
            tracing::info!("time limit reached after {} answers", answers.len());
            SessionEnd::TimedOut
        } else {
            let end = asker
                .await
                .map_err(|e| QuizError::Input(std::io::Error::other(e)))??;
            if end == SessionEnd::InputClosed {
                tracing::info!("input closed after {} of {total} answers", answers.len());
            }
            end
        };

        Ok(SessionOutcome {
            total,
            answers,
            end,
            elapsed: start.elapsed(),
        })
    }
}

/// Collect answers until the channel closes or `deadline` fires, whichever
/// comes first. Returns `true` when the deadline won.
///
/// Answers are polled first on every turn, so an answer already delivered
/// when the deadline fires still counts.
async fn collect_answers<F>(
    rx: &mut mpsc::Receiver<AnswerRecord>,
    deadline: F,
    answers: &mut Vec<AnswerRecord>,
) -> bool
where
    F: Future<Output = ()>,
{
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            biased;
            answer = rx.recv() => match answer {
                Some(record) => answers.push(record),
                None => return false,
            },
            _ = &mut deadline => return true,
        }
    }
}

async fn ask_questions<R, W>(
    questions: Arc<[Question]>,
    mut reader: R,
    mut writer: W,
    tx: mpsc::Sender<AnswerRecord>,
) -> Result<SessionEnd, QuizError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    for (i, q) in questions.iter().enumerate() {
        let number = i + 1;
        write_prompt(&mut writer, &format!("Problem #{number}: {} = ", q.prompt)).await?;

        line.clear();
        let read = reader.read_line(&mut line).await.map_err(QuizError::Input)?;
        if read == 0 {
            return Ok(SessionEnd::InputClosed);
        }

        let record = AnswerRecord {
            number,
            prompt: q.prompt.clone(),
            expected: q.answer.clone(),
            given: normalize_answer(&line),
            correct: q.is_correct(&line),
        };
        if tx.send(record).await.is_err() {
            // Receiver gone: the session already ended
            break;
        }
    }

    Ok(SessionEnd::Completed)
}

async fn write_prompt<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<(), QuizError> {
    writer
        .write_all(text.as_bytes())
        .await
        .map_err(QuizError::Output)?;
    writer.flush().await.map_err(QuizError::Output)
}
