//! Core data model types for quiztimer.
//!
//! A quiz is an ordered list of question/answer pairs loaded from a
//! delimited file. Answers are normalized once at load time so comparing a
//! typed answer is a single string equality.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The text shown to the user.
    pub prompt: String,
    /// The expected answer, already normalized.
    pub answer: String,
}

impl Question {
    /// Build a question, normalizing the expected answer.
    pub fn new(prompt: impl Into<String>, answer: &str) -> Self {
        Self {
            prompt: prompt.into(),
            answer: normalize_answer(answer),
        }
    }

    /// Whether `given` matches the expected answer after normalization.
    pub fn is_correct(&self, given: &str) -> bool {
        normalize_answer(given) == self.answer
    }
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A row that was dropped because it did not have exactly two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    /// How many fields the row actually had.
    pub fields: usize,
}

/// The questions loaded from one file.
#[derive(Debug, Clone)]
pub struct QuizSet {
    /// Where the questions came from.
    pub source: PathBuf,
    /// The questions, in file order until shuffled.
    pub questions: Vec<Question>,
    /// Rows that were skipped during parsing.
    pub skipped: Vec<SkippedRow>,
}

impl QuizSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_answer("  Paris \t"), "paris");
        assert_eq!(normalize_answer("10"), "10");
        assert_eq!(normalize_answer("   "), "");
    }

    #[test]
    fn question_stores_normalized_answer() {
        let q = Question::new("Capital of France?", " PARIS ");
        assert_eq!(q.prompt, "Capital of France?");
        assert_eq!(q.answer, "paris");
    }

    #[test]
    fn is_correct_ignores_case_and_whitespace() {
        let q = Question::new("5+5", "10");
        assert!(q.is_correct("10"));
        assert!(q.is_correct(" 10\r\n"));
        assert!(!q.is_correct("1 0"));
        assert!(!q.is_correct(""));

        let q = Question::new("colour of the sky", "Blue");
        assert!(q.is_correct("bLUE"));
    }

    #[test]
    fn prompt_is_kept_verbatim() {
        let q = Question::new("  what is 2+2? ", "4");
        assert_eq!(q.prompt, "  what is 2+2? ");
    }
}
