//! quiztimer-core — question loading, timed sessions, and scoring.
//!
//! This crate defines the data model, the delimited-file parser, and the
//! session engine that races answers against a time limit.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;

pub use error::QuizError;
pub use model::{normalize_answer, Question, QuizSet};
pub use session::{QuizSession, SessionConfig, SessionEnd, SessionOutcome};
