//! Error types for loading questions and running sessions.
//!
//! Row-level problems in a question file are not errors: malformed rows are
//! logged and skipped by the parser. Everything here is fatal to the caller.
//! Display strings leave out the underlying cause; it is available through
//! `source()` so `{:#}` formatting prints it once.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a quiz or running a session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question file could not be opened.
    #[error("unable to open '{}'", path.display())]
    Open { path: PathBuf, source: io::Error },

    /// The question file is not valid delimited text.
    #[error("error reading csv file '{}'", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// Reading an answer failed.
    #[error("error reading from input")]
    Input(#[source] io::Error),

    /// Writing a prompt failed.
    #[error("error writing prompt")]
    Output(#[source] io::Error),

    /// The configured field delimiter is not a single ASCII character.
    #[error("invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}
