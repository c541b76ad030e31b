//! The `quiztimer validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quiztimer_core::parser::{self, ParseOptions};

pub fn execute(csv: PathBuf, delimiter: char) -> Result<()> {
    let options = ParseOptions::with_delimiter(delimiter)?;
    let set = parser::parse_quiz_file(&csv, &options)?;

    println!("Quiz: {} ({} questions)", csv.display(), set.len());

    let warnings = parser::validate_quiz(&set);
    for w in &warnings {
        let prefix = w
            .line
            .map(|line| format!("  [line {line}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
