//! Delimited question file parser.
//!
//! Loads header-less `question,answer` files into a `QuizSet`, and validates
//! them.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::QuizError;
use crate::model::{Question, QuizSet, SkippedRow};

/// How to split rows into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ParseOptions {
    /// Build options from a user-supplied delimiter character.
    pub fn with_delimiter(delimiter: char) -> Result<Self, QuizError> {
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(QuizError::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            delimiter: delimiter as u8,
        })
    }
}

/// Parse a question file from disk.
pub fn parse_quiz_file(path: &Path, options: &ParseOptions) -> Result<QuizSet, QuizError> {
    let file = File::open(path).map_err(|source| QuizError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_quiz_reader(file, path, options)
}

/// Parse question file contents held in memory (useful for testing).
pub fn parse_quiz_str(
    content: &str,
    source_path: &Path,
    options: &ParseOptions,
) -> Result<QuizSet, QuizError> {
    parse_quiz_reader(content.as_bytes(), source_path, options)
}

/// Parse rows from any reader. Rows without exactly two fields are skipped.
pub fn parse_quiz_reader<R: Read>(
    reader: R,
    source_path: &Path,
    options: &ParseOptions,
) -> Result<QuizSet, QuizError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut questions = Vec::new();
    let mut skipped = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(|source| QuizError::Csv {
            path: source_path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != 2 {
            tracing::warn!("incorrect number of fields on line {line}");
            skipped.push(SkippedRow {
                line,
                fields: record.len(),
            });
            continue;
        }

        questions.push(Question::new(&record[0], &record[1]));
    }

    tracing::debug!(
        "loaded {} questions from {} ({} skipped)",
        questions.len(),
        source_path.display(),
        skipped.len()
    );

    Ok(QuizSet {
        source: source_path.to_path_buf(),
        questions,
        skipped,
    })
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Source line of the offending row, when known.
    pub line: Option<u64>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz set for common issues.
pub fn validate_quiz(set: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for row in &set.skipped {
        warnings.push(ValidationWarning {
            line: Some(row.line),
            message: format!("expected 2 fields, found {}; row skipped", row.fields),
        });
    }

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            line: None,
            message: "no questions found".into(),
        });
    }

    // Question numbers are 1-based positions among the kept rows
    let mut seen = HashSet::new();
    for (i, q) in set.questions.iter().enumerate() {
        let number = i + 1;
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                line: None,
                message: format!("question #{number} has an empty prompt"),
            });
        }
        if q.answer.is_empty() {
            warnings.push(ValidationWarning {
                line: None,
                message: format!("question #{number} has an empty answer"),
            });
        }
        if !seen.insert(q.prompt.trim()) {
            warnings.push(ValidationWarning {
                line: None,
                message: format!("question #{number} duplicates an earlier prompt: {}", q.prompt),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PROBLEMS: &str = "5+5,10\n1+1,2\n8+3,11\n";

    fn parse(content: &str) -> QuizSet {
        parse_quiz_str(content, &PathBuf::from("test.csv"), &ParseOptions::default()).unwrap()
    }

    #[test]
    fn parse_valid_rows() {
        let set = parse(PROBLEMS);
        assert_eq!(set.len(), 3);
        assert_eq!(set.questions[0], Question::new("5+5", "10"));
        assert_eq!(set.questions[2].prompt, "8+3");
        assert!(set.skipped.is_empty());
    }

    #[test]
    fn answers_are_normalized_at_load() {
        let set = parse("capital of France?,  Paris \n");
        assert_eq!(set.questions[0].answer, "paris");
    }

    #[test]
    fn quoted_fields_may_contain_delimiters() {
        let set = parse("\"what is 1,000 + 1?\",1001\n");
        assert_eq!(set.len(), 1);
        assert_eq!(set.questions[0].prompt, "what is 1,000 + 1?");
        assert_eq!(set.questions[0].answer, "1001");
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let set = parse("5+5,10\nno answer here\n1+1,2,extra\n2+2,4\n");
        assert_eq!(set.len(), 2);
        assert_eq!(set.questions[1].prompt, "2+2");
        assert_eq!(
            set.skipped,
            vec![
                SkippedRow { line: 2, fields: 1 },
                SkippedRow { line: 3, fields: 3 },
            ]
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        let set = parse("5+5,10\n\n\n1+1,2\n");
        assert_eq!(set.len(), 2);
        assert!(set.skipped.is_empty());
    }

    #[test]
    fn custom_delimiter() {
        let options = ParseOptions::with_delimiter(';').unwrap();
        let set =
            parse_quiz_str("3,5 * 2;6\n", &PathBuf::from("semi.csv"), &options).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.questions[0].prompt, "3,5 * 2");
        assert_eq!(set.questions[0].answer, "6");
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        assert!(matches!(
            ParseOptions::with_delimiter('§'),
            Err(QuizError::InvalidDelimiter('§'))
        ));
        assert!(ParseOptions::with_delimiter('"').is_err());
        assert_eq!(ParseOptions::with_delimiter('\t').unwrap().delimiter, b'\t');
    }

    #[test]
    fn missing_file_is_open_error() {
        let result = parse_quiz_file(
            &PathBuf::from("definitely-not-here.csv"),
            &ParseOptions::default(),
        );
        assert!(matches!(result, Err(QuizError::Open { .. })));
    }

    #[test]
    fn invalid_utf8_is_csv_error() {
        let bytes: &[u8] = b"5+5,10\n\xff\xfe,1\n";
        let result = parse_quiz_reader(bytes, &PathBuf::from("bin.csv"), &ParseOptions::default());
        assert!(matches!(result, Err(QuizError::Csv { .. })));
    }

    #[test]
    fn parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, PROBLEMS).unwrap();

        let set = parse_quiz_file(&path, &ParseOptions::default()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.source, path);
    }

    #[test]
    fn validate_reports_issues() {
        let set = parse("5+5,10\n5+5,10\nbroken\n,7\n9-1,\n");
        let warnings = validate_quiz(&set);
        assert!(warnings
            .iter()
            .any(|w| w.line == Some(3) && w.message.contains("expected 2 fields")));
        assert!(warnings.iter().any(|w| w.message.contains("duplicates")));
        assert!(warnings.iter().any(|w| w.message.contains("empty prompt")));
        assert!(warnings.iter().any(|w| w.message.contains("empty answer")));
    }

    #[test]
    fn validate_clean_set() {
        assert!(validate_quiz(&parse(PROBLEMS)).is_empty());
    }

    #[test]
    fn validate_empty_set() {
        let warnings = validate_quiz(&parse(""));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no questions"));
    }
}
