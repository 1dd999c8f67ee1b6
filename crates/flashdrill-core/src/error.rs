//! Core error types.
//!
//! Import failures are split into malformed input (`ImportError::Parse`) and
//! well-formed input that breaks the word record rules (`ValidationError`), so
//! callers can tell a broken file apart from a bad entry inside it.

use std::fmt;

use thiserror::Error;

use crate::engine::Phase;

/// What is wrong with a single field of an import record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// The field is absent or `null`.
    Missing,
    /// The field is present but empty.
    Empty,
    /// The field has the wrong JSON type.
    WrongType { expected: &'static str },
    /// One element of the explanation list is empty (1-based position).
    EmptyElement { position: usize },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Missing => write!(f, "is missing"),
            Problem::Empty => write!(f, "is empty"),
            Problem::WrongType { expected } => write!(f, "must be {expected}"),
            Problem::EmptyElement { position } => {
                write!(f, "has an empty entry at position {position}")
            }
        }
    }
}

/// A word record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("word #{index}: `{field}` {problem}")]
pub struct ValidationError {
    /// 1-based position of the record within the imported batch.
    pub index: usize,
    /// JSON field name (`word`, `part_of_speech`, `explanation`, or `record`).
    pub field: &'static str,
    pub problem: Problem,
}

impl ValidationError {
    pub fn new(index: usize, field: &'static str, problem: Problem) -> Self {
        Self {
            index,
            field,
            problem,
        }
    }
}

/// Errors produced while turning serialized input into word records.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input is not a JSON array.
    #[error("malformed word list: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input parsed, but a record is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors from driving a learning session out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation is not allowed in the session's current phase.
    #[error("cannot {operation} while the session is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_index_and_field() {
        let err = ValidationError::new(1, "word", Problem::Empty);
        assert_eq!(err.to_string(), "word #1: `word` is empty");

        let err = ValidationError::new(3, "explanation", Problem::EmptyElement { position: 2 });
        assert_eq!(
            err.to_string(),
            "word #3: `explanation` has an empty entry at position 2"
        );
    }

    #[test]
    fn import_error_kinds_are_distinguishable() {
        let parse: ImportError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(parse, ImportError::Parse(_)));

        let validation: ImportError = ValidationError::new(2, "word", Problem::Missing).into();
        assert!(matches!(validation, ImportError::Validation(_)));
        assert_eq!(validation.to_string(), "word #2: `word` is missing");
    }

    #[test]
    fn invalid_state_message() {
        let err = SessionError::InvalidState {
            operation: "assess",
            phase: Phase::Finished,
        };
        assert_eq!(
            err.to_string(),
            "cannot assess while the session is finished"
        );
    }
}
