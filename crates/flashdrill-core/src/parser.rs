//! JSON word list parser.
//!
//! Loads word records from JSON files and directories. The expected document
//! is an array of `{ "word", "part_of_speech", "explanation": [..] }` objects.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::error::{ImportError, Problem, ValidationError};
use crate::model::RawWordRecord;
use crate::pool::{validate_record, validate_records};

/// Parse a JSON string into raw word records.
///
/// A document that is not a JSON array is a parse error. Elements with the
/// wrong shape (not an object, non-string fields, non-array explanations) are
/// validation errors naming the 1-based element index; the first one is
/// returned. Content rules such as empty strings are left to
/// [`crate::pool::validate_record`].
pub fn parse_word_records_str(content: &str) -> Result<Vec<RawWordRecord>, ImportError> {
    let values: Vec<Value> = serde_json::from_str(content)?;

    let records = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| record_from_value(i + 1, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Outcome of checking a whole word list without stopping at the first problem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordListCheck {
    /// Number of elements in the list.
    pub records: usize,
    /// Every shape and content problem, in element order.
    pub errors: Vec<ValidationError>,
}

impl WordListCheck {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check every element of a JSON word list, collecting all problems.
///
/// Only a document that is not a JSON array fails outright.
pub fn check_word_records_str(content: &str) -> Result<WordListCheck, ImportError> {
    let values: Vec<Value> = serde_json::from_str(content)?;

    let records = values.len();
    let errors = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            record_from_value(i + 1, value)
                .and_then(|record| validate_record(i + 1, &record))
                .err()
        })
        .collect();

    Ok(WordListCheck { records, errors })
}

fn record_from_value(index: usize, value: Value) -> Result<RawWordRecord, ValidationError> {
    let Value::Object(mut fields) = value else {
        return Err(ValidationError::new(
            index,
            "record",
            Problem::WrongType {
                expected: "an object",
            },
        ));
    };

    let word = take_string(index, &mut fields, "word")?;
    let part_of_speech = take_string(index, &mut fields, "part_of_speech")?;

    let explanation = match fields.remove("explanation") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(ValidationError::new(
                        index,
                        "explanation",
                        Problem::WrongType {
                            expected: "an array of strings",
                        },
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(_) => {
            return Err(ValidationError::new(
                index,
                "explanation",
                Problem::WrongType {
                    expected: "an array of strings",
                },
            ))
        }
    };

    Ok(RawWordRecord {
        word,
        part_of_speech,
        explanation,
    })
}

fn take_string(
    index: usize,
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match fields.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ValidationError::new(
            index,
            field,
            Problem::WrongType {
                expected: "a string",
            },
        )),
    }
}

/// Parse and validate a single JSON word list file.
///
/// Error indexes are positions within this file, and the error context
/// names the file.
pub fn load_word_file(path: &Path) -> Result<Vec<RawWordRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list: {}", path.display()))?;

    let records = parse_word_records_str(&content).and_then(|records| {
        match validate_records(&records).into_iter().next() {
            Some(err) => Err(ImportError::Validation(err)),
            None => Ok(records),
        }
    });
    records.with_context(|| format!("invalid word list: {}", path.display()))
}

/// List the word list files a path refers to.
///
/// A file is returned as-is. A directory is walked recursively for `.json`
/// files in lexical path order, so the resulting pool order is stable.
pub fn word_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(path)
        .with_context(|| format!("failed to read directory: {}", path.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    let mut files = Vec::new();
    for p in paths {
        if p.is_dir() {
            files.extend(word_files(&p)?);
        } else if p.extension().is_some_and(|ext| ext == "json") {
            files.push(p);
        }
    }
    Ok(files)
}

/// Recursively load every `.json` word list under a directory.
///
/// Unreadable or malformed files are skipped with a warning. A file that
/// parses but holds an invalid record fails the whole load.
pub fn load_word_directory(dir: &Path) -> Result<Vec<RawWordRecord>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut records = Vec::new();
    for path in word_files(dir)? {
        match load_word_file(&path) {
            Ok(batch) => records.extend(batch),
            Err(e) if is_validation_error(&e) => return Err(e),
            Err(e) => {
                tracing::warn!("skipping {}: {e:#}", path.display());
            }
        }
    }

    Ok(records)
}

fn is_validation_error(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::Validation(_))
    )
}

/// Load a word list from a file or a directory of files.
pub fn load_words(path: &Path) -> Result<Vec<RawWordRecord>> {
    if path.is_dir() {
        load_word_directory(path)
    } else {
        load_word_file(path)
    }
}
