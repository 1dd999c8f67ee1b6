//! Word pool management: validated import and reset.

use serde::{Deserialize, Serialize};

use crate::error::{Problem, ValidationError};
use crate::model::{RawWordRecord, WordEntry};

/// Check a single import record. `index` is the 1-based position in its batch.
pub fn validate_record(index: usize, record: &RawWordRecord) -> Result<(), ValidationError> {
    let non_empty = |field: &'static str, value: &Option<String>| match value {
        None => Err(ValidationError::new(index, field, Problem::Missing)),
        Some(s) if s.is_empty() => Err(ValidationError::new(index, field, Problem::Empty)),
        Some(_) => Ok(()),
    };

    non_empty("word", &record.word)?;
    non_empty("part_of_speech", &record.part_of_speech)?;

    let explanation = record
        .explanation
        .as_ref()
        .ok_or_else(|| ValidationError::new(index, "explanation", Problem::Missing))?;
    if explanation.is_empty() {
        return Err(ValidationError::new(index, "explanation", Problem::Empty));
    }
    if let Some(pos) = explanation.iter().position(|e| e.is_empty()) {
        return Err(ValidationError::new(
            index,
            "explanation",
            Problem::EmptyElement { position: pos + 1 },
        ));
    }

    Ok(())
}

/// Validate a whole batch, returning every failing record.
pub fn validate_records(records: &[RawWordRecord]) -> Vec<ValidationError> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| validate_record(i + 1, r).err())
        .collect()
}

/// The ordered collection of words under training.
///
/// Entries are only ever appended, so an index handed out by the pool stays
/// valid for the pool's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordPool {
    entries: Vec<WordEntry>,
}

impl WordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from a batch of records.
    pub fn from_records(records: Vec<RawWordRecord>) -> Result<Self, ValidationError> {
        let mut pool = Self::new();
        pool.import(records)?;
        Ok(pool)
    }

    /// Validate and append a batch of records.
    ///
    /// The batch is committed all-or-nothing: if any record fails, the first
    /// failure is returned and the pool is left untouched.
    pub fn import(&mut self, records: Vec<RawWordRecord>) -> Result<usize, ValidationError> {
        if let Some(err) = validate_records(&records).into_iter().next() {
            tracing::debug!("rejecting import of {} words: {err}", records.len());
            return Err(err);
        }

        let count = records.len();
        // Validation guarantees every field is present.
        self.entries.extend(records.into_iter().map(|r| {
            WordEntry::new(
                r.word.unwrap_or_default(),
                r.part_of_speech.unwrap_or_default(),
                r.explanation.unwrap_or_default(),
            )
        }));
        tracing::debug!("imported {count} words, pool size {}", self.entries.len());
        Ok(count)
    }

    /// Reset every entry's weight and counters, keeping the words.
    pub fn reset(&mut self) {
        self.entries.iter_mut().for_each(WordEntry::reset);
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [WordEntry] {
        &mut self.entries
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries still eligible for selection.
    pub fn eligible_count(&self, threshold: f64) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_eligible(threshold))
            .count()
    }
}

impl From<Vec<WordEntry>> for WordPool {
    fn from(entries: Vec<WordEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_well_formed_record() {
        let mut pool = WordPool::new();
        let added = pool
            .import(vec![RawWordRecord::new("abate", "v.", &["to lessen"])])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(pool.len(), 1);
        let entry = pool.get(0).unwrap();
        assert_eq!(entry.weight, 1.0);
        assert_eq!(entry.occurrences, 0);
        assert_eq!(entry.explanations, vec!["to lessen"]);
    }

    #[test]
    fn empty_word_names_index_and_field() {
        let err = WordPool::from_records(vec![RawWordRecord::new("", "n.", &["x"])]).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.field, "word");
        assert_eq!(err.problem, Problem::Empty);
    }

    #[test]
    fn each_rule_is_checked() {
        let missing_pos = RawWordRecord {
            part_of_speech: None,
            ..RawWordRecord::new("a", "n.", &["x"])
        };
        assert_eq!(
            validate_record(1, &missing_pos).unwrap_err().field,
            "part_of_speech"
        );

        let no_explanations = RawWordRecord::new("a", "n.", &[]);
        assert_eq!(
            validate_record(1, &no_explanations).unwrap_err().problem,
            Problem::Empty
        );

        let missing_explanations = RawWordRecord {
            explanation: None,
            ..RawWordRecord::new("a", "n.", &["x"])
        };
        assert_eq!(
            validate_record(1, &missing_explanations).unwrap_err().problem,
            Problem::Missing
        );

        let blank_element = RawWordRecord::new("a", "n.", &["x", ""]);
        assert_eq!(
            validate_record(4, &blank_element).unwrap_err(),
            ValidationError::new(4, "explanation", Problem::EmptyElement { position: 2 })
        );
    }

    #[test]
    fn failed_import_leaves_pool_untouched() {
        let mut pool = WordPool::from_records(vec![RawWordRecord::new("a", "n.", &["x"])]).unwrap();
        let err = pool
            .import(vec![
                RawWordRecord::new("b", "n.", &["y"]),
                RawWordRecord::new("c", "", &["z"]),
            ])
            .unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn validate_records_reports_every_failure() {
        let errors = validate_records(&[
            RawWordRecord::new("", "n.", &["x"]),
            RawWordRecord::new("ok", "n.", &["x"]),
            RawWordRecord::new("b", "n.", &[""]),
        ]);
        let indexes: Vec<usize> = errors.iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![1, 3]);
    }

    #[test]
    fn duplicates_are_distinct_entries() {
        let pool = WordPool::from_records(vec![
            RawWordRecord::new("a", "n.", &["x"]),
            RawWordRecord::new("a", "n.", &["x"]),
        ])
        .unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut pool = WordPool::from_records(vec![RawWordRecord::new("a", "n.", &["x"])]).unwrap();
        {
            let entry = &mut pool.entries_mut()[0];
            entry.weight = 4.6656;
            entry.occurrences = 2;
            entry.accumulated_weight = 6.8256;
        }
        pool.reset();
        let entry = pool.get(0).unwrap();
        assert_eq!(entry.weight, 1.0);
        assert_eq!(entry.occurrences, 0);
        assert_eq!(entry.accumulated_weight, 0.0);
        assert_eq!(entry.word, "a");
    }
}
