//! Core data model types for flashdrill.
//!
//! These are the fundamental types that represent words under training,
//! the learner's self-assessments, and the per-word outcome of a session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling weight every entry starts with after import or reset.
pub const INITIAL_WEIGHT: f64 = 1.0;

/// One vocabulary item under training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Display text. Not a unique key; duplicates are distinct entries.
    pub word: String,
    /// Part-of-speech tag, display only.
    pub part_of_speech: String,
    /// Definitions, in display order. Never empty.
    pub explanations: Vec<String>,
    /// Sampling mass. Higher means assessed as harder.
    pub weight: f64,
    /// Number of times this entry was presented and assessed.
    pub occurrences: u32,
    /// Sum of the post-update weight at each assessment.
    pub accumulated_weight: f64,
}

impl WordEntry {
    /// Create a fresh entry with the initial weight and zeroed counters.
    pub fn new(
        word: impl Into<String>,
        part_of_speech: impl Into<String>,
        explanations: Vec<String>,
    ) -> Self {
        Self {
            word: word.into(),
            part_of_speech: part_of_speech.into(),
            explanations,
            weight: INITIAL_WEIGHT,
            occurrences: 0,
            accumulated_weight: 0.0,
        }
    }

    /// Restore the initial weight and clear the counters; content is kept.
    pub fn reset(&mut self) {
        self.weight = INITIAL_WEIGHT;
        self.occurrences = 0;
        self.accumulated_weight = 0.0;
    }

    /// Whether the entry can still be drawn at the given mastery threshold.
    pub fn is_eligible(&self, threshold: f64) -> bool {
        self.weight >= threshold
    }

    /// Average post-update weight per assessment, if ever assessed.
    pub fn unfamiliarity(&self) -> Option<f64> {
        (self.occurrences > 0).then(|| self.accumulated_weight / self.occurrences as f64)
    }
}

/// An unvalidated word record as it appears in an import file.
///
/// Field names follow the JSON import format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWordRecord {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub explanation: Option<Vec<String>>,
}

impl RawWordRecord {
    /// Convenience constructor for a fully populated record.
    pub fn new(word: &str, part_of_speech: &str, explanation: &[&str]) -> Self {
        Self {
            word: Some(word.to_string()),
            part_of_speech: Some(part_of_speech.to_string()),
            explanation: Some(explanation.iter().map(|e| e.to_string()).collect()),
        }
    }
}

/// The learner's self-reported familiarity with the current word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assessment {
    Unknown,
    Vague,
    Known,
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assessment::Unknown => write!(f, "unknown"),
            Assessment::Vague => write!(f, "vague"),
            Assessment::Known => write!(f, "known"),
        }
    }
}

impl FromStr for Assessment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" | "u" => Ok(Assessment::Unknown),
            "vague" | "v" => Ok(Assessment::Vague),
            "known" | "k" => Ok(Assessment::Known),
            other => Err(format!("unknown assessment: {other}")),
        }
    }
}

/// Per-word outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResult {
    /// Copied from the source entry.
    pub word: String,
    /// `accumulated_weight / occurrences`.
    pub unfamiliarity: f64,
    pub occurrences: u32,
    pub accumulated_weight: f64,
}

impl LearningResult {
    /// Build a result from an entry; `None` if the entry was never assessed.
    pub fn from_entry(entry: &WordEntry) -> Option<Self> {
        entry.unfamiliarity().map(|unfamiliarity| Self {
            word: entry.word.clone(),
            unfamiliarity,
            occurrences: entry.occurrences,
            accumulated_weight: entry.accumulated_weight,
        })
    }
}
