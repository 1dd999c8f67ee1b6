//! Result aggregation and session summary statistics.

use serde::{Deserialize, Serialize};

use crate::model::{LearningResult, WordEntry};

/// Per-word results for every assessed entry, most unfamiliar first.
///
/// Entries never presented are left out. The sort is stable, so equal
/// unfamiliarity keeps pool order.
pub fn aggregate(entries: &[WordEntry]) -> Vec<LearningResult> {
    let mut results: Vec<LearningResult> =
        entries.iter().filter_map(LearningResult::from_entry).collect();
    results.sort_by(|a, b| b.unfamiliarity.total_cmp(&a.unfamiliarity));
    results
}

/// Pool-wide figures for a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Words in the pool.
    pub total_words: usize,
    /// Words assessed at least once.
    pub presented_words: usize,
    /// Sum of all assessments.
    pub total_assessments: u64,
    /// Words whose weight fell below the mastery threshold.
    pub mastered_words: usize,
    /// Mean unfamiliarity over presented words (0.0 if none).
    pub mean_unfamiliarity: f64,
}

/// Summarize a pool against the given mastery threshold.
pub fn summarize(entries: &[WordEntry], threshold: f64) -> SessionSummary {
    let unfamiliarity: Vec<f64> = entries.iter().filter_map(WordEntry::unfamiliarity).collect();
    let mean_unfamiliarity = if unfamiliarity.is_empty() {
        0.0
    } else {
        unfamiliarity.iter().sum::<f64>() / unfamiliarity.len() as f64
    };

    SessionSummary {
        total_words: entries.len(),
        presented_words: unfamiliarity.len(),
        total_assessments: entries.iter().map(|e| e.occurrences as u64).sum(),
        mastered_words: entries.iter().filter(|e| !e.is_eligible(threshold)).count(),
        mean_unfamiliarity,
    }
}
