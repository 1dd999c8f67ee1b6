//! Session report types with JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{EngineConfig, LearningSession};
use crate::model::LearningResult;
use crate::statistics::{summarize, SessionSummary};

/// The exported outcome of one finished learning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Where the words came from (file or directory path).
    pub source: String,
    /// Whether the learner stopped before mastering every word.
    pub ended_early: bool,
    /// Weighting parameters the session ran with.
    pub config: EngineConfig,
    /// Pool-wide figures.
    pub summary: SessionSummary,
    /// Per-word results, most unfamiliar first.
    pub results: Vec<LearningResult>,
}

impl SessionReport {
    /// Build a report from a finished session.
    pub fn from_session<R: Rng>(session: &LearningSession<R>, source: &str) -> Result<Self> {
        let results = session.results()?.to_vec();
        let config = *session.config();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.to_string(),
            ended_early: session.ended_early(),
            summary: summarize(session.pool().entries(), config.mastery_threshold),
            config,
            results,
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Learning Session Report\n\n");
        md.push_str(&format!(
            "- Source: `{}`\n- Date: {}\n- Outcome: {}\n",
            self.source,
            self.created_at.format("%Y-%m-%d %H:%M UTC"),
            if self.ended_early {
                "ended early"
            } else {
                "all words mastered"
            }
        ));
        md.push_str(&format!(
            "- Words presented: {}/{} ({} assessments, {} mastered)\n",
            self.summary.presented_words,
            self.summary.total_words,
            self.summary.total_assessments,
            self.summary.mastered_words
        ));
        md.push_str(&format!(
            "- Mean unfamiliarity: {:.3}\n\n",
            self.summary.mean_unfamiliarity
        ));

        if self.results.is_empty() {
            md.push_str("No words were assessed.\n");
            return md;
        }

        md.push_str("| # | Word | Unfamiliarity | Seen |\n");
        md.push_str("|---|------|---------------|------|\n");
        for (i, r) in self.results.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {:.3} | {} |\n",
                i + 1,
                r.word,
                r.unfamiliarity,
                r.occurrences
            ));
        }
        md
    }
}
