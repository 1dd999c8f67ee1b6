//! The learning engine.
//!
//! Drives one session over a word pool: weighted random selection of the next
//! word, exponential weight adjustment after each self-assessment, and
//! termination once every word has decayed below the mastery threshold.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, ValidationError};
use crate::model::{Assessment, LearningResult, RawWordRecord, WordEntry};
use crate::pool::WordPool;
use crate::statistics::aggregate;

/// Default multiplier applied on `unknown` and divisor applied on `known`.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.16;
/// Default weight below which a word counts as mastered.
pub const DEFAULT_MASTERY_THRESHOLD: f64 = 0.1;

/// Weights saturate here, so a run of known answers always brings a word
/// back under the mastery threshold.
pub const MAX_WEIGHT: f64 = 1e12;

/// Tunable parameters of the weighting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Factor by which `unknown` grows and `known` shrinks a weight.
    pub growth_factor: f64,
    /// Entries with `weight >= mastery_threshold` stay eligible.
    pub mastery_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            growth_factor: DEFAULT_GROWTH_FACTOR,
            mastery_threshold: DEFAULT_MASTERY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Check that the parameters describe a session that can terminate.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.growth_factor.is_finite() && self.growth_factor > 1.0,
            "growth factor must be greater than 1.0, got {}",
            self.growth_factor
        );
        anyhow::ensure!(
            self.mastery_threshold.is_finite()
                && self.mastery_threshold > 0.0
                && self.mastery_threshold <= 1.0,
            "mastery threshold must be in (0.0, 1.0], got {}",
            self.mastery_threshold
        );
        Ok(())
    }

    /// New weight after an assessment.
    pub fn apply(&self, weight: f64, assessment: Assessment) -> f64 {
        match assessment {
            Assessment::Unknown => (weight * self.growth_factor).min(MAX_WEIGHT),
            Assessment::Vague => weight,
            Assessment::Known => weight / self.growth_factor,
        }
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not started yet.
    Idle,
    /// A word is on display, awaiting assessment.
    Presenting,
    /// No word left or ended early; results are available.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Presenting => write!(f, "presenting"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Roulette-wheel selection over the eligible entries.
///
/// Walks eligible entries in pool order and returns the first whose running
/// weight sum reaches `r`. If rounding leaves `r` beyond the final sum, the
/// last eligible entry is returned. `None` only when nothing is eligible.
pub fn select_weighted(entries: &[WordEntry], threshold: f64, r: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_eligible = None;

    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_eligible(threshold) {
            continue;
        }
        cumulative += entry.weight;
        if cumulative >= r {
            return Some(index);
        }
        last_eligible = Some(index);
    }

    last_eligible
}

/// One learning session over an owned word pool.
///
/// The current word is held as an index into the pool, so updates made
/// through the session are the pool's own state.
pub struct LearningSession<R: Rng = StdRng> {
    pool: WordPool,
    config: EngineConfig,
    rng: R,
    phase: Phase,
    current: Option<usize>,
    results: Vec<LearningResult>,
    ended_early: bool,
}

impl LearningSession<StdRng> {
    /// Create a session with a seeded generator, or an entropy-seeded one.
    pub fn seeded(pool: WordPool, config: EngineConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(pool, config, rng)
    }
}

impl<R: Rng> LearningSession<R> {
    pub fn new(pool: WordPool, config: EngineConfig, rng: R) -> Self {
        Self {
            pool,
            config,
            rng,
            phase: Phase::Idle,
            current: None,
            results: Vec::new(),
            ended_early: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    /// Hand the pool back to the caller.
    pub fn into_pool(self) -> WordPool {
        self.pool
    }

    /// Whether the last session was ended by the learner rather than by mastery.
    pub fn ended_early(&self) -> bool {
        self.ended_early
    }

    /// Validate and append words to the pool.
    pub fn import_words(&mut self, records: Vec<RawWordRecord>) -> Result<usize, ValidationError> {
        self.pool.import(records)
    }

    /// Begin the session by drawing the first word.
    ///
    /// An empty pool, or one with nothing eligible, finishes immediately.
    pub fn start(&mut self) -> Result<Option<&WordEntry>, SessionError> {
        self.require(Phase::Idle, "start")?;
        tracing::info!(
            words = self.pool.len(),
            growth_factor = self.config.growth_factor,
            "starting learning session"
        );
        self.select_next();
        Ok(self.current_word())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The word awaiting assessment, if any.
    pub fn current_word(&self) -> Option<&WordEntry> {
        self.current.and_then(|i| self.pool.get(i))
    }

    /// Record the learner's assessment of the current word and move on.
    ///
    /// Returns the next word, or `None` if the session just finished.
    pub fn assess(&mut self, assessment: Assessment) -> Result<Option<&WordEntry>, SessionError> {
        self.require(Phase::Presenting, "assess")?;
        let Some(index) = self.current else {
            return Err(SessionError::InvalidState {
                operation: "assess",
                phase: self.phase,
            });
        };

        let config = self.config;
        let entry = &mut self.pool.entries_mut()[index];
        entry.weight = config.apply(entry.weight, assessment);
        entry.occurrences += 1;
        entry.accumulated_weight += entry.weight;
        tracing::debug!(
            word = %entry.word,
            %assessment,
            weight = entry.weight,
            occurrences = entry.occurrences,
            "assessed word"
        );

        self.select_next();
        Ok(self.current_word())
    }

    /// Stop the session now and aggregate what has been assessed so far.
    pub fn end_early(&mut self) -> Result<&[LearningResult], SessionError> {
        self.require(Phase::Presenting, "end the session")?;
        self.ended_early = true;
        self.finish();
        Ok(self.results.as_slice())
    }

    /// Per-word results, most unfamiliar first. Only valid once finished.
    pub fn results(&self) -> Result<&[LearningResult], SessionError> {
        self.require(Phase::Finished, "read results")?;
        Ok(self.results.as_slice())
    }

    /// Reset the pool and start a fresh session over the same words.
    pub fn restart(&mut self) -> Option<&WordEntry> {
        self.pool.reset();
        self.results.clear();
        self.ended_early = false;
        self.current = None;
        tracing::info!(words = self.pool.len(), "restarting learning session");
        self.select_next();
        self.current_word()
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    fn select_next(&mut self) {
        let threshold = self.config.mastery_threshold;
        let entries = self.pool.entries();
        let total: f64 = entries
            .iter()
            .filter(|e| e.is_eligible(threshold))
            .map(|e| e.weight)
            .sum();

        let r = self.rng.gen::<f64>() * total;
        match select_weighted(entries, threshold, r) {
            Some(index) => {
                let entry = &entries[index];
                tracing::debug!(word = %entry.word, weight = entry.weight, "selected word");
                self.current = Some(index);
                self.phase = Phase::Presenting;
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.current = None;
        self.phase = Phase::Finished;
        self.results = aggregate(self.pool.entries());
        tracing::info!(
            results = self.results.len(),
            ended_early = self.ended_early,
            "learning session finished"
        );
    }
}
