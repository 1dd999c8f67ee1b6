//! flashdrill-core — Adaptive vocabulary drilling engine.
//!
//! This crate defines the word data model, word-pool management, JSON import,
//! and the learning engine that resamples words according to how familiar
//! the learner reports them to be.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod pool;
pub mod report;
pub mod statistics;

pub use engine::{EngineConfig, LearningSession, Phase};
pub use error::{ImportError, Problem, SessionError, ValidationError};
pub use model::{Assessment, LearningResult, RawWordRecord, WordEntry};
pub use pool::WordPool;
