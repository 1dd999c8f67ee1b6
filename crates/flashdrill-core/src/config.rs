//! flashdrill configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, DEFAULT_GROWTH_FACTOR, DEFAULT_MASTERY_THRESHOLD};

/// Top-level flashdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashdrillConfig {
    /// Weight multiplier for `unknown`, divisor for `known`.
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
    /// Weight below which a word counts as mastered.
    #[serde(default = "default_mastery_threshold")]
    pub mastery_threshold: f64,
    /// Fixed RNG seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Default word list (file or directory).
    #[serde(default)]
    pub words: Option<PathBuf>,
    /// Directory session reports are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_growth_factor() -> f64 {
    DEFAULT_GROWTH_FACTOR
}
fn default_mastery_threshold() -> f64 {
    DEFAULT_MASTERY_THRESHOLD
}
fn default_report_dir() -> PathBuf {
    PathBuf::from("./flashdrill-results")
}

impl Default for FlashdrillConfig {
    fn default() -> Self {
        Self {
            growth_factor: default_growth_factor(),
            mastery_threshold: default_mastery_threshold(),
            seed: None,
            words: None,
            report_dir: default_report_dir(),
        }
    }
}

impl FlashdrillConfig {
    /// The validated engine parameters.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let config = EngineConfig {
            growth_factor: self.growth_factor,
            mastery_threshold: self.mastery_threshold,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

fn env_override<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {name} '{raw}': {e}")),
        Err(_) => Ok(None),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `flashdrill.toml` in the current directory
/// 2. `~/.config/flashdrill/config.toml`
///
/// Environment variable overrides: `FLASHDRILL_SEED`, `FLASHDRILL_GROWTH_FACTOR`,
/// `FLASHDRILL_MASTERY_THRESHOLD`.
pub fn load_config() -> Result<FlashdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FlashdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("flashdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => FlashdrillConfig::default(),
    };

    if let Some(seed) = env_override("FLASHDRILL_SEED")? {
        config.seed = Some(seed);
    }
    if let Some(factor) = env_override("FLASHDRILL_GROWTH_FACTOR")? {
        config.growth_factor = factor;
    }
    if let Some(threshold) = env_override("FLASHDRILL_MASTERY_THRESHOLD")? {
        config.mastery_threshold = threshold;
    }

    Ok(config)
}

/// Parse a TOML config string and resolve `${VAR}` references in paths.
pub fn parse_config_str(content: &str) -> Result<FlashdrillConfig> {
    let mut config: FlashdrillConfig = toml::from_str(content)?;
    config.words = config.words.as_deref().map(resolve_path);
    config.report_dir = resolve_path(&config.report_dir);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("flashdrill"))
}
