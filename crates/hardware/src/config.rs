//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants (memory size, predictor seed and table size).
//! 2. **Structures:** Hierarchical config for general, memory and pipeline settings.
//! 3. **Enums:** Control-hazard policy and branch predictor types.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built with
//! `Config::default()`; every field is optional in JSON and falls back to its default.

use serde::Deserialize;

use crate::common::constants::{COUNTER_MAX, DEFAULT_MEMORY_BYTES, MAX_COMBINED_TABLE, WORD_BYTES};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Data memory size in bytes (1 MiB).
    pub const MEMORY_BYTES: usize = super::DEFAULT_MEMORY_BYTES;

    /// Initial value of every predictor counter and of the history register.
    ///
    /// 1 is "weakly not-taken": one taken outcome flips the prediction.
    pub const INITIAL_COUNTER: u8 = 1;

    /// Combined predictor table size (the full 2^16 index space).
    pub const COMBINED_TABLE_SIZE: usize = super::MAX_COMBINED_TABLE;
}

/// How the pipeline handles control transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ControlPolicy {
    /// Suspend fetch while a branch or jump is in flight; no wrong-path fetch.
    #[default]
    Stall,
    /// Fetch down the predicted path and squash younger instructions on a misprediction.
    Predict,
}

/// Branch prediction algorithm types.
///
/// Only consulted under [`ControlPolicy::Predict`] and by branch-trace replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// 2-bit counters indexed by the low 14 PC bits.
    #[default]
    Saturating,
    /// 2-bit counters indexed by a 2-bit global history register.
    #[serde(alias = "BHR")]
    History,
    /// 2-bit counters indexed by PC bucket and history together.
    Combined,
}

/// Root configuration structure.
///
/// ```
/// use mipsim_core::config::{Config, ControlPolicy};
///
/// let config = Config::from_json(r#"{ "pipeline": { "control_policy": "Predict" } }"#).unwrap();
/// assert_eq!(config.pipeline.control_policy, ControlPolicy::Predict);
/// assert_eq!(config.memory.size_bytes, 1 << 20);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline and branch predictor settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Decodes a JSON configuration and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and any error from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system does not enforce.
    ///
    /// # Errors
    ///
    /// Fails on a memory size that is zero or not word aligned, an initial counter
    /// above 3, or a combined table size outside `1..=65536`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bytes = self.memory.size_bytes;
        if bytes == 0 || bytes % WORD_BYTES != 0 {
            return Err(ConfigError::MemorySize(bytes));
        }
        if self.pipeline.initial_counter > COUNTER_MAX {
            return Err(ConfigError::InitialCounter(self.pipeline.initial_counter));
        }
        let size = self.pipeline.combined_table_size;
        if size == 0 {
            return Err(ConfigError::EmptyTable);
        }
        if size > MAX_COMBINED_TABLE {
            return Err(ConfigError::TableTooLarge { size });
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage trace events (the CLI raises its log filter to `trace`).
    #[serde(default)]
    pub trace: bool,

    /// Stop after this many cycles even if the pipeline has not drained.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes; the program may hold at most `size_bytes / 4 - 1` instructions.
    #[serde(default = "MemoryConfig::default_size_bytes")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default memory size.
    const fn default_size_bytes() -> usize {
        defaults::MEMORY_BYTES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_BYTES,
        }
    }
}

/// Pipeline and branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Control-hazard policy.
    #[serde(default)]
    pub control_policy: ControlPolicy,

    /// Branch predictor type.
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Predictor seed: initial counter and history register value (0-3).
    #[serde(default = "PipelineConfig::default_initial_counter")]
    pub initial_counter: u8,

    /// Entries in the combined predictor's table (1 to 65536).
    #[serde(default = "PipelineConfig::default_combined_table_size")]
    pub combined_table_size: usize,
}

impl PipelineConfig {
    /// Returns the default predictor seed.
    const fn default_initial_counter() -> u8 {
        defaults::INITIAL_COUNTER
    }

    /// Returns the default combined table size.
    const fn default_combined_table_size() -> usize {
        defaults::COMBINED_TABLE_SIZE
    }
}

impl Default for PipelineConfig {
    /// Stall policy, saturating predictor, weakly not-taken seed, full-size combined table.
    fn default() -> Self {
        Self {
            control_policy: ControlPolicy::default(),
            branch_predictor: BranchPredictor::default(),
            initial_counter: defaults::INITIAL_COUNTER,
            combined_table_size: defaults::COMBINED_TABLE_SIZE,
        }
    }
}
