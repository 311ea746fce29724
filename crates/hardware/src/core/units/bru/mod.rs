//! Branch prediction unit (BRU) implementations.
//!
//! Three interchangeable direction predictors behind the [`BranchPredictor`]
//! trait: a PC-indexed saturating counter table, a global-history indexed
//! table, and a combined PC + history table.

pub use self::branch_predictor::{BranchPredictor, SaturatingCounter};

/// Branch predictor trait and the shared 2-bit counter.
pub mod branch_predictor;

/// Combined PC + history indexed predictor.
pub mod combined;

/// Global branch-history indexed predictor.
pub mod history;

/// PC-indexed saturating counter predictor.
pub mod saturating;

use self::{
    combined::CombinedPredictor, history::HistoryPredictor, saturating::SaturatingPredictor,
};
use crate::common::error::ConfigError;
use crate::config::{BranchPredictor as BpType, PipelineConfig};

/// Enum wrapper for static dispatch of branch predictors.
/// This avoids vtable lookups on the fetch path.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// PC-indexed counters.
    Saturating(SaturatingPredictor),
    /// History-indexed counters.
    History(HistoryPredictor),
    /// PC + history indexed counters.
    Combined(CombinedPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor selected by the pipeline configuration.
    ///
    /// # Errors
    ///
    /// Fails if the combined table size is out of range.
    pub fn new(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let initial = config.initial_counter;
        Ok(match config.branch_predictor {
            BpType::Saturating => Self::Saturating(SaturatingPredictor::new(initial)),
            BpType::History => Self::History(HistoryPredictor::new(initial)),
            BpType::Combined => Self::Combined(CombinedPredictor::new(
                initial,
                config.combined_table_size,
            )?),
        })
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32) -> bool {
        match self {
            Self::Saturating(bp) => bp.predict(pc),
            Self::History(bp) => bp.predict(pc),
            Self::Combined(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u32, taken: bool) {
        match self {
            Self::Saturating(bp) => bp.update(pc, taken),
            Self::History(bp) => bp.update(pc, taken),
            Self::Combined(bp) => bp.update(pc, taken),
        }
    }
}
