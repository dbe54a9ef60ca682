//! Settlement configuration

use bigdecimal::RoundingMode;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::rounding::Rounding;

/// Largest number of decimal places results may be rounded to
pub const MAX_SCALE: i64 = 8;

/// How contributions that share an identifier are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Each contribution is its own ledger entry, even when names repeat
    #[default]
    Separate,
    /// Contributions with the same identifier are summed into one participant
    Merge,
}

/// Settlement engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlementConfig {
    scale: i64,
    rounding_mode: RoundingMode,
    duplicates: DuplicatePolicy,
}

impl SettlementConfig {
    /// Create a configuration, rejecting scales outside `0..=MAX_SCALE`
    pub fn new(
        scale: i64,
        rounding_mode: RoundingMode,
        duplicates: DuplicatePolicy,
    ) -> SettlementOutcome<Self> {
        if !(0..=MAX_SCALE).contains(&scale) {
            return Err(SettlementError::InvalidConfig(format!(
                "scale must be between 0 and {MAX_SCALE}, got {scale}"
            )));
        }

        Ok(Self {
            scale,
            rounding_mode,
            duplicates,
        })
    }

    /// Round results to `scale` decimal places instead of whole units
    pub fn with_scale(self, scale: i64) -> SettlementOutcome<Self> {
        Self::new(scale, self.rounding_mode, self.duplicates)
    }

    pub fn with_rounding_mode(mut self, rounding_mode: RoundingMode) -> Self {
        self.rounding_mode = rounding_mode;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Rounding applied to every reported amount
    pub fn rounding(&self) -> Rounding {
        Rounding::new(self.scale, self.rounding_mode)
    }
}

impl Default for SettlementConfig {
    /// Whole currency units, halves rounded up, duplicates kept separate
    fn default() -> Self {
        Self {
            scale: 0,
            rounding_mode: RoundingMode::HalfUp,
            duplicates: DuplicatePolicy::Separate,
        }
    }
}
