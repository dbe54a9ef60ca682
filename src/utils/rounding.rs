//! Rounding of reported amounts

use bigdecimal::{BigDecimal, RoundingMode};

/// Rounding applied to reported totals, shares and transfer amounts.
///
/// Balance arithmetic is never rounded; only values leaving the engine are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounding {
    scale: i64,
    mode: RoundingMode,
}

impl Rounding {
    pub fn new(scale: i64, mode: RoundingMode) -> Self {
        Self { scale, mode }
    }

    /// Nearest whole currency unit, halves rounded up
    pub fn whole_units() -> Self {
        Self::new(0, RoundingMode::HalfUp)
    }

    /// Round `value` to the configured scale
    pub fn apply(&self, value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(self.scale, self.mode)
    }

    /// Smallest representable amount at this scale (1 for whole units, 0.01 for cents)
    pub fn unit(&self) -> BigDecimal {
        BigDecimal::new(1.into(), self.scale)
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Self::whole_units()
    }
}

/// Turns balances held in participant-scaled units into transfer amounts.
///
/// Matching works on `amount * participants - total`, which stays exact under
/// addition and subtraction. Division by the participant count happens once
/// per transfer, right before rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    divisor: BigDecimal,
    rounding: Rounding,
}

impl Payout {
    pub fn new(participants: usize, rounding: Rounding) -> Self {
        Self {
            divisor: BigDecimal::from(participants.max(1) as u64),
            rounding,
        }
    }

    /// Payout for balances that are already in currency units
    pub fn unscaled(rounding: Rounding) -> Self {
        Self::new(1, rounding)
    }

    /// Rounded currency amount for a participant-scaled `value`
    pub fn amount(&self, value: &BigDecimal) -> BigDecimal {
        self.rounding.apply(&(value / &self.divisor))
    }
}
