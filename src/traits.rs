//! Traits for pluggable matching policies and input validation

use crate::types::*;
use crate::utils::rounding::Payout;
use crate::utils::validation::{validate_amount, validate_identifier};

/// Policy that turns debtor and creditor balances into transfers.
///
/// Implementations receive debtors and creditors in input order, each with a
/// strictly positive `remaining` in participant-scaled units. Amounts are
/// converted with [`Payout::amount`] only when a transfer is emitted. Every
/// emitted transfer must carry a rounded, strictly positive amount, and the
/// number of transfers must not exceed `debtors.len() + creditors.len() - 1`.
pub trait MatchingStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Match balances and return transfers in emission order
    fn match_balances(
        &self,
        debtors: Vec<Outstanding>,
        creditors: Vec<Outstanding>,
        payout: &Payout,
    ) -> Vec<Transfer>;
}

/// Caller-side checks run before contributions reach the engine
pub trait ContributionValidator: Send + Sync {
    /// Validate a single contribution at position `index`
    fn validate_contribution(&self, index: usize, contribution: &Contribution)
        -> SettlementOutcome<()>;

    /// Validate the whole list; the default checks each entry in order
    fn validate_contributions(&self, contributions: &[Contribution]) -> SettlementOutcome<()> {
        contributions
            .iter()
            .enumerate()
            .try_for_each(|(index, contribution)| self.validate_contribution(index, contribution))
    }
}

/// Default validator: the engine's own input domain.
///
/// Identifiers must be non-blank and amounts non-negative. Zero amounts and
/// duplicate identifiers are accepted.
pub struct DefaultContributionValidator;

impl ContributionValidator for DefaultContributionValidator {
    fn validate_contribution(
        &self,
        index: usize,
        contribution: &Contribution,
    ) -> SettlementOutcome<()> {
        validate_identifier(index, &contribution.identifier)?;
        validate_amount(&contribution.identifier, &contribution.amount)
    }
}
