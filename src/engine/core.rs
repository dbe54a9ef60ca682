//! Settlement engine orchestrating balance derivation, matching and rounding

use std::fmt;

use crate::engine::audit::SettlementAudit;
use crate::engine::balance::BalanceSnapshot;
use crate::engine::config::SettlementConfig;
use crate::engine::matcher::GreedyMatcher;
use crate::traits::*;
use crate::types::*;
use crate::utils::rounding::Payout;

/// Stateless settlement engine.
///
/// Holds only configuration; every call to [`SettlementEngine::settle`] works
/// on its own input and returns a fresh result, so one engine can be shared
/// across threads.
pub struct SettlementEngine {
    config: SettlementConfig,
    matcher: Box<dyn MatchingStrategy>,
}

impl SettlementEngine {
    /// Engine with default configuration and greedy matching
    pub fn new() -> Self {
        Self::with_config(SettlementConfig::default())
    }

    /// Engine with custom configuration and greedy matching
    pub fn with_config(config: SettlementConfig) -> Self {
        Self::with_matcher(config, Box::new(GreedyMatcher))
    }

    /// Engine with custom configuration and matching policy
    pub fn with_matcher(config: SettlementConfig, matcher: Box<dyn MatchingStrategy>) -> Self {
        Self { config, matcher }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Compute the total, the average share and the transfers that settle
    /// every contribution. Never fails; an empty list yields an empty result.
    pub fn settle(&self, contributions: &[Contribution]) -> SettlementResult {
        if contributions.is_empty() {
            return SettlementResult::empty();
        }

        let snapshot = BalanceSnapshot::from_contributions(contributions, self.config.duplicates());
        let debtors = snapshot.debtors();
        let creditors = snapshot.creditors();
        tracing::debug!(
            participants = snapshot.participants,
            debtors = debtors.len(),
            creditors = creditors.len(),
            matcher = self.matcher.name(),
            "Balances partitioned"
        );

        let rounding = self.config.rounding();
        let payout = Payout::new(snapshot.participants, rounding);
        let transfers = self.matcher.match_balances(debtors, creditors, &payout);

        let result = SettlementResult {
            total: rounding.apply(&snapshot.total),
            average_share: rounding.apply(&snapshot.average_share),
            contributions: contributions.to_vec(),
            transfers,
        };

        tracing::debug!(
            total = %result.total,
            average_share = %result.average_share,
            transfers = result.transfers.len(),
            "Settlement computed"
        );

        result
    }

    /// Validate contributions with `validator`, then settle them
    pub fn settle_validated(
        &self,
        contributions: &[Contribution],
        validator: &dyn ContributionValidator,
    ) -> SettlementOutcome<SettlementResult> {
        validator.validate_contributions(contributions)?;
        Ok(self.settle(contributions))
    }

    /// Measure how far a result's rounded transfers drift from exact balances
    pub fn audit(&self, result: &SettlementResult) -> SettlementAudit {
        let snapshot =
            BalanceSnapshot::from_contributions(&result.contributions, self.config.duplicates());
        SettlementAudit::new(&snapshot, result, &self.config.rounding())
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SettlementEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettlementEngine")
            .field("config", &self.config)
            .field("matcher", &self.matcher.name())
            .finish()
    }
}

/// Settle contributions with the default engine: whole currency units,
/// duplicates kept separate, greedy matching.
pub fn settle(contributions: &[Contribution]) -> SettlementResult {
    SettlementEngine::default().settle(contributions)
}
