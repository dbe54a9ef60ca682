//! Balance derivation: totals, the average share and per-participant deltas

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::config::DuplicatePolicy;
use crate::types::*;

/// Unrounded view of a settlement before matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Exact sum of all contributions
    pub total: BigDecimal,
    /// Number of participants the total is split between
    pub participants: usize,
    /// Exact `total / participants`
    pub average_share: BigDecimal,
    /// One balance per participant, in first-seen input order
    pub balances: Vec<Balance>,
    /// `amount * participants - total` per participant, same order as
    /// `balances`. Exact, so matching can test for zero.
    pub scaled_balances: Vec<Balance>,
}

impl BalanceSnapshot {
    /// Derive balances from contributions under the given duplicate policy
    pub fn from_contributions(contributions: &[Contribution], policy: DuplicatePolicy) -> Self {
        let paid: Vec<(String, BigDecimal)> = match policy {
            DuplicatePolicy::Separate => contributions
                .iter()
                .map(|c| (c.identifier.clone(), c.amount.clone()))
                .collect(),
            DuplicatePolicy::Merge => merge_by_identifier(contributions),
        };

        let total: BigDecimal = contributions.iter().map(|c| &c.amount).sum();
        let participants = paid.len();
        if participants == 0 {
            return Self {
                total,
                participants,
                average_share: BigDecimal::zero(),
                balances: Vec::new(),
                scaled_balances: Vec::new(),
            };
        }

        let count = BigDecimal::from(participants as u64);
        let average_share = &total / &count;
        let balances = paid
            .iter()
            .map(|(identifier, amount)| Balance::new(identifier.as_str(), amount - &average_share))
            .collect();
        let scaled_balances = paid
            .into_iter()
            .map(|(identifier, amount)| Balance::new(identifier, amount * &count - &total))
            .collect();

        Self {
            total,
            participants,
            average_share,
            balances,
            scaled_balances,
        }
    }

    /// Participants who paid less than the average share, in order, with
    /// participant-scaled remaining amounts
    pub fn debtors(&self) -> Vec<Outstanding> {
        self.with_position(Position::Debtor)
    }

    /// Participants who paid more than the average share, in order, with
    /// participant-scaled remaining amounts
    pub fn creditors(&self) -> Vec<Outstanding> {
        self.with_position(Position::Creditor)
    }

    fn with_position(&self, position: Position) -> Vec<Outstanding> {
        self.scaled_balances
            .iter()
            .filter(|b| b.position() == position)
            .map(Outstanding::from)
            .collect()
    }
}

/// Sum amounts per identifier, keeping the order identifiers first appear in
fn merge_by_identifier(contributions: &[Contribution]) -> Vec<(String, BigDecimal)> {
    let mut merged: Vec<(String, BigDecimal)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for contribution in contributions {
        match positions.get(contribution.identifier.as_str()) {
            Some(&pos) => merged[pos].1 += &contribution.amount,
            None => {
                positions.insert(contribution.identifier.as_str(), merged.len());
                merged.push((contribution.identifier.clone(), contribution.amount.clone()));
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_separate() {
        let contributions = vec![
            Contribution::new("A", 300),
            Contribution::new("B", 0),
            Contribution::new("C", 0),
        ];
        let snapshot = BalanceSnapshot::from_contributions(&contributions, DuplicatePolicy::Separate);

        assert_eq!(snapshot.total, BigDecimal::from(300));
        assert_eq!(snapshot.participants, 3);
        assert_eq!(snapshot.average_share, BigDecimal::from(100));
        assert_eq!(snapshot.balances[0].delta, BigDecimal::from(200));

        let debtors = snapshot.debtors();
        assert_eq!(debtors.len(), 2);
        assert_eq!(debtors[0].identifier, "B");
        assert_eq!(debtors[0].remaining, BigDecimal::from(300));
        assert_eq!(debtors[1].identifier, "C");

        let creditors = snapshot.creditors();
        assert_eq!(creditors.len(), 1);
        assert_eq!(creditors[0].remaining, BigDecimal::from(600));
    }

    #[test]
    fn test_snapshot_skips_settled() {
        let contributions = vec![
            Contribution::new("A", 100),
            Contribution::new("B", 100),
            Contribution::new("C", 100),
        ];
        let snapshot = BalanceSnapshot::from_contributions(&contributions, DuplicatePolicy::Separate);
        assert!(snapshot.debtors().is_empty());
        assert!(snapshot.creditors().is_empty());
    }

    #[test]
    fn test_snapshot_merge_duplicates() {
        let contributions = vec![
            Contribution::new("A", 60),
            Contribution::new("B", 0),
            Contribution::new("A", 40),
        ];
        let separate = BalanceSnapshot::from_contributions(&contributions, DuplicatePolicy::Separate);
        assert_eq!(separate.participants, 3);

        let merged = BalanceSnapshot::from_contributions(&contributions, DuplicatePolicy::Merge);
        assert_eq!(merged.participants, 2);
        assert_eq!(merged.total, BigDecimal::from(100));
        assert_eq!(merged.average_share, BigDecimal::from(50));
        assert_eq!(merged.balances[0], Balance::new("A", BigDecimal::from(50)));
        assert_eq!(merged.balances[1], Balance::new("B", BigDecimal::from(-50)));
    }

    #[test]
    fn test_scaled_balances_stay_exact() {
        // 20 over six people: the average 3.33... never terminates
        let contributions = vec![
            Contribution::new("C1", 10),
            Contribution::new("D1", 0),
            Contribution::new("D2", 0),
            Contribution::new("C2", 10),
            Contribution::new("D3", 0),
            Contribution::new("D4", 0),
        ];
        let snapshot = BalanceSnapshot::from_contributions(&contributions, DuplicatePolicy::Separate);

        let creditors = snapshot.creditors();
        let debtors = snapshot.debtors();
        assert_eq!(creditors[0].remaining, BigDecimal::from(40));
        assert_eq!(debtors.len(), 4);
        assert!(debtors.iter().all(|d| d.remaining == BigDecimal::from(20)));

        let owed: BigDecimal = debtors[..2].iter().map(|d| &d.remaining).sum();
        assert!((owed - &creditors[0].remaining).is_zero());
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = BalanceSnapshot::from_contributions(&[], DuplicatePolicy::Merge);
        assert_eq!(snapshot.participants, 0);
        assert_eq!(snapshot.average_share, BigDecimal::from(0));
        assert!(snapshot.balances.is_empty());
        assert!(snapshot.scaled_balances.is_empty());
    }
}
