//! Rounding drift audit for computed settlements

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::balance::BalanceSnapshot;
use crate::types::*;
use crate::utils::rounding::Rounding;

/// Per-participant comparison of exact balance against settled transfers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub identifier: String,
    /// Unrounded amount the participant should end up receiving (negative: paying)
    pub expected_delta: BigDecimal,
    /// Net amount the transfers actually move to the participant
    pub settled_delta: BigDecimal,
    /// `|expected_delta - settled_delta|`
    pub residual: BigDecimal,
}

/// Report on how closely a settlement's rounded transfers reproduce the exact
/// balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementAudit {
    pub entries: Vec<AuditEntry>,
    pub max_residual: BigDecimal,
    /// One rounding unit per participant
    pub tolerance: BigDecimal,
    pub is_within_tolerance: bool,
    pub issues: Vec<String>,
}

impl SettlementAudit {
    pub(crate) fn new(
        snapshot: &BalanceSnapshot,
        result: &SettlementResult,
        rounding: &Rounding,
    ) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut expected: HashMap<&str, BigDecimal> = HashMap::new();
        for balance in &snapshot.balances {
            let identifier = balance.identifier.as_str();
            match expected.get_mut(identifier) {
                Some(delta) => *delta += &balance.delta,
                None => {
                    order.push(identifier);
                    expected.insert(identifier, balance.delta.clone());
                }
            }
        }

        let mut issues = Vec::new();
        for transfer in &result.transfers {
            for identifier in [&transfer.from, &transfer.to] {
                if !expected.contains_key(identifier.as_str()) {
                    issues.push(format!(
                        "Transfer references unknown participant '{identifier}'"
                    ));
                }
            }
        }

        let tolerance = rounding.unit() * BigDecimal::from(snapshot.participants as u64);
        let mut max_residual = BigDecimal::zero();
        let mut entries = Vec::with_capacity(order.len());

        for identifier in order {
            let expected_delta = expected.remove(identifier).unwrap_or_default();
            let settled_delta = result.net_received(identifier);
            let residual = (&expected_delta - &settled_delta).abs();

            if residual > tolerance {
                issues.push(format!(
                    "Residual for '{identifier}' exceeds tolerance: {residual} > {tolerance}"
                ));
            }
            if residual > max_residual {
                max_residual = residual.clone();
            }

            entries.push(AuditEntry {
                identifier: identifier.to_string(),
                expected_delta,
                settled_delta,
                residual,
            });
        }

        Self {
            entries,
            max_residual,
            tolerance,
            is_within_tolerance: issues.is_empty(),
            issues,
        }
    }

    /// Audit entry for `identifier`, if it took part
    pub fn entry(&self, identifier: &str) -> Option<&AuditEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::core::SettlementEngine;
    use crate::types::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn test_audit_exact_settlement() {
        let engine = SettlementEngine::new();
        let result = engine.settle(&[
            Contribution::new("A", 300),
            Contribution::new("B", 0),
            Contribution::new("C", 0),
        ]);

        let audit = engine.audit(&result);
        assert!(audit.is_within_tolerance);
        assert_eq!(audit.max_residual, BigDecimal::from(0));
        assert_eq!(audit.tolerance, BigDecimal::from(3));
        assert_eq!(audit.entries.len(), 3);
        assert_eq!(
            audit.entry("A").unwrap().settled_delta,
            BigDecimal::from(200)
        );
    }

    #[test]
    fn test_audit_reports_rounding_drift() {
        let engine = SettlementEngine::new();
        let result = engine.settle(&[
            Contribution::new("A", 0),
            Contribution::new("B", 0),
            Contribution::new("C", 100),
        ]);

        let audit = engine.audit(&result);
        assert!(audit.is_within_tolerance);
        assert!(audit.max_residual > BigDecimal::from(0));
        assert!(audit.max_residual < BigDecimal::from(1));
        assert_eq!(audit.entry("C").unwrap().settled_delta, BigDecimal::from(66));
    }

    #[test]
    fn test_audit_flags_tampered_result() {
        let engine = SettlementEngine::new();
        let mut result = engine.settle(&[Contribution::new("A", 100), Contribution::new("B", 0)]);
        result.transfers[0].amount = BigDecimal::from(5);
        result.transfers.push(Transfer::new("B", "Z", BigDecimal::from(1)));

        let audit = engine.audit(&result);
        assert!(!audit.is_within_tolerance);
        assert_eq!(audit.issues.len(), 3);
    }

    #[test]
    fn test_audit_groups_duplicate_identifiers() {
        let engine = SettlementEngine::new();
        let result = engine.settle(&[
            Contribution::new("A", 60),
            Contribution::new("B", 0),
            Contribution::new("A", 40),
        ]);

        let audit = engine.audit(&result);
        assert_eq!(audit.entries.len(), 2);
        assert!(audit.is_within_tolerance);
    }
}
