//! Matching of debtors against creditors

use bigdecimal::{BigDecimal, Zero};

use crate::traits::*;
use crate::types::*;
use crate::utils::rounding::Payout;

/// One-pass two-pointer matching.
///
/// The current debtor pays the current creditor the smaller of their two
/// remaining amounts; whichever side reaches zero moves on. Produces at most
/// `debtors + creditors - 1` transfers in linear time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl MatchingStrategy for GreedyMatcher {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn match_balances(
        &self,
        mut debtors: Vec<Outstanding>,
        mut creditors: Vec<Outstanding>,
        payout: &Payout,
    ) -> Vec<Transfer> {
        let mut transfers = Vec::new();
        greedy_pass(&mut debtors, &mut creditors, payout, &mut transfers);
        transfers
    }
}

/// Greedy matching that first settles exactly offsetting pairs.
///
/// A debtor whose outstanding amount equals some creditor's is paired with the
/// first such creditor in a single transfer; everything left over goes through
/// the greedy pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPairMatcher;

impl MatchingStrategy for ExactPairMatcher {
    fn name(&self) -> &'static str {
        "exact-pair"
    }

    fn match_balances(
        &self,
        mut debtors: Vec<Outstanding>,
        mut creditors: Vec<Outstanding>,
        payout: &Payout,
    ) -> Vec<Transfer> {
        let mut transfers = Vec::new();

        for debtor in debtors.iter_mut() {
            let Some(creditor) = creditors
                .iter_mut()
                .find(|c| !c.remaining.is_zero() && c.remaining == debtor.remaining)
            else {
                continue;
            };

            let amount = std::mem::replace(&mut debtor.remaining, BigDecimal::zero());
            creditor.remaining = BigDecimal::zero();
            tracing::debug!(
                from = %debtor.identifier,
                to = %creditor.identifier,
                amount = %amount,
                "Exact pair matched"
            );
            push_transfer(&mut transfers, debtor, creditor, &amount, payout);
        }

        debtors.retain(|d| !d.remaining.is_zero());
        creditors.retain(|c| !c.remaining.is_zero());
        greedy_pass(&mut debtors, &mut creditors, payout, &mut transfers);
        transfers
    }
}

/// Two-pointer pass shared by the matchers
fn greedy_pass(
    debtors: &mut [Outstanding],
    creditors: &mut [Outstanding],
    payout: &Payout,
    transfers: &mut Vec<Transfer>,
) {
    let mut debtor_idx = 0;
    let mut creditor_idx = 0;

    while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
        let debtor = &mut debtors[debtor_idx];
        let creditor = &mut creditors[creditor_idx];

        let amount = debtor.remaining.clone().min(creditor.remaining.clone());
        push_transfer(transfers, debtor, creditor, &amount, payout);

        debtor.remaining -= &amount;
        creditor.remaining -= &amount;

        if debtor.remaining.is_zero() {
            debtor_idx += 1;
        }
        if creditor.remaining.is_zero() {
            creditor_idx += 1;
        }
    }
}

/// Record a transfer of the scaled `amount`, converted and rounded. Amounts
/// that round to zero are dropped so every emitted transfer is strictly
/// positive.
fn push_transfer(
    transfers: &mut Vec<Transfer>,
    debtor: &Outstanding,
    creditor: &Outstanding,
    amount: &BigDecimal,
    payout: &Payout,
) {
    let rounded = payout.amount(amount);
    if rounded <= BigDecimal::zero() {
        tracing::debug!(
            from = %debtor.identifier,
            to = %creditor.identifier,
            scaled_amount = %amount,
            "Transfer below rounding unit dropped"
        );
        return;
    }

    tracing::debug!(
        from = %debtor.identifier,
        to = %creditor.identifier,
        amount = %rounded,
        "Transfer matched"
    );
    transfers.push(Transfer::new(
        debtor.identifier.clone(),
        creditor.identifier.clone(),
        rounded,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rounding::Rounding;
    use bigdecimal::RoundingMode;

    fn whole_units() -> Payout {
        Payout::unscaled(Rounding::whole_units())
    }

    fn outstanding(identifier: &str, remaining: i64) -> Outstanding {
        Outstanding {
            identifier: identifier.to_string(),
            remaining: BigDecimal::from(remaining),
        }
    }

    #[test]
    fn test_greedy_single_creditor() {
        let transfers = GreedyMatcher.match_balances(
            vec![outstanding("B", 100), outstanding("C", 100)],
            vec![outstanding("A", 200)],
            &whole_units(),
        );

        assert_eq!(
            transfers,
            vec![
                Transfer::new("B", "A", BigDecimal::from(100)),
                Transfer::new("C", "A", BigDecimal::from(100)),
            ]
        );
    }

    #[test]
    fn test_greedy_splits_debtor_across_creditors() {
        let transfers = GreedyMatcher.match_balances(
            vec![outstanding("D", 90)],
            vec![outstanding("A", 30), outstanding("B", 60)],
            &whole_units(),
        );

        assert_eq!(
            transfers,
            vec![
                Transfer::new("D", "A", BigDecimal::from(30)),
                Transfer::new("D", "B", BigDecimal::from(60)),
            ]
        );
    }

    #[test]
    fn test_greedy_empty_side() {
        let transfers =
            GreedyMatcher.match_balances(vec![outstanding("D", 90)], vec![], &whole_units());
        assert!(transfers.is_empty());
    }

    #[test]
    fn test_sub_unit_transfers_are_dropped() {
        // a third of a unit each, scaled by three participants
        let transfers = GreedyMatcher.match_balances(
            vec![outstanding("A", 1), outstanding("B", 1)],
            vec![outstanding("C", 2)],
            &Payout::new(3, Rounding::whole_units()),
        );
        assert!(transfers.is_empty());
    }

    #[test]
    fn test_cursor_advances_on_exact_zero() {
        // six participants: each debtor owes 20/6, each creditor is owed 40/6
        let debtors = vec![
            outstanding("D1", 20),
            outstanding("D2", 20),
            outstanding("D3", 20),
            outstanding("D4", 20),
        ];
        let creditors = vec![outstanding("C1", 40), outstanding("C2", 40)];

        for mode in [RoundingMode::Up, RoundingMode::Ceiling] {
            let transfers = GreedyMatcher.match_balances(
                debtors.clone(),
                creditors.clone(),
                &Payout::new(6, Rounding::new(0, mode)),
            );
            assert_eq!(
                transfers,
                vec![
                    Transfer::new("D1", "C1", BigDecimal::from(4)),
                    Transfer::new("D2", "C1", BigDecimal::from(4)),
                    Transfer::new("D3", "C2", BigDecimal::from(4)),
                    Transfer::new("D4", "C2", BigDecimal::from(4)),
                ]
            );
        }
    }

    #[test]
    fn test_exact_pair_beats_greedy() {
        let debtors = vec![outstanding("D1", 30), outstanding("D2", 70)];
        let creditors = vec![outstanding("C1", 70), outstanding("C2", 30)];

        let greedy = GreedyMatcher.match_balances(
            debtors.clone(),
            creditors.clone(),
            &whole_units(),
        );
        assert_eq!(greedy.len(), 3);

        let paired =
            ExactPairMatcher.match_balances(debtors, creditors, &whole_units());
        assert_eq!(
            paired,
            vec![
                Transfer::new("D1", "C2", BigDecimal::from(30)),
                Transfer::new("D2", "C1", BigDecimal::from(70)),
            ]
        );
    }

    #[test]
    fn test_exact_pair_falls_back_to_greedy() {
        let transfers = ExactPairMatcher.match_balances(
            vec![outstanding("D1", 50), outstanding("D2", 40)],
            vec![outstanding("C1", 50), outstanding("C2", 25), outstanding("C3", 15)],
            &whole_units(),
        );

        assert_eq!(
            transfers,
            vec![
                Transfer::new("D1", "C1", BigDecimal::from(50)),
                Transfer::new("D2", "C2", BigDecimal::from(25)),
                Transfer::new("D2", "C3", BigDecimal::from(15)),
            ]
        );
    }
}
