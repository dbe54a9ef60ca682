//! Validation utilities

use bigdecimal::{BigDecimal, Zero};
use std::collections::HashSet;

use crate::traits::*;
use crate::types::*;

/// Longest identifier accepted, in characters
pub const MAX_IDENTIFIER_LEN: usize = 100;

/// Fewest contributions a strict settlement accepts
pub const MIN_PARTICIPANTS: usize = 2;

/// Validate that an identifier is usable as a display name
pub fn validate_identifier(index: usize, identifier: &str) -> SettlementOutcome<()> {
    if identifier.trim().is_empty() {
        return Err(SettlementError::EmptyIdentifier { index });
    }

    if identifier.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(SettlementError::IdentifierTooLong {
            identifier: identifier.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

/// Validate that an amount is not negative
pub fn validate_amount(identifier: &str, amount: &BigDecimal) -> SettlementOutcome<()> {
    if *amount < BigDecimal::zero() {
        Err(SettlementError::NegativeAmount {
            identifier: identifier.to_string(),
            amount: amount.clone(),
        })
    } else {
        Ok(())
    }
}

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(identifier: &str, amount: &BigDecimal) -> SettlementOutcome<()> {
    if *amount <= BigDecimal::zero() {
        Err(SettlementError::NonPositiveAmount {
            identifier: identifier.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate that enough people take part in the settlement
pub fn validate_participant_count(contributions: &[Contribution]) -> SettlementOutcome<()> {
    if contributions.len() < MIN_PARTICIPANTS {
        return Err(SettlementError::TooFewParticipants {
            required: MIN_PARTICIPANTS,
            found: contributions.len(),
        });
    }
    Ok(())
}

/// Validate that no two contributions share an identifier, ignoring case and
/// surrounding whitespace
pub fn validate_unique_identifiers(contributions: &[Contribution]) -> SettlementOutcome<()> {
    let mut seen = HashSet::new();
    for contribution in contributions {
        let key = contribution.identifier.trim().to_lowercase();
        if !seen.insert(key) {
            return Err(SettlementError::DuplicateIdentifier(
                contribution.identifier.clone(),
            ));
        }
    }
    Ok(())
}

/// Strict validator matching the rules of an interactive entry form.
///
/// Every participant needs a name and a positive amount, at least two
/// participants are required, and names must be unique regardless of case.
pub struct StrictContributionValidator;

impl ContributionValidator for StrictContributionValidator {
    fn validate_contribution(
        &self,
        index: usize,
        contribution: &Contribution,
    ) -> SettlementOutcome<()> {
        validate_identifier(index, &contribution.identifier)?;
        validate_positive_amount(&contribution.identifier, &contribution.amount)
    }

    fn validate_contributions(&self, contributions: &[Contribution]) -> SettlementOutcome<()> {
        for (index, contribution) in contributions.iter().enumerate() {
            self.validate_contribution(index, contribution)?;
        }
        validate_participant_count(contributions)?;
        validate_unique_identifiers(contributions)
    }
}
