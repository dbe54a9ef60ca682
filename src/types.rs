//! Core types and data structures for the settlement engine

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// One participant's contribution to a shared expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Display name of the participant; not required to be unique
    pub identifier: String,
    /// Amount the participant actually paid
    pub amount: BigDecimal,
}

impl Contribution {
    /// Create a new contribution
    pub fn new(identifier: impl Into<String>, amount: impl Into<BigDecimal>) -> Self {
        Self {
            identifier: identifier.into(),
            amount: amount.into(),
        }
    }
}

/// Where a participant stands relative to the average share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Paid less than the average share and owes money
    Debtor,
    /// Paid more than the average share and is owed money
    Creditor,
    /// Paid exactly the average share
    Settled,
}

/// Signed net position of a participant against the average share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub identifier: String,
    /// `amount - average_share`, unrounded
    pub delta: BigDecimal,
}

impl Balance {
    pub fn new(identifier: impl Into<String>, delta: BigDecimal) -> Self {
        Self {
            identifier: identifier.into(),
            delta,
        }
    }

    /// Classify the balance by the sign of its delta
    pub fn position(&self) -> Position {
        if self.delta.is_zero() {
            Position::Settled
        } else if self.delta < BigDecimal::zero() {
            Position::Debtor
        } else {
            Position::Creditor
        }
    }

    /// Absolute size of the outstanding amount
    pub fn magnitude(&self) -> BigDecimal {
        self.delta.abs()
    }
}

/// Unmatched remainder of a debtor's or creditor's balance during matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outstanding {
    pub identifier: String,
    /// Always non-negative; reaches exactly zero once fully matched
    pub remaining: BigDecimal,
}

impl From<&Balance> for Outstanding {
    fn from(balance: &Balance) -> Self {
        Self {
            identifier: balance.identifier.clone(),
            remaining: balance.magnitude(),
        }
    }
}

/// A single payment instruction from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Identifier of the paying debtor
    pub from: String,
    /// Identifier of the receiving creditor
    pub to: String,
    /// Rounded, strictly positive amount
    pub amount: BigDecimal,
}

impl Transfer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Summary produced by one settlement run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Sum of all contributions, rounded
    pub total: BigDecimal,
    /// Fair amount per participant, rounded
    pub average_share: BigDecimal,
    /// The input contributions, in input order
    pub contributions: Vec<Contribution>,
    /// Transfers in emission order
    pub transfers: Vec<Transfer>,
}

impl SettlementResult {
    /// Result for a run with no contributions
    pub fn empty() -> Self {
        Self {
            total: BigDecimal::zero(),
            average_share: BigDecimal::zero(),
            contributions: Vec::new(),
            transfers: Vec::new(),
        }
    }

    /// Number of contribution entries the run was computed from
    pub fn participant_count(&self) -> usize {
        self.contributions.len()
    }

    /// True when nobody needs to pay anybody
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Transfers paid by `identifier`
    pub fn transfers_from<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a Transfer> {
        self.transfers.iter().filter(move |t| t.from == identifier)
    }

    /// Transfers received by `identifier`
    pub fn transfers_to<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a Transfer> {
        self.transfers.iter().filter(move |t| t.to == identifier)
    }

    /// Amount received minus amount paid for `identifier`
    pub fn net_received(&self, identifier: &str) -> BigDecimal {
        let received: BigDecimal = self.transfers_to(identifier).map(|t| &t.amount).sum();
        let paid: BigDecimal = self.transfers_from(identifier).map(|t| &t.amount).sum();
        received - paid
    }
}

/// Errors raised by input validation and configuration.
///
/// `settle` itself never fails; these come from the helpers around it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettlementError {
    #[error("Contribution {index} has an empty identifier")]
    EmptyIdentifier { index: usize },
    #[error("Identifier '{identifier}' exceeds {max} characters")]
    IdentifierTooLong { identifier: String, max: usize },
    #[error("Contribution '{identifier}' has a negative amount: {amount}")]
    NegativeAmount {
        identifier: String,
        amount: BigDecimal,
    },
    #[error("Contribution '{identifier}' must have a positive amount")]
    NonPositiveAmount { identifier: String },
    #[error("At least {required} participants are required, found {found}")]
    TooFewParticipants { required: usize, found: usize },
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for fallible settlement helpers
pub type SettlementOutcome<T> = Result<T, SettlementError>;
