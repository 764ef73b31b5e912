//! Common types used across the inventory pipeline

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which raw collection a record came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Product,
    Purchase,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Product => "product",
            SourceKind::Purchase => "purchase",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a numeric field was replaced with zero
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoercionFault {
    /// Field absent, null or an empty string
    Missing,
    /// Field present but not a number
    NotNumeric,
    /// Parsed, but below zero
    Negative,
}

/// Result of coercing a loosely typed source field into a decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced {
    Parsed(Decimal),
    DefaultedZero(CoercionFault),
}

impl Coerced {
    /// The value to use downstream; zero for anything that did not parse
    pub fn value(&self) -> Decimal {
        match self {
            Coerced::Parsed(v) => *v,
            Coerced::DefaultedZero(_) => Decimal::ZERO,
        }
    }

    pub fn fault(&self) -> Option<CoercionFault> {
        match self {
            Coerced::Parsed(_) => None,
            Coerced::DefaultedZero(fault) => Some(*fault),
        }
    }
}

/// A recovered numeric problem found while normalizing a record.
///
/// These never abort a computation; they travel next to the result so
/// callers can surface them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoercionWarning {
    InvalidQuantity {
        source: SourceKind,
        record_id: String,
        fault: CoercionFault,
    },
    InvalidPrice {
        source: SourceKind,
        record_id: String,
        fault: CoercionFault,
    },
}

impl std::fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoercionWarning::InvalidQuantity {
                source,
                record_id,
                fault,
            } => write!(
                f,
                "{} {}: quantity substituted with 0 ({:?})",
                source, record_id, fault
            ),
            CoercionWarning::InvalidPrice {
                source,
                record_id,
                fault,
            } => write!(
                f,
                "{} {}: price substituted with 0 ({:?})",
                source, record_id, fault
            ),
        }
    }
}

/// A value plus the warnings raised while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub warnings: Vec<CoercionWarning>,
}

/// Where a served inventory list came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Freshly reconciled from both source collections
    #[default]
    Live,
    /// Offline fallback, not authoritative
    Cached,
    /// Sources failed and nothing was cached; the list is empty
    Unavailable,
}
