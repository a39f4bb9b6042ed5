//! Stock movement, history and balance models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Movement direction ("amaliyot turi")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Incoming stock
    Kirdi,
    /// Outgoing stock
    Chiqdi,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Kirdi => "Kirdi",
            Direction::Chiqdi => "Chiqdi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Kirdi" => Some(Direction::Kirdi),
            "Chiqdi" => Some(Direction::Chiqdi),
            _ => None,
        }
    }
}

/// A proposed stock movement, as collected from the operator form or a
/// bulk-import row. This is the input event; recording it produces one
/// `HistoryEntry` and an upserted `BalanceSnapshot`.
#[derive(Debug, Clone, Deserialize)]
pub struct Movement {
    pub product_id: Uuid,
    pub quantity: i64,
    pub direction: Direction,
    /// Required for outgoing movements; letters and spaces, title-cased
    pub recipient: Option<String>,
    /// Required for outgoing movements; letters, digits and spaces, upper-cased
    pub destination: Option<String>,
    /// Monetary amount, supplied by the bulk-import path
    pub amount: Option<Decimal>,
    /// Defaults to submission time when absent
    pub recorded_at: Option<DateTime<Utc>>,
}

/// One append-only history row ("mahsulot balans tarixi"): the movement
/// together with the balance it resulted in. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    /// Balance after this movement was applied
    pub qoldiq: i64,
    pub direction: Direction,
    pub recipient: Option<String>,
    pub destination: Option<String>,
    pub amount: Option<Decimal>,
    pub recorded_at: DateTime<Utc>,
}

/// Current on-hand quantity for one product ("mahsulot joriy balansi").
///
/// Derived state: always equals the qoldiq of the latest history entry
/// for the product. Not writable by users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub product_id: Uuid,
    pub qoldiq: i64,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip() {
        assert_eq!(Direction::parse("Kirdi"), Some(Direction::Kirdi));
        assert_eq!(Direction::parse("Chiqdi"), Some(Direction::Chiqdi));
        assert_eq!(Direction::parse("kirdi"), None);
        assert_eq!(Direction::Kirdi.as_str(), "Kirdi");
        assert_eq!(Direction::Chiqdi.as_str(), "Chiqdi");
    }
}
