//! Pure balance arithmetic for the warehouse ledger
//!
//! The running balance ("qoldiq") after a movement is derived from the
//! balance the product had before it. Keeping this free of I/O lets the
//! backend re-derive balances inside its transaction and lets tests
//! exercise every edge without a database.

use thiserror::Error;

use crate::models::Direction;

/// Rejections produced by the balance derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("product has no stock on record")]
    ProductNotInStock,

    #[error("outgoing quantity exceeds current balance")]
    InsufficientStock,
}

/// Derive the balance after applying a movement.
///
/// `previous` is the qoldiq of the most recent history entry for the
/// product, or `None` when the product has no history yet. An outgoing
/// movement with no prior history has no balance to draw down from and
/// is rejected outright.
pub fn next_balance(
    previous: Option<i64>,
    direction: Direction,
    quantity: i64,
) -> Result<i64, LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::InvalidQuantity);
    }

    match (direction, previous) {
        (Direction::Kirdi, None) => Ok(quantity),
        (Direction::Kirdi, Some(prev)) => Ok(prev + quantity),
        (Direction::Chiqdi, None) => Err(LedgerError::ProductNotInStock),
        (Direction::Chiqdi, Some(prev)) => {
            if quantity > prev {
                Err(LedgerError::InsufficientStock)
            } else {
                Ok(prev - quantity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_on_empty_ledger() {
        assert_eq!(next_balance(None, Direction::Kirdi, 100), Ok(100));
    }

    #[test]
    fn test_incoming_accumulates() {
        assert_eq!(next_balance(Some(100), Direction::Kirdi, 50), Ok(150));
    }

    #[test]
    fn test_outgoing_draws_down() {
        assert_eq!(next_balance(Some(100), Direction::Chiqdi, 30), Ok(70));
    }

    #[test]
    fn test_outgoing_exact_balance_reaches_zero() {
        assert_eq!(next_balance(Some(70), Direction::Chiqdi, 70), Ok(0));
    }

    #[test]
    fn test_outgoing_exceeding_balance_rejected() {
        assert_eq!(
            next_balance(Some(70), Direction::Chiqdi, 1000),
            Err(LedgerError::InsufficientStock)
        );
    }

    #[test]
    fn test_outgoing_without_history_rejected() {
        assert_eq!(
            next_balance(None, Direction::Chiqdi, 1),
            Err(LedgerError::ProductNotInStock)
        );
    }

    #[test]
    fn test_zero_and_negative_quantity_rejected() {
        for direction in [Direction::Kirdi, Direction::Chiqdi] {
            assert_eq!(
                next_balance(Some(10), direction, 0),
                Err(LedgerError::InvalidQuantity)
            );
            assert_eq!(
                next_balance(Some(10), direction, -5),
                Err(LedgerError::InvalidQuantity)
            );
        }
    }
}
