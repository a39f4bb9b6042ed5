//! Ledger engine: records stock movements and keeps balances in sync
//!
//! Every recorded movement appends exactly one history entry and upserts
//! the product's balance snapshot, inside one transaction. The balance
//! row is locked for the duration so two movements against the same
//! product cannot both pass the sufficiency check on a stale balance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::ledger::{next_balance, LedgerError};
use shared::models::{Direction, HistoryEntry};
use shared::validation::{
    normalize_destination, normalize_recipient, validate_destination, validate_recipient,
};

use crate::error::{AppError, AppResult};

/// Ledger service maintaining movement history and balance snapshots
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

/// Input for recording a stock movement
#[derive(Debug, Clone, Deserialize)]
pub struct RecordMovementInput {
    pub product_id: Uuid,
    pub quantity: i64,
    pub direction: Direction,
    pub recipient: Option<String>,
    pub destination: Option<String>,
    pub amount: Option<Decimal>,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// History row as stored; direction is kept as text in the database
#[derive(Debug, FromRow)]
struct HistoryRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i64,
    qoldiq: i64,
    direction: String,
    recipient: Option<String>,
    destination: Option<String>,
    amount: Option<Decimal>,
    recorded_at: DateTime<Utc>,
}

impl HistoryRow {
    fn into_entry(self) -> AppResult<HistoryEntry> {
        let direction = Direction::parse(&self.direction).ok_or_else(|| {
            AppError::Internal(format!("Unknown direction in history: {}", self.direction))
        })?;
        Ok(HistoryEntry {
            id: self.id,
            product_id: self.product_id,
            quantity: self.quantity,
            qoldiq: self.qoldiq,
            direction,
            recipient: self.recipient,
            destination: self.destination,
            amount: self.amount,
            recorded_at: self.recorded_at,
        })
    }
}

/// History entry joined with product and unit names, for list and export views
#[derive(Debug, Serialize, FromRow)]
pub struct HistoryView {
    pub id: Uuid,
    pub product_name: String,
    pub unit_name: String,
    pub quantity: i64,
    pub qoldiq: i64,
    pub direction: String,
    pub recipient: Option<String>,
    pub destination: Option<String>,
    pub amount: Option<Decimal>,
    pub recorded_at: DateTime<Utc>,
}

/// Balance snapshot joined with product and unit names
#[derive(Debug, Serialize, FromRow)]
pub struct BalanceView {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_name: String,
    pub qoldiq: i64,
    pub updated_at: DateTime<Utc>,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a stock movement: validate it, append the history entry and
    /// upsert the balance snapshot. All-or-nothing; validation failures
    /// happen before any write.
    pub async fn record_movement(&self, input: RecordMovementInput) -> AppResult<HistoryEntry> {
        if input.quantity <= 0 {
            return Err(AppError::InvalidQuantity);
        }

        let (recipient, destination) = match input.direction {
            Direction::Chiqdi => {
                let recipient = normalized_required_field(
                    input.recipient.as_deref(),
                    "recipient",
                    validate_recipient,
                    normalize_recipient,
                )?;
                let destination = normalized_required_field(
                    input.destination.as_deref(),
                    "destination",
                    validate_destination,
                    normalize_destination,
                )?;
                (Some(recipient), Some(destination))
            }
            Direction::Kirdi => (None, None),
        };

        let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);

        let mut tx = self.db.begin().await?;

        let product_name =
            sqlx::query_scalar::<_, String>("SELECT name FROM products WHERE id = $1")
                .bind(input.product_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        // Lock the snapshot row so concurrent movements on this product
        // serialize their read-validate-write sequence
        let snapshot = sqlx::query_scalar::<_, i64>(
            "SELECT qoldiq FROM balances WHERE product_id = $1 FOR UPDATE",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        if input.direction == Direction::Chiqdi {
            match snapshot {
                None => return Err(AppError::ProductNotInStock(product_name)),
                Some(qoldiq) if input.quantity > qoldiq => {
                    return Err(AppError::InsufficientStock(product_name))
                }
                Some(_) => {}
            }
        }

        // The latest history entry is the authoritative running value;
        // re-derive the new balance from it rather than the snapshot
        let previous = latest_qoldiq(&mut tx, input.product_id).await?;
        let new_qoldiq = next_balance(previous, input.direction, input.quantity)
            .map_err(|e| ledger_error(e, &product_name))?;

        let row = sqlx::query_as::<_, HistoryRow>(
            r#"
            INSERT INTO history (
                product_id, quantity, qoldiq, direction, recipient, destination,
                amount, recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, product_id, quantity, qoldiq, direction, recipient,
                      destination, amount, recorded_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(new_qoldiq)
        .bind(input.direction.as_str())
        .bind(&recipient)
        .bind(&destination)
        .bind(input.amount)
        .bind(recorded_at)
        .fetch_one(&mut *tx)
        .await?;

        // updated_at is the refresh time, not the movement's recorded_at
        sqlx::query(
            r#"
            INSERT INTO balances (product_id, qoldiq, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (product_id) DO UPDATE SET qoldiq = $2, updated_at = NOW()
            "#,
        )
        .bind(input.product_id)
        .bind(new_qoldiq)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_entry()
    }

    /// Get the balance snapshot for a product
    pub async fn get_balance(&self, product_id: Uuid) -> AppResult<BalanceView> {
        sqlx::query_as::<_, BalanceView>(
            r#"
            SELECT b.product_id, p.name AS product_name, u.name AS unit_name,
                   b.qoldiq, b.updated_at
            FROM balances b
            JOIN products p ON p.id = b.product_id
            JOIN units u ON u.id = p.unit_id
            WHERE b.product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Balance".to_string()))
    }

    /// List balance snapshots for all products with stock on record
    pub async fn list_balances(&self) -> AppResult<Vec<BalanceView>> {
        let balances = sqlx::query_as::<_, BalanceView>(
            r#"
            SELECT b.product_id, p.name AS product_name, u.name AS unit_name,
                   b.qoldiq, b.updated_at
            FROM balances b
            JOIN products p ON p.id = b.product_id
            JOIN units u ON u.id = p.unit_id
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(balances)
    }

    /// Get movement history for a product, newest first
    pub async fn get_history(&self, product_id: Uuid) -> AppResult<Vec<HistoryView>> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let entries = sqlx::query_as::<_, HistoryView>(
            r#"
            SELECT h.id, p.name AS product_name, u.name AS unit_name,
                   h.quantity, h.qoldiq, h.direction, h.recipient, h.destination,
                   h.amount, h.recorded_at
            FROM history h
            JOIN products p ON p.id = h.product_id
            JOIN units u ON u.id = p.unit_id
            WHERE h.product_id = $1
            ORDER BY h.seq DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    /// List the full movement history, newest first
    pub async fn list_history(&self) -> AppResult<Vec<HistoryView>> {
        let entries = sqlx::query_as::<_, HistoryView>(
            r#"
            SELECT h.id, p.name AS product_name, u.name AS unit_name,
                   h.quantity, h.qoldiq, h.direction, h.recipient, h.destination,
                   h.amount, h.recorded_at
            FROM history h
            JOIN products p ON p.id = h.product_id
            JOIN units u ON u.id = p.unit_id
            ORDER BY h.seq DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}

/// Fetch the qoldiq of the most recent history entry inside the
/// transaction. "Most recent" is insertion order (seq), not
/// recorded_at: a caller may backdate recorded_at, and a backdated
/// entry must still carry the running balance forward.
async fn latest_qoldiq(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
) -> AppResult<Option<i64>> {
    let qoldiq = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT qoldiq FROM history
        WHERE product_id = $1
        ORDER BY seq DESC
        LIMIT 1
        "#,
    )
    .bind(product_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(qoldiq)
}

fn normalized_required_field(
    value: Option<&str>,
    field: &str,
    validate: fn(&str) -> Result<(), &'static str>,
    normalize: fn(&str) -> String,
) -> AppResult<String> {
    let raw = value
        .map(shared::validation::collapse_whitespace)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingRequiredField(field.to_string()))?;

    validate(&raw).map_err(|message| AppError::InvalidFieldFormat {
        field: field.to_string(),
        message: message.to_string(),
    })?;

    Ok(normalize(&raw))
}

fn ledger_error(error: LedgerError, product_name: &str) -> AppError {
    match error {
        LedgerError::InvalidQuantity => AppError::InvalidQuantity,
        LedgerError::ProductNotInStock => AppError::ProductNotInStock(product_name.to_string()),
        LedgerError::InsufficientStock => AppError::InsufficientStock(product_name.to_string()),
    }
}
