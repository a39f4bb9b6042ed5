//! Bulk spreadsheet import of incoming stock movements
//!
//! Reads CSV rows of (product, quantity, unit, amount), resolves or
//! creates the unit and product per row, and records an incoming
//! movement for each valid row. Malformed rows are skipped with a
//! collected warning instead of aborting the batch.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use shared::models::Direction;

use crate::error::{AppError, AppResult};
use crate::services::ledger::{LedgerService, RecordMovementInput};
use crate::services::product::ProductService;
use crate::services::unit::UnitService;

/// Number of columns each row must carry: product, quantity, unit, amount
const REQUIRED_COLUMNS: usize = 4;

/// Bulk import service
#[derive(Clone)]
pub struct ImportService {
    db: PgPool,
}

/// Outcome of one import attempt
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

impl ImportService {
    /// Create a new ImportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Import incoming movements from a CSV document. The first row is
    /// the header; every data row needs product, quantity, unit and
    /// amount columns. All rows of one upload share a single timestamp.
    pub async fn import_incoming_csv(&self, data: &[u8]) -> AppResult<ImportReport> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let units = UnitService::new(self.db.clone());
        let products = ProductService::new(self.db.clone());
        let ledger = LedgerService::new(self.db.clone());

        let uploaded_at = Utc::now();
        let mut report = ImportReport {
            imported: 0,
            skipped: 0,
            warnings: Vec::new(),
        };

        for (index, record) in reader.records().enumerate() {
            let line = index + 2; // 1-based, after the header row
            let record = record
                .map_err(|e| AppError::Internal(format!("Failed to parse CSV: {}", e)))?;

            let row = match parse_row(&record) {
                Ok(row) => row,
                Err(reason) => {
                    report.skip(line, reason);
                    continue;
                }
            };

            let unit = match units.get_or_create(&row.unit_name).await {
                Ok(unit) => unit,
                Err(e) => {
                    report.skip_error(line, e)?;
                    continue;
                }
            };

            let product = match products.get_or_create(&row.product_name, unit.id).await {
                Ok(product) => product,
                Err(e) => {
                    report.skip_error(line, e)?;
                    continue;
                }
            };

            let movement = RecordMovementInput {
                product_id: product.id,
                quantity: row.quantity,
                direction: Direction::Kirdi,
                recipient: None,
                destination: None,
                amount: Some(row.amount),
                recorded_at: Some(uploaded_at),
            };

            match ledger.record_movement(movement).await {
                Ok(_) => report.imported += 1,
                Err(e) => report.skip_error(line, e)?,
            }
        }

        tracing::info!(
            imported = report.imported,
            skipped = report.skipped,
            "Bulk import finished"
        );

        Ok(report)
    }
}

impl ImportReport {
    fn skip(&mut self, line: usize, reason: String) {
        tracing::warn!(line, %reason, "Skipping import row");
        self.skipped += 1;
        self.warnings.push(format!("Row {}: {}", line, reason));
    }

    /// Business-rule and validation failures become per-row warnings;
    /// anything else aborts the whole import attempt.
    fn skip_error(&mut self, line: usize, error: AppError) -> AppResult<()> {
        match error {
            AppError::DatabaseError(_) | AppError::Internal(_) | AppError::InternalError(_) => {
                Err(error)
            }
            recoverable => {
                self.skip(line, recoverable.to_string());
                Ok(())
            }
        }
    }
}

struct ImportRow {
    product_name: String,
    quantity: i64,
    unit_name: String,
    amount: Decimal,
}

fn parse_row(record: &csv::StringRecord) -> Result<ImportRow, String> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            REQUIRED_COLUMNS,
            record.len()
        ));
    }

    let product_name = record.get(0).unwrap_or_default().to_string();
    let quantity_raw = record.get(1).unwrap_or_default();
    let unit_name = record.get(2).unwrap_or_default().to_string();
    let amount_raw = record.get(3).unwrap_or_default();

    if product_name.is_empty() || quantity_raw.is_empty() || unit_name.is_empty() {
        return Err("incomplete row".to_string());
    }

    let quantity: i64 = quantity_raw
        .parse()
        .map_err(|_| format!("quantity '{}' is not an integer", quantity_raw))?;
    if quantity <= 0 {
        return Err(format!("quantity '{}' must be positive", quantity_raw));
    }

    let amount: Decimal = amount_raw
        .parse()
        .map_err(|_| format!("amount '{}' is not a number", amount_raw))?;
    if amount <= Decimal::ZERO {
        return Err(format!("amount '{}' must be positive", amount_raw));
    }

    Ok(ImportRow {
        product_name,
        quantity,
        unit_name,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_row_valid() {
        let row = parse_row(&record(&["Bolt", "100", "Dona", "2500.50"])).unwrap();
        assert_eq!(row.product_name, "Bolt");
        assert_eq!(row.quantity, 100);
        assert_eq!(row.unit_name, "Dona");
        assert_eq!(row.amount, Decimal::new(250050, 2));
    }

    #[test]
    fn test_parse_row_short() {
        assert!(parse_row(&record(&["Bolt", "100"])).is_err());
    }

    #[test]
    fn test_parse_row_empty_fields() {
        assert!(parse_row(&record(&["", "100", "Dona", "10"])).is_err());
        assert!(parse_row(&record(&["Bolt", "", "Dona", "10"])).is_err());
    }

    #[test]
    fn test_parse_row_bad_quantity() {
        assert!(parse_row(&record(&["Bolt", "ten", "Dona", "10"])).is_err());
        assert!(parse_row(&record(&["Bolt", "0", "Dona", "10"])).is_err());
        assert!(parse_row(&record(&["Bolt", "-5", "Dona", "10"])).is_err());
    }

    #[test]
    fn test_parse_row_bad_amount() {
        assert!(parse_row(&record(&["Bolt", "10", "Dona", "abc"])).is_err());
        assert!(parse_row(&record(&["Bolt", "10", "Dona", "-1"])).is_err());
        assert!(parse_row(&record(&["Bolt", "10", "Dona", "0"])).is_err());
    }
}
