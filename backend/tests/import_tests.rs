//! Bulk import tests
//!
//! Tests for the CSV row pipeline: header handling, per-row skipping
//! with warnings, catalog get-or-create semantics, and the shared
//! upload timestamp.

use std::collections::HashMap;

use rust_decimal::Decimal;

use shared::ledger::next_balance;
use shared::models::Direction;
use shared::validation::normalize_name;

// ============================================================================
// In-Memory Import Simulation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct ImportedMovement {
    product: String,
    unit: String,
    quantity: i64,
    amount: Decimal,
    qoldiq: i64,
    direction: Direction,
    batch: u64,
}

#[derive(Debug, Default)]
struct ImportOutcome {
    imported: usize,
    skipped: usize,
    warnings: Vec<String>,
    movements: Vec<ImportedMovement>,
}

/// Drives the same CSV settings and row rules the import service uses,
/// recording into an in-memory ledger keyed by normalized product name.
#[derive(Debug, Default)]
struct MemoryImporter {
    // normalized product name -> (unit name, running balance)
    products: HashMap<String, (String, i64)>,
    units: Vec<String>,
    next_batch: u64,
}

impl MemoryImporter {
    fn import_csv(&mut self, data: &[u8]) -> Result<ImportOutcome, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        // All rows of one upload share this marker, like the shared
        // upload timestamp in production
        let batch = self.next_batch;
        self.next_batch += 1;

        let mut outcome = ImportOutcome::default();

        for (index, record) in reader.records().enumerate() {
            let line = index + 2;
            let record = record.map_err(|e| format!("Failed to parse CSV: {}", e))?;

            match self.import_row(&record, batch) {
                Ok(movement) => {
                    outcome.imported += 1;
                    outcome.movements.push(movement);
                }
                Err(reason) => {
                    outcome.skipped += 1;
                    outcome.warnings.push(format!("Row {}: {}", line, reason));
                }
            }
        }

        Ok(outcome)
    }

    fn import_row(
        &mut self,
        record: &csv::StringRecord,
        batch: u64,
    ) -> Result<ImportedMovement, String> {
        if record.len() < 4 {
            return Err(format!("expected 4 columns, found {}", record.len()));
        }

        let product_raw = record.get(0).unwrap_or_default();
        let quantity_raw = record.get(1).unwrap_or_default();
        let unit_raw = record.get(2).unwrap_or_default();
        let amount_raw = record.get(3).unwrap_or_default();

        if product_raw.is_empty() || quantity_raw.is_empty() || unit_raw.is_empty() {
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

        // Case-insensitive get-or-create, like the catalog services
        let product = normalize_name(product_raw);
        let unit = normalize_name(unit_raw);
        if !self.units.contains(&unit) {
            self.units.push(unit.clone());
        }

        let key = product.to_lowercase();
        let previous = self.products.get(&key).map(|(_, qoldiq)| *qoldiq);
        let qoldiq =
            next_balance(previous, Direction::Kirdi, quantity).map_err(|e| e.to_string())?;
        self.products.insert(key, (unit.clone(), qoldiq));

        Ok(ImportedMovement {
            product,
            unit,
            quantity,
            amount,
            qoldiq,
            direction: Direction::Kirdi,
            batch,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    const HEADER: &str = "product,quantity,unit,amount\n";

    fn csv_bytes(rows: &[&str]) -> Vec<u8> {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        out.into_bytes()
    }

    #[test]
    fn test_import_valid_rows() {
        let mut importer = MemoryImporter::default();
        let data = csv_bytes(&["Bolt,100,Dona,2500.50", "Gayka,40,Dona,800"]);

        let outcome = importer.import_csv(&data).unwrap();

        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.warnings.is_empty());

        let bolt = &outcome.movements[0];
        assert_eq!(bolt.product, "Bolt");
        assert_eq!(bolt.quantity, 100);
        assert_eq!(bolt.qoldiq, 100);
        assert_eq!(bolt.direction, Direction::Kirdi);
        assert_eq!(bolt.amount, Decimal::new(250050, 2));
    }

    /// All rows of one upload are marked incoming
    #[test]
    fn test_import_direction_always_incoming() {
        let mut importer = MemoryImporter::default();
        let data = csv_bytes(&["Bolt,5,Dona,10", "Sim,3,Metr,7.5"]);

        let outcome = importer.import_csv(&data).unwrap();
        assert!(outcome
            .movements
            .iter()
            .all(|m| m.direction == Direction::Kirdi));
    }

    /// Rows of one upload share a batch marker; separate uploads do not
    #[test]
    fn test_import_rows_share_upload_batch() {
        let mut importer = MemoryImporter::default();

        let first = importer
            .import_csv(&csv_bytes(&["Bolt,5,Dona,10", "Sim,3,Metr,7.5"]))
            .unwrap();
        let second = importer
            .import_csv(&csv_bytes(&["Bolt,2,Dona,4"]))
            .unwrap();

        assert_eq!(first.movements[0].batch, first.movements[1].batch);
        assert_ne!(first.movements[0].batch, second.movements[0].batch);
    }

    /// Bad rows become warnings with line numbers; good rows still land
    #[test]
    fn test_import_skips_bad_rows() {
        let mut importer = MemoryImporter::default();
        let data = csv_bytes(&[
            "Bolt,100,Dona,2500",
            "Gayka,ten,Dona,800",  // non-integer quantity
            "Sim,5,Metr",          // missing amount column
            ",5,Dona,10",          // empty product
            "Shayba,-3,Dona,10",   // negative quantity
            "Tros,8,Metr,0",       // non-positive amount
            "Vint,25,Dona,120.75",
        ]);

        let outcome = importer.import_csv(&data).unwrap();

        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.skipped, 5);
        assert_eq!(outcome.warnings.len(), 5);

        // Line numbers are 1-based and account for the header row
        assert!(outcome.warnings[0].starts_with("Row 3:"));
        assert!(outcome.warnings[1].starts_with("Row 4:"));
        assert!(outcome.warnings[4].starts_with("Row 7:"));
    }

    /// Repeated product rows accumulate into one balance
    #[test]
    fn test_import_accumulates_repeated_product() {
        let mut importer = MemoryImporter::default();
        let data = csv_bytes(&["Bolt,100,Dona,2500", "Bolt,50,Dona,1250"]);

        let outcome = importer.import_csv(&data).unwrap();

        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.movements[0].qoldiq, 100);
        assert_eq!(outcome.movements[1].qoldiq, 150);
    }

    /// Product and unit names are normalized before lookup, so casing
    /// variants resolve to one product
    #[test]
    fn test_import_normalizes_names() {
        let mut importer = MemoryImporter::default();
        let data = csv_bytes(&["bolt,10,dona,100", "BOLT,5,DONA,50"]);

        let outcome = importer.import_csv(&data).unwrap();

        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.movements[0].product, "Bolt");
        assert_eq!(outcome.movements[1].product, "Bolt");
        assert_eq!(outcome.movements[1].qoldiq, 15);
        assert_eq!(importer.units.len(), 1);
    }

    /// An upload with only a header imports nothing and warns nothing
    #[test]
    fn test_import_header_only() {
        let mut importer = MemoryImporter::default();
        let outcome = importer.import_csv(&csv_bytes(&[])).unwrap();

        assert_eq!(outcome.imported, 0);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.warnings.is_empty());
    }

    /// Cell whitespace is trimmed before validation
    #[test]
    fn test_import_trims_cells() {
        let mut importer = MemoryImporter::default();
        let data = csv_bytes(&["  Bolt  , 10 , Dona , 100 "]);

        let outcome = importer.import_csv(&data).unwrap();

        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.movements[0].product, "Bolt");
        assert_eq!(outcome.movements[0].quantity, 10);
    }
}
