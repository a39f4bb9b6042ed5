//! Product model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked product ("mahsulot"), denominated in one unit of measure.
///
/// Product names are unique case-insensitively on their own; two
/// products may not share a name even under different units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub unit_id: Uuid,
    pub created_at: DateTime<Utc>,
}
