//! Unit-of-measure model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of measure ("o'lchov birligi"), e.g. Dona, Kilogramm, Litr.
///
/// Names are stored whitespace-collapsed and capitalized; uniqueness is
/// enforced case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
