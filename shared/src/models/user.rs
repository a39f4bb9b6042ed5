//! Staff user model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Language;

/// A staff account with access to the warehouse panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub preferred_language: Language,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
