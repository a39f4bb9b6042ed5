//! Unit-of-measure catalog service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::UnitOfMeasure;
use shared::validation::{normalize_name, validate_name};

use crate::error::{AppError, AppResult};

/// Service managing units of measure
#[derive(Clone)]
pub struct UnitService {
    db: PgPool,
}

/// Input for creating or renaming a unit of measure
#[derive(Debug, Deserialize)]
pub struct UnitInput {
    pub name: String,
}

#[derive(Debug, FromRow)]
struct UnitRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<UnitRow> for UnitOfMeasure {
    fn from(row: UnitRow) -> Self {
        UnitOfMeasure {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl UnitService {
    /// Create a new UnitService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a unit of measure
    pub async fn create_unit(&self, input: UnitInput) -> AppResult<UnitOfMeasure> {
        let name = checked_unit_name(&input.name)?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM units WHERE LOWER(name) = LOWER($1))",
        )
        .bind(&name)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry(name));
        }

        let row = sqlx::query_as::<_, UnitRow>(
            "INSERT INTO units (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&name)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Rename a unit of measure
    pub async fn rename_unit(&self, unit_id: Uuid, input: UnitInput) -> AppResult<UnitOfMeasure> {
        let name = checked_unit_name(&input.name)?;

        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM units WHERE LOWER(name) = LOWER($1) AND id <> $2)",
        )
        .bind(&name)
        .bind(unit_id)
        .fetch_one(&self.db)
        .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry(name));
        }

        let row = sqlx::query_as::<_, UnitRow>(
            "UPDATE units SET name = $1 WHERE id = $2 RETURNING id, name, created_at",
        )
        .bind(&name)
        .bind(unit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit of measure".to_string()))?;

        Ok(row.into())
    }

    /// List all units of measure
    pub async fn list_units(&self) -> AppResult<Vec<UnitOfMeasure>> {
        let rows = sqlx::query_as::<_, UnitRow>(
            "SELECT id, name, created_at FROM units ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Look up a unit case-insensitively, creating it on first reference.
    /// Used by the bulk-import path.
    pub async fn get_or_create(&self, name: &str) -> AppResult<UnitOfMeasure> {
        let name = checked_unit_name(name)?;

        let existing = sqlx::query_as::<_, UnitRow>(
            "SELECT id, name, created_at FROM units WHERE LOWER(name) = LOWER($1)",
        )
        .bind(&name)
        .fetch_optional(&self.db)
        .await?;

        if let Some(row) = existing {
            return Ok(row.into());
        }

        let row = sqlx::query_as::<_, UnitRow>(
            "INSERT INTO units (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&name)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}

/// Normalize a unit name and reject anything but letters
fn checked_unit_name(raw: &str) -> AppResult<String> {
    let name = normalize_name(raw);
    validate_name(&name).map_err(|_| AppError::Validation {
        field: "name".to_string(),
        message: "Unit name must contain only letters".to_string(),
        message_uz: "O'lchov birligi faqat harflardan iborat bo'lishi kerak!".to_string(),
    })?;
    Ok(name)
}
