//! Product catalog service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::Product;
use shared::validation::{normalize_name, validate_name};

use crate::error::{AppError, AppResult};

/// Service managing the product catalog
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub unit_id: Uuid,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    unit_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            unit_id: row.unit_id,
            created_at: row.created_at,
        }
    }
}

/// Product joined with its unit name, for list views
#[derive(Debug, Serialize, FromRow)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub unit_name: String,
    pub created_at: DateTime<Utc>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product. Product names are unique case-insensitively
    /// regardless of unit.
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        let name = checked_product_name(&input.name)?;

        let unit_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM units WHERE id = $1)")
                .bind(input.unit_id)
                .fetch_one(&self.db)
                .await?;

        if !unit_exists {
            return Err(AppError::NotFound("Unit of measure".to_string()));
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE LOWER(name) = LOWER($1))",
        )
        .bind(&name)
        .fetch_one(&self.db)
        .await?;

        if duplicate {
            return Err(AppError::DuplicateEntry(name));
        }

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, unit_id)
            VALUES ($1, $2)
            RETURNING id, name, unit_id, created_at
            "#,
        )
        .bind(&name)
        .bind(input.unit_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List all products with their unit names
    pub async fn list_products(&self) -> AppResult<Vec<ProductView>> {
        let products = sqlx::query_as::<_, ProductView>(
            r#"
            SELECT p.id, p.name, u.name AS unit_name, p.created_at
            FROM products p
            JOIN units u ON u.id = p.unit_id
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Find a product by name, case-insensitively
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, unit_id, created_at FROM products WHERE LOWER(name) = LOWER($1)",
        )
        .bind(normalize_name(name))
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Look up a product by name, creating it with the given unit on
    /// first reference. Used by the bulk-import path.
    pub async fn get_or_create(&self, name: &str, unit_id: Uuid) -> AppResult<Product> {
        if let Some(product) = self.find_by_name(name).await? {
            return Ok(product);
        }

        self.create_product(CreateProductInput {
            name: name.to_string(),
            unit_id,
        })
        .await
    }
}

/// Normalize a product name and reject anything but letters
fn checked_product_name(raw: &str) -> AppResult<String> {
    let name = normalize_name(raw);
    validate_name(&name).map_err(|_| AppError::Validation {
        field: "name".to_string(),
        message: "Product name must contain only letters".to_string(),
        message_uz: "Mahsulot nomi faqat harflardan iborat bo'lishi kerak!".to_string(),
    })?;
    Ok(name)
}
