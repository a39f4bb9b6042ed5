//! Error handling for the Ombor warehouse tracker
//!
//! Provides consistent error responses in English and Uzbek

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_uz: String,
    },

    #[error("Quantity must be a positive integer")]
    InvalidQuantity,

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid format for field {field}: {message}")]
    InvalidFieldFormat { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business rule errors
    #[error("Product not in stock: {0}")]
    ProductNotInStock(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_uz: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message_en: "Invalid email or password".to_string(),
                    message_uz: "Email yoki parol noto'g'ri".to_string(),
                    field: None,
                },
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "TOKEN_EXPIRED".to_string(),
                    message_en: "Token has expired".to_string(),
                    message_uz: "Token muddati tugagan".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Token is invalid".to_string(),
                    message_uz: "Token yaroqsiz".to_string(),
                    field: None,
                },
            ),
            AppError::Validation {
                field,
                message,
                message_uz,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_uz: message_uz.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidQuantity => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_QUANTITY".to_string(),
                    message_en: "Quantity must be a positive integer".to_string(),
                    message_uz: "Mahsulot miqdori nol yoki manfiy bo'lishi mumkin emas!".to_string(),
                    field: Some("quantity".to_string()),
                },
            ),
            AppError::MissingRequiredField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MISSING_REQUIRED_FIELD".to_string(),
                    message_en: format!("Field '{}' is required", field),
                    message_uz: format!("'{}' maydoni kiritilishi shart!", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidFieldFormat { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_FIELD_FORMAT".to_string(),
                    message_en: message.clone(),
                    message_uz: format!("'{}' maydoni noto'g'ri formatda!", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry(name) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message_en: format!("'{}' already exists", name),
                    message_uz: format!("'{}' bazada allaqachon mavjud!", name),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_uz: format!("{} topilmadi", resource),
                    field: None,
                },
            ),
            AppError::ProductNotInStock(name) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "PRODUCT_NOT_IN_STOCK".to_string(),
                    message_en: format!("Product '{}' has no stock on record", name),
                    message_uz: "Bu mahsulot omborda mavjud emas!".to_string(),
                    field: Some("product_id".to_string()),
                },
            ),
            AppError::InsufficientStock(name) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: format!("Insufficient stock of '{}'", name),
                    message_uz: "Omborda yetarli mahsulot mavjud emas!".to_string(),
                    field: Some("quantity".to_string()),
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_uz: "Ma'lumotlar bazasida xatolik yuz berdi".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_uz: "Xatolik yuz berdi".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_uz: "Xatolik yuz berdi".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
