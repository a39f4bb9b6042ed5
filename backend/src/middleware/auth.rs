//! Authentication middleware
//!
//! Validates the JWT bearer token and makes the staff identity available
//! to handlers through request extensions.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;

/// Authenticated staff member extracted from the JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: uuid::Uuid,
    pub email: String,
}

/// Authentication middleware that validates JWT tokens
/// Note: The token validation is done inline to avoid state dependency issues.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    // Get JWT secret from environment (fallback for middleware without state)
    let jwt_secret = std::env::var("OMBOR__JWT__SECRET")
        .or_else(|_| std::env::var("OMBOR_JWT_SECRET"))
        .unwrap_or_else(|_| "development-secret-key".to_string());

    let auth_user = match authenticate(token, &jwt_secret) {
        Ok(user) => user,
        Err(msg) => return unauthorized_response(&msg),
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    email: String,
    kind: String,
    exp: i64,
    iat: i64,
}

/// Validate a bearer token and extract the staff identity. Only access
/// tokens pass; refresh tokens are good for the refresh endpoint alone.
fn authenticate(token: &str, secret: &str) -> Result<AuthUser, String> {
    let claims = decode_jwt(token, secret)?;

    if claims.kind != "access" {
        return Err("Token is not an access token".to_string());
    }

    let user_id = uuid::Uuid::parse_str(&claims.sub)
        .map_err(|_| "Invalid user ID in token".to_string())?;

    Ok(AuthUser {
        user_id,
        email: claims.email,
    })
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message_en: message.to_string(),
            message_uz: "Ruxsat berilmagan".to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message_en: "Authentication required".to_string(),
                        message_uz: "Avval tizimga kirish kerak".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn signed_token(kind: &str, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "staff@example.com".to_string(),
            kind: kind.to_string(),
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_access_token_accepted() {
        let user = authenticate(&signed_token("access", "secret"), "secret").unwrap();
        assert_eq!(user.email, "staff@example.com");
    }

    #[test]
    fn test_refresh_token_rejected() {
        let result = authenticate(&signed_token("refresh", "secret"), "secret");
        assert_eq!(result.unwrap_err(), "Token is not an access token");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        assert!(authenticate(&signed_token("access", "secret"), "other").is_err());
    }
}
