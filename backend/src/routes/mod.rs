//! Route definitions for the Ombor warehouse tracker

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - unit-of-measure catalog
        .nest("/units", unit_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - movements and bulk import
        .nest("/movements", movement_routes())
        // Protected routes - balance snapshots
        .nest("/balances", balance_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Unit-of-measure routes (protected)
fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_units).post(handlers::create_unit))
        .route("/:unit_id", put(handlers::rename_unit))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id/movements",
            get(handlers::get_product_movements),
        )
        .route("/:product_id/balance", get(handlers::get_balance))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Movement routes (protected)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_movements).post(handlers::record_movement),
        )
        .route("/import", post(handlers::import_movements))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Balance snapshot routes (protected)
fn balance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_balances))
        .route_layer(middleware::from_fn(auth_middleware))
}
