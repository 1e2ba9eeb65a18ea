//! HTTP API Layer
//!
//! REST API for the finance tracker, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource, each delegating to [`FinanceService`]
//! - **Middleware**: authentication (bearer JWT or offline identity), audit logging
//! - **Extractors**: JSON, query and path extraction with structured 400s
//! - **DTOs**: request/response bodies
//! - **Error Handling**: consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let service = FinanceService::new(Arc::new(InMemoryTable::new()));
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod extractors;
pub mod handlers;
pub mod dto;
pub mod auth;

use axum::{
    Router,
    routing::{get, patch},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_finance::FinanceService;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{budget, expense, health, overview};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: FinanceService,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(service: FinanceService, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Authenticated routes; auth runs before audit so the audit line has the user
    let api_routes = Router::new()
        .route("/expenses", get(expense::list_expenses).post(expense::create_expense))
        .route("/expenses/:id", patch(expense::update_expense).delete(expense::delete_expense))
        .route("/budget", get(budget::get_budget).put(budget::update_budget))
        .route("/overview", get(overview::get_overview))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
