//! Browser front end for the exoscope workflow: classification form,
//! habitability form and the combined planet report.

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod config;
pub mod error;
mod routes;
pub mod starfield;
pub mod state;
mod templates;

use state::AppState;

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::home))
        .route(
            "/predict",
            get(routes::classification::form).post(routes::classification::submit),
        )
        .route(
            "/habitability",
            get(routes::habitability::form).post(routes::habitability::submit),
        )
        .route("/planet-report", get(routes::report::report))
        .route("/health", get(routes::health::health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}
