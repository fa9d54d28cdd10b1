pub mod api;
pub mod error;
pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sen_core::clock::Clock;
use sen_core::commands::CommandRunner;
use sen_core::config::StoreTables;
use sen_core::store::Store;
use tower_http::trace::TraceLayer;

use crate::error::AppError;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the store credentials were not configured.
    pub store: Option<Arc<dyn Store>>,
    pub clock: Arc<dyn Clock>,
    pub commands: Arc<dyn CommandRunner>,
    pub identity_path: PathBuf,
    pub tables: StoreTables,
}

impl AppState {
    pub(crate) fn store(&self) -> Result<Arc<dyn Store>, AppError> {
        self.store.clone().ok_or_else(|| {
            tracing::warn!("Store client is not configured");
            AppError::Unavailable("service unavailable")
        })
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/create-agent", post(handlers::create_agent))
        .route("/execute", post(handlers::execute))
        .route("/heartbeat", get(handlers::heartbeat))
        .route("/log-lead", post(handlers::log_lead))
        .route("/register", get(handlers::register))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
