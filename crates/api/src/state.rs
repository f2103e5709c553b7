use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Request-scoped identity is NOT stored here -- it arrives through the
/// `AuthUser` extractor, so handlers never consult ambient auth state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: liftdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound HTTP client for the Facebook Graph API.
    pub http: reqwest::Client,
}
