//! Refresh-token session entity.
//!
//! Only the SHA-256 hash of a refresh token is stored, so a database leak
//! does not compromise active sessions.

use liftdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `auth_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AuthSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
