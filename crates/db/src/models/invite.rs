//! Member invite entity.

use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `invites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invite {
    pub id: DbId,
    pub organization_id: DbId,
    pub email: String,
    pub role: String,
    /// Opaque token the invitee presents when accepting.
    /// Never serialized to API responses.
    #[serde(skip_serializing)]
    pub token: String,
    pub invited_by: DbId,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inviting one member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvite {
    pub email: String,
    pub role: String,
}

/// One row of a batch (CSV-shaped) invite request.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchInviteRow {
    pub email: String,
    pub role: String,
}
