//! Organization (tenant) entity model and DTOs.

use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An organization row -- the tenant boundary. One admin user, zero or more
/// trainers and members.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub admin_user_id: Option<DbId>,
    /// Facebook page connected for lead ingestion, if any.
    pub facebook_page_id: Option<String>,
    /// Page access token obtained through the OAuth callback.
    /// Never serialized to API responses.
    #[serde(skip_serializing)]
    pub facebook_page_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new organization.
#[derive(Debug, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
}

/// DTO for updating an organization. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub admin_user_id: Option<DbId>,
}
