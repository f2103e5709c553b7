//! User entity model and DTOs.

use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub full_name: String,
    /// Role name: `admin`, `trainer`, or `member`.
    pub role: String,
    pub organization_id: Option<DbId>,
    /// Billing plan tag carried on the user (e.g. `"free"`, `"pro"`).
    /// The payments provider owns the actual subscription.
    pub billing_plan: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub phone: Option<String>,
    pub full_name: String,
    pub role: String,
    pub organization_id: Option<DbId>,
    pub billing_plan: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            phone: u.phone,
            full_name: u.full_name,
            role: u.role,
            organization_id: u.organization_id,
            billing_plan: u.billing_plan,
            is_active: u.is_active,
            last_login_at: u.last_login_at,
            created_at: u.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub organization_id: Option<DbId>,
    pub billing_plan: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub billing_plan: Option<String>,
    pub is_active: Option<bool>,
}
