//! Repository for the `organizations` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization::{CreateOrganization, Organization, UpdateOrganization};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, admin_user_id, facebook_page_id, facebook_page_token, \
                       created_at, updated_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new organization, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an organization by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the organization connected to a Facebook page.
    pub async fn find_by_facebook_page(
        pool: &PgPool,
        page_id: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE facebook_page_id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(page_id)
            .fetch_optional(pool)
            .await
    }

    /// Update name/admin. Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganization,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                name = COALESCE($2, name),
                admin_user_id = COALESCE($3, admin_user_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.admin_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Store the connected Facebook page and its access token.
    pub async fn set_facebook_page(
        pool: &PgPool,
        id: DbId,
        page_id: &str,
        page_token: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                facebook_page_id = $2,
                facebook_page_token = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(page_id)
            .bind(page_token)
            .fetch_optional(pool)
            .await
    }
}
