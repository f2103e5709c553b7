//! Repository for the `invites` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::invite::Invite;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organization_id, email, role, token, invited_by, accepted_at, created_at";

/// Provides operations for member invites.
pub struct InviteRepo;

impl InviteRepo {
    /// Insert a new invite, returning the created row.
    ///
    /// The `uq_invites_org_email` constraint rejects a second open invite
    /// for the same address; the API layer maps that violation to 409.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        email: &str,
        role: &str,
        token: &str,
        invited_by: DbId,
    ) -> Result<Invite, sqlx::Error> {
        let query = format!(
            "INSERT INTO invites (organization_id, email, role, token, invited_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(organization_id)
            .bind(email)
            .bind(role)
            .bind(token)
            .bind(invited_by)
            .fetch_one(pool)
            .await
    }

    /// Find an unaccepted invite by its token.
    pub async fn find_open_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Invite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invites
             WHERE token = $1 AND accepted_at IS NULL"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List an organization's invites, newest first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<Invite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invites
             WHERE organization_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Stamp an invite accepted.
    pub async fn mark_accepted(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE invites SET accepted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
