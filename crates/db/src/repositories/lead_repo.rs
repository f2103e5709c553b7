//! Repository for the `leads` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, FacebookLead, Lead, LeadQuery, LeadSource, UpdateLead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organization_id, name, email, phone, source, status, notes, \
                       facebook_leadgen_id, created_at, updated_at";

/// Maximum page size for lead listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for lead listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead in `new` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        organization_id: DbId,
        input: &CreateLead,
    ) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (organization_id, name, email, phone, source, status, notes)
             VALUES ($1, $2, $3, $4, $5, 'new', $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(organization_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.source.as_str())
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an organization's leads with optional status/source filters,
    /// newest first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
        params: &LeadQuery,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE organization_id = $1
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR source = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(organization_id)
            .bind(params.status.map(|s| s.as_str()))
            .bind(params.source.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a lead's contact fields / status / notes.
    /// Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a webhook-ingested Facebook lead, keyed by `leadgen_id` so a
    /// redelivered webhook updates in place instead of duplicating.
    pub async fn upsert_facebook(
        pool: &PgPool,
        input: &FacebookLead,
    ) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads
                 (organization_id, name, email, phone, source, status, facebook_leadgen_id)
             VALUES ($1, $2, $3, $4, $5, 'new', $6)
             ON CONFLICT (facebook_leadgen_id) WHERE facebook_leadgen_id IS NOT NULL
             DO UPDATE SET
                 name = EXCLUDED.name,
                 email = EXCLUDED.email,
                 phone = EXCLUDED.phone,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(LeadSource::Facebook.as_str())
            .bind(&input.leadgen_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a lead. Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
