//! Sales lead entity, owned by an organization.

use liftdesk_core::error::CoreError;
use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Where a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Web,
    Facebook,
    Referral,
    WalkIn,
}

impl LeadSource {
    /// Parse a source string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "web" => Ok(Self::Web),
            "facebook" => Ok(Self::Facebook),
            "referral" => Ok(Self::Referral),
            "walk_in" => Ok(Self::WalkIn),
            _ => Err(CoreError::Validation(format!(
                "Invalid lead source '{s}'. Must be one of: web, facebook, referral, walk_in"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Facebook => "facebook",
            Self::Referral => "referral",
            Self::WalkIn => "walk_in",
        }
    }
}

/// Pipeline status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
    Lost,
}

impl LeadStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "converted" => Ok(Self::Converted),
            "lost" => Ok(Self::Lost),
            _ => Err(CoreError::Validation(format!(
                "Invalid lead status '{s}'. Must be one of: new, contacted, converted, lost"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Converted => "converted",
            Self::Lost => "lost",
        }
    }
}

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: String,
    pub status: String,
    pub notes: Option<String>,
    /// Facebook `leadgen_id` for webhook-ingested leads; upsert key.
    pub facebook_leadgen_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lead through the API.
#[derive(Debug, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: LeadSource,
    pub notes: Option<String>,
}

/// DTO for updating a lead. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
}

/// Fields extracted from a Facebook lead for upsert.
#[derive(Debug, Clone)]
pub struct FacebookLead {
    pub organization_id: DbId,
    pub leadgen_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Query parameters for listing an organization's leads.
#[derive(Debug, Default, Deserialize)]
pub struct LeadQuery {
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_roundtrip() {
        for source in [
            LeadSource::Web,
            LeadSource::Facebook,
            LeadSource::Referral,
            LeadSource::WalkIn,
        ] {
            assert_eq!(LeadSource::from_str_db(source.as_str()).unwrap(), source);
        }
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Converted,
            LeadStatus::Lost,
        ] {
            assert_eq!(LeadStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_strings_rejected() {
        assert!(LeadSource::from_str_db("tiktok").is_err());
        assert!(LeadStatus::from_str_db("").is_err());
    }
}
