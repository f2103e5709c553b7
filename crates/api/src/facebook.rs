//! Facebook Lead Ads plumbing: webhook payload types, payload signature
//! verification, and the Graph API client used to fetch full lead details
//! per `leadgen_id`.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::config::FacebookConfig;
use crate::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Webhook payload schema
// ---------------------------------------------------------------------------

/// Top-level webhook body: `{"object": "page", "entry": [...]}`.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub object: String,
    pub entry: Vec<WebhookEntry>,
}

/// One page entry carrying leadgen change notifications.
#[derive(Debug, Deserialize)]
pub struct WebhookEntry {
    /// The page id the changes belong to.
    pub id: String,
    pub changes: Vec<WebhookChange>,
}

/// One change notification; only `field == "leadgen"` is processed.
#[derive(Debug, Deserialize)]
pub struct WebhookChange {
    pub field: String,
    pub value: LeadgenValue,
}

/// The leadgen notification value.
#[derive(Debug, Deserialize)]
pub struct LeadgenValue {
    pub leadgen_id: String,
    pub page_id: String,
}

// ---------------------------------------------------------------------------
// Graph API lead detail
// ---------------------------------------------------------------------------

/// Full lead detail fetched from `GET /{leadgen_id}`.
#[derive(Debug, Deserialize)]
pub struct LeadDetail {
    pub id: String,
    pub field_data: Vec<LeadField>,
}

/// One `{name, values}` pair from the lead form.
#[derive(Debug, Deserialize)]
pub struct LeadField {
    pub name: String,
    pub values: Vec<String>,
}

impl LeadDetail {
    /// First value for a form field, by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.field_data
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.values.first())
            .map(String::as_str)
    }

    /// Contact name, falling back to first+last name fields, then a
    /// placeholder so ingestion never drops a lead for a missing name.
    pub fn contact_name(&self) -> String {
        if let Some(full) = self.field("full_name") {
            return full.to_string();
        }
        match (self.field("first_name"), self.field("last_name")) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => format!("Facebook lead {}", self.id),
        }
    }
}

// ---------------------------------------------------------------------------
// Signature verification
// ---------------------------------------------------------------------------

/// Verify an `X-Hub-Signature-256` header against the raw request body.
///
/// The header format is `sha256=<hex hmac>`. Comparison is over the decoded
/// bytes, so casing differences in the hex encoding do not matter.
pub fn verify_signature(app_secret: &str, body: &[u8], header: &str) -> AppResult<()> {
    let hex_digest = header.strip_prefix("sha256=").ok_or_else(|| {
        AppError::BadRequest("Malformed X-Hub-Signature-256 header".to_string())
    })?;
    let provided = hex::decode(hex_digest)
        .map_err(|_| AppError::BadRequest("Malformed X-Hub-Signature-256 header".to_string()))?;

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| AppError::InternalError(format!("HMAC init failed: {e}")))?;
    mac.update(body);
    mac.verify_slice(&provided)
        .map_err(|_| AppError::BadRequest("Webhook signature mismatch".to_string()))
}

// ---------------------------------------------------------------------------
// Graph API client
// ---------------------------------------------------------------------------

/// Fetch full lead details for a `leadgen_id` using a page access token.
pub async fn fetch_lead_detail(
    http: &reqwest::Client,
    config: &FacebookConfig,
    leadgen_id: &str,
    page_token: &str,
) -> AppResult<LeadDetail> {
    let url = format!("{}/{leadgen_id}", config.graph_base_url);
    let response = http
        .get(&url)
        .query(&[("access_token", page_token), ("fields", "id,field_data")])
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Graph API request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "Graph API returned {} for lead {leadgen_id}",
            response.status()
        )));
    }

    response
        .json::<LeadDetail>()
        .await
        .map_err(|e| AppError::Upstream(format!("Graph API response parse failed: {e}")))
}

/// Response shape of the OAuth code-for-token exchange.
#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Exchange an OAuth `code` for a page access token.
pub async fn exchange_oauth_code(
    http: &reqwest::Client,
    config: &FacebookConfig,
    code: &str,
    redirect_uri: &str,
) -> AppResult<AccessTokenResponse> {
    let app_id = config
        .app_id
        .as_deref()
        .ok_or_else(|| AppError::InternalError("FACEBOOK_APP_ID is not configured".into()))?;
    let app_secret = config
        .app_secret
        .as_deref()
        .ok_or_else(|| AppError::InternalError("FACEBOOK_APP_SECRET is not configured".into()))?;

    let url = format!("{}/oauth/access_token", config.graph_base_url);
    let response = http
        .get(&url)
        .query(&[
            ("client_id", app_id),
            ("client_secret", app_secret),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ])
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("OAuth exchange request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "OAuth exchange returned {}",
            response.status()
        )));
    }

    response
        .json::<AccessTokenResponse>()
        .await
        .map_err(|e| AppError::Upstream(format!("OAuth exchange parse failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac init");
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn valid_signature_passes() {
        let body = br#"{"object":"page","entry":[]}"#;
        let header = sign("s3cret", body);
        assert!(verify_signature("s3cret", body, &header).is_ok());
    }

    #[test]
    fn wrong_secret_fails() {
        let body = br#"{"object":"page","entry":[]}"#;
        let header = sign("other", body);
        assert!(verify_signature("s3cret", body, &header).is_err());
    }

    #[test]
    fn malformed_header_fails() {
        assert!(verify_signature("s3cret", b"{}", "md5=abcd").is_err());
        assert!(verify_signature("s3cret", b"{}", "sha256=zz").is_err());
    }

    #[test]
    fn contact_name_fallbacks() {
        let detail = LeadDetail {
            id: "99".to_string(),
            field_data: vec![
                LeadField {
                    name: "first_name".to_string(),
                    values: vec!["Sam".to_string()],
                },
                LeadField {
                    name: "last_name".to_string(),
                    values: vec!["Lee".to_string()],
                },
            ],
        };
        assert_eq!(detail.contact_name(), "Sam Lee");

        let bare = LeadDetail {
            id: "99".to_string(),
            field_data: Vec::new(),
        };
        assert_eq!(bare.contact_name(), "Facebook lead 99");
    }

    #[test]
    fn payload_schema_parses() {
        let raw = r#"{
            "object": "page",
            "entry": [{
                "id": "1789",
                "changes": [{
                    "field": "leadgen",
                    "value": {"leadgen_id": "444", "page_id": "1789"}
                }]
            }]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(raw).expect("parse");
        assert_eq!(payload.object, "page");
        assert_eq!(payload.entry[0].changes[0].value.leadgen_id, "444");
    }
}
