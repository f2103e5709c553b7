use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have sensible defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Shared secret for anonymous cron invocations (`CRON_SECRET`).
    pub cron_secret: Option<String>,
    /// Facebook integration settings.
    pub facebook: FacebookConfig,
}

/// Facebook Lead Ads settings, all optional -- the webhook endpoints reject
/// traffic when the relevant secret is unset.
#[derive(Debug, Clone, Default)]
pub struct FacebookConfig {
    /// Token echoed back during webhook hub-challenge verification.
    pub verify_token: Option<String>,
    /// App secret used for `X-Hub-Signature-256` payload verification and
    /// the OAuth code exchange.
    pub app_secret: Option<String>,
    /// App id used for the OAuth code exchange.
    pub app_id: Option<String>,
    /// Fallback page access token for pages not yet connected to an
    /// organization.
    pub page_token: Option<String>,
    /// Graph API base URL. Overridable so tests can point at a stub server.
    pub graph_base_url: String,
}

/// Default Facebook Graph API base.
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v19.0";

impl FacebookConfig {
    /// Load Facebook settings from environment variables.
    ///
    /// | Env Var                 | Required | Default                            |
    /// |-------------------------|----------|------------------------------------|
    /// | `FACEBOOK_VERIFY_TOKEN` | no       | --                                 |
    /// | `FACEBOOK_APP_SECRET`   | no       | --                                 |
    /// | `FACEBOOK_APP_ID`       | no       | --                                 |
    /// | `FACEBOOK_PAGE_TOKEN`   | no       | --                                 |
    /// | `FACEBOOK_GRAPH_URL`    | no       | `https://graph.facebook.com/v19.0` |
    pub fn from_env() -> Self {
        Self {
            verify_token: std::env::var("FACEBOOK_VERIFY_TOKEN").ok(),
            app_secret: std::env::var("FACEBOOK_APP_SECRET").ok(),
            app_id: std::env::var("FACEBOOK_APP_ID").ok(),
            page_token: std::env::var("FACEBOOK_PAGE_TOKEN").ok(),
            graph_base_url: std::env::var("FACEBOOK_GRAPH_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPH_BASE_URL.to_string()),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CRON_SECRET`          | -- (cron endpoint requires auth when unset) |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            cron_secret: std::env::var("CRON_SECRET").ok(),
            facebook: FacebookConfig::from_env(),
        }
    }
}
