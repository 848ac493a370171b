use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::auth::firebase::GOOGLE_JWKS_URL;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and identity credentials have
/// defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum pooled database connections (default: `10`).
    pub db_max_connections: u32,
    /// Which identity authority verifies bearer tokens.
    pub auth: AuthConfig,
}

/// Identity verification settings.
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// Firebase Auth ID tokens (production).
    Firebase {
        project_id: String,
        jwks_url: String,
        jwks_ttl_secs: u64,
    },
    /// HS256 tokens signed with a shared secret (development and tests).
    SharedSecret { secret: String },
}

/// Default signing-key cache lifetime in seconds.
const DEFAULT_JWKS_TTL_SECS: u64 = 3600;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `*`                        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    ///
    /// See [`AuthConfig::from_env`] for identity settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            auth,
        }
    }
}

impl AuthConfig {
    /// Load identity settings from environment variables.
    ///
    /// | Env Var               | Required               | Default    |
    /// |-----------------------|------------------------|------------|
    /// | `AUTH_MODE`           | no                     | `firebase` |
    /// | `FIREBASE_PROJECT_ID` | firebase mode, or ...  | --         |
    /// | `FIREBASE_ADMIN_KEY`  | ... base64 service-account JSON | -- |
    /// | `FIREBASE_JWKS_URL`   | no                     | Google's securetoken JWK set |
    /// | `JWKS_CACHE_TTL_SECS` | no                     | `3600`     |
    /// | `AUTH_SHARED_SECRET`  | shared-secret mode     | --         |
    ///
    /// # Panics
    ///
    /// Panics if the selected mode's credentials are missing or malformed.
    pub fn from_env() -> Self {
        let mode = std::env::var("AUTH_MODE").unwrap_or_else(|_| "firebase".into());

        match mode.as_str() {
            "firebase" => {
                let project_id = match std::env::var("FIREBASE_PROJECT_ID") {
                    Ok(id) if !id.is_empty() => id,
                    _ => {
                        let key = std::env::var("FIREBASE_ADMIN_KEY").expect(
                            "FIREBASE_PROJECT_ID or FIREBASE_ADMIN_KEY must be set in firebase mode",
                        );
                        project_id_from_service_account(&key)
                            .unwrap_or_else(|e| panic!("Invalid FIREBASE_ADMIN_KEY: {e}"))
                    }
                };

                let jwks_url =
                    std::env::var("FIREBASE_JWKS_URL").unwrap_or_else(|_| GOOGLE_JWKS_URL.into());

                let jwks_ttl_secs: u64 = std::env::var("JWKS_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| DEFAULT_JWKS_TTL_SECS.to_string())
                    .parse()
                    .expect("JWKS_CACHE_TTL_SECS must be a valid u64");

                AuthConfig::Firebase {
                    project_id,
                    jwks_url,
                    jwks_ttl_secs,
                }
            }
            "shared-secret" => {
                let secret = std::env::var("AUTH_SHARED_SECRET")
                    .expect("AUTH_SHARED_SECRET must be set in shared-secret mode");
                assert!(!secret.is_empty(), "AUTH_SHARED_SECRET must not be empty");
                AuthConfig::SharedSecret { secret }
            }
            other => panic!("AUTH_MODE must be 'firebase' or 'shared-secret', got '{other}'"),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extract `project_id` from a base64-encoded service-account JSON key.
pub fn project_id_from_service_account(encoded: &str) -> Result<String, String> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| format!("not valid base64: {e}"))?;
    let json: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| format!("not valid JSON: {e}"))?;

    json.get("project_id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| "missing project_id".to_string())
}
