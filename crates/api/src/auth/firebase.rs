//! Firebase Auth ID token verification.
//!
//! Firebase ID tokens are RS256 JWTs. A token is accepted when:
//!
//! - its header names a `kid` present in Google's published JWK set,
//! - the signature verifies with that key,
//! - `aud` is the Firebase project id and `iss` is
//!   `https://securetoken.google.com/<project id>`,
//! - `exp` is in the future,
//! - it carries an `email` claim.
//!
//! Signing keys rotate, so the key set is cached for a fixed TTL and
//! refetched early when a token names a key the cache does not know.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::RwLock;

use super::{IdentityClaims, IdentityVerifier, VerifiedPrincipal, VerifyError};

/// Google's JWK endpoint for Firebase Auth (securetoken) signing keys.
pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Issuer prefix for Firebase Auth ID tokens.
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Timeout for a single key-set fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

struct CachedKeys {
    set: JwkSet,
    fetched_at: Instant,
}

/// In-memory cache of the identity authority's signing keys.
struct JwksCache {
    client: reqwest::Client,
    url: String,
    ttl: Duration,
    cached: RwLock<Option<CachedKeys>>,
}

impl JwksCache {
    fn new(url: String, ttl: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Find the key for `kid`, fetching the key set if the cache is empty,
    /// stale, or does not contain `kid`.
    async fn key(&self, kid: &str) -> Result<DecodingKey, VerifyError> {
        if let Some(key) = self.cached_key(kid).await? {
            return Ok(key);
        }

        self.refresh().await?;

        self.cached_key(kid)
            .await?
            .ok_or_else(|| VerifyError::UnknownKey(kid.to_string()))
    }

    async fn cached_key(&self, kid: &str) -> Result<Option<DecodingKey>, VerifyError> {
        let guard = self.cached.read().await;
        let Some(cached) = guard.as_ref() else {
            return Ok(None);
        };
        if cached.fetched_at.elapsed() > self.ttl {
            return Ok(None);
        }
        match cached.set.find(kid) {
            Some(jwk) => Ok(Some(DecodingKey::from_jwk(jwk)?)),
            None => Ok(None),
        }
    }

    async fn refresh(&self) -> Result<(), VerifyError> {
        let set: JwkSet = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(keys = set.keys.len(), "Fetched identity signing keys");

        *self.cached.write().await = Some(CachedKeys {
            set,
            fetched_at: Instant::now(),
        });
        Ok(())
    }

    #[cfg(test)]
    async fn seed(&self, set: JwkSet) {
        *self.cached.write().await = Some(CachedKeys {
            set,
            fetched_at: Instant::now(),
        });
    }
}

/// Verifies Firebase Auth ID tokens for one project.
pub struct FirebaseVerifier {
    keys: JwksCache,
    validation: Validation,
}

impl FirebaseVerifier {
    pub fn new(project_id: String, jwks_url: String, jwks_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&project_id]);
        validation.set_issuer(&[format!("{ISSUER_PREFIX}{project_id}")]);

        Self {
            keys: JwksCache::new(jwks_url, jwks_ttl),
            validation,
        }
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedPrincipal, VerifyError> {
        // Header checks run before any key fetch.
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::Algorithm(header.alg));
        }
        let kid = header.kid.ok_or(VerifyError::MissingKeyId)?;

        let key = self.keys.key(&kid).await?;
        let data = decode::<IdentityClaims>(token, &key, &self.validation)?;
        data.claims.into_principal()
    }
}
