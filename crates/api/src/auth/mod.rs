//! Identity verification.
//!
//! An [`IdentityVerifier`] turns a bearer token into a [`VerifiedPrincipal`]
//! (the caller's email) or fails. This server never issues tokens; it only
//! checks tokens minted by an external identity authority.
//!
//! - [`firebase`] -- RS256 Firebase Auth ID tokens, checked against Google's
//!   published signing keys.
//! - [`shared_secret`] -- HS256 tokens signed with a shared secret, for local
//!   development and tests.

pub mod firebase;
pub mod shared_secret;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AuthConfig;

/// The identity a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPrincipal {
    pub email: String,
}

/// Why a token was rejected.
///
/// Callers never see these details; every variant becomes the same 401.
/// They exist for debug logging.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("token rejected: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("unexpected signing algorithm {0:?}")]
    Algorithm(jsonwebtoken::Algorithm),

    #[error("token header has no key id")]
    MissingKeyId,

    #[error("no signing key with id {0}")]
    UnknownKey(String),

    #[error("could not fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),

    #[error("token has no email claim")]
    MissingEmail,
}

/// Validates bearer tokens against an identity authority.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedPrincipal, VerifyError>;
}

/// Claims this server reads from an identity token. Registered claims
/// (`exp`, `iat`, `aud`, `iss`) are checked by `jsonwebtoken` itself.
#[derive(Debug, Deserialize)]
pub(crate) struct IdentityClaims {
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityClaims {
    pub(crate) fn into_principal(self) -> Result<VerifiedPrincipal, VerifyError> {
        match self.email {
            Some(email) if !email.is_empty() => Ok(VerifiedPrincipal { email }),
            _ => Err(VerifyError::MissingEmail),
        }
    }
}

/// Build the verifier selected by configuration.
pub fn build_verifier(config: &AuthConfig) -> Arc<dyn IdentityVerifier> {
    match config {
        AuthConfig::Firebase {
            project_id,
            jwks_url,
            jwks_ttl_secs,
        } => Arc::new(firebase::FirebaseVerifier::new(
            project_id.clone(),
            jwks_url.clone(),
            std::time::Duration::from_secs(*jwks_ttl_secs),
        )),
        AuthConfig::SharedSecret { secret } => {
            Arc::new(shared_secret::SharedSecretVerifier::new(secret))
        }
    }
}
