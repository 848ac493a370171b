//! HS256 identity tokens signed with a shared secret.
//!
//! Used for local development and tests where no external identity
//! authority is available. Tokens must carry `email` and `exp`.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::{IdentityClaims, IdentityVerifier, VerifiedPrincipal, VerifyError};

pub struct SharedSecretVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SharedSecretVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl IdentityVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedPrincipal, VerifyError> {
        let data = decode::<IdentityClaims>(token, &self.key, &self.validation)?;
        data.claims.into_principal()
    }
}
