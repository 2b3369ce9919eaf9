//! Compact signed session tokens.
//!
//! Format: `base64url(json(claims)) "." base64url(hmac_sha256(secret, body))`,
//! both parts unpadded. Tokens are self-contained; the server keeps no record
//! of them until they are redeemed.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD as B64URL};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::models::SessionClaims;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }

    pub fn sign(&self, claims: &SessionClaims) -> anyhow::Result<String> {
        let body = B64URL.encode(serde_json::to_vec(claims)?);

        let mut mac = self.mac();
        mac.update(body.as_bytes());
        let signature = B64URL.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", body, signature))
    }

    /// Returns the claims if the token is well-formed, authentic and unexpired.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Option<SessionClaims> {
        let (body, signature) = token.split_once('.')?;
        if body.is_empty() || signature.is_empty() {
            return None;
        }

        let signature = B64URL.decode(signature).ok()?;
        let mut mac = self.mac();
        mac.update(body.as_bytes());
        // verify_slice checks the length and compares in constant time
        mac.verify_slice(&signature).ok()?;

        let claims: SessionClaims = serde_json::from_slice(&B64URL.decode(body).ok()?).ok()?;
        if now.timestamp_millis() > claims.expires_at {
            return None;
        }

        Some(claims)
    }
}
