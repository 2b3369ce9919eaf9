//! Request extractors shared by the handlers.
//!
//! - **client** - `ClientFingerprint`, the salted IP + user-agent hash
//! - **admin** - `AdminAccess`, the `X-Admin-Token` guard
//! - **json** - `JsonBody`, a JSON body extractor whose rejections use the
//!   API's error format

pub mod admin;
pub mod client;
pub mod json;

use sha2::{Digest, Sha256};

/// Compares digests so the comparison time does not depend on the secret.
pub fn tokens_match(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}
