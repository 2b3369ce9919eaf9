//! Domain logic behind the handlers.
//!
//! Everything here works on an in-memory `StateDocument` (or plain values);
//! loading and saving the document is the handlers' job.
//!
//! ## Modules
//!
//! - **sanitize** - name/contact/details cleaning and contact classification
//! - **session** - session claims for a new game run
//! - **scores** - plausibility bounds for submitted runs
//! - **leaderboard** - insertion, trimming, period standings, admin listing
//! - **catering** - catering request validation and storage
//! - **visits** - deduplicated visit counting

pub mod catering;
pub mod leaderboard;
pub mod sanitize;
pub mod scores;
pub mod session;
pub mod visits;

use sha2::{Digest, Sha256};

/// Hex SHA-256 of `value`, used for hashed rate-limit keys.
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}
