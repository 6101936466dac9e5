//! Gravatar URL resolution
//!
//! Cosmetic avatar lookup: the address is the lowercase hex SHA-256 of the
//! trimmed, lowercased email. Options: 200px, PG-rated, "mystery man"
//! fallback image.

use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Build the gravatar URL for an email address
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = hex::encode(Sha256::digest(normalized.as_bytes()));
    format!("{GRAVATAR_BASE}/{digest}?s=200&r=pg&d=mm")
}
