//! One-way salted password hashing.
//!
//! bcrypt embeds the salt and work factor in the hash, so two calls on the
//! same password produce different outputs and `verify` needs no extra
//! parameters.

use crate::domain::Error;

/// bcrypt work factor. Matches the cost the web client was tuned against.
const COST: u32 = 10;

/// Hash a password for storage.
///
/// Hashing failures are fatal to the calling request and surface as an
/// internal error.
pub fn hash(password: &str) -> Result<String, Error> {
    bcrypt::hash(password, COST)
        .map_err(|err| Error::internal("error hashing password").with_detail(err.to_string()))
}

/// Verify a password against a stored hash.
///
/// Returns `false` on mismatch and on malformed hashes; verification never
/// errors to the caller.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
