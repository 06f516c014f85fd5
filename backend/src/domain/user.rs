//! User identity and credential types.
//!
//! The password hash never leaves the persistence boundary except inside
//! [`UserCredentials`], which exists solely for login verification and is
//! never serialised.

use serde::{Deserialize, Serialize};

/// Public identity of a registered user.
///
/// This is the only user shape returned to clients; it deliberately has no
/// password hash field so the invariant "a user record is never returned with
/// its hash populated" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Identity plus stored credential hash, used only during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub identity: UserIdentity,
    pub password_hash: String,
}

/// Fields required to register a new user.
///
/// `email` must already be trimmed and lowercased by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Partial profile update; every field is independently optional.
///
/// `password_hash` is the re-hashed replacement, never the raw password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl ProfileChanges {
    /// True when no field was supplied, in which case the update is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}
