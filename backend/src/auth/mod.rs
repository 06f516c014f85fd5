//! Credential hashing and session token lifecycle.

pub mod password;
pub mod token;

pub use self::token::{Claims, SESSION_TTL_SECS, TokenCodec};
