//! Session token codec.
//!
//! Issues and verifies the compact, tamper-evident token carried by the
//! session cookie. Tokens are HS256-signed JWTs: the claims are readable by
//! the client but integrity-protected, and every failure mode (bad
//! signature, expiry, malformed input) collapses to "no session".

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserIdentity};

/// Fixed session lifetime: 7 days from issuance, non-renewable.
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Identity claims embedded in a session token.
///
/// Claims are used for identity only; the `role` field is carried but no
/// endpoint currently enforces role-based authorisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i32,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens with a process-wide symmetric secret.
///
/// Constructed once at startup; cloning shares the prepared keys.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from the configured signing secret.
    ///
    /// Configuration rejects absent or empty secrets before this point;
    /// there is deliberately no baked-in fallback.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a signed token for the given identity, valid for 7 days.
    pub fn issue(&self, identity: &UserIdentity) -> Result<String, Error> {
        self.issue_at(identity, Utc::now())
    }

    fn issue_at(&self, identity: &UserIdentity, issued_at: DateTime<Utc>) -> Result<String, Error> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            uid: identity.id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            role: identity.role.clone(),
            iat,
            exp: iat + SESSION_TTL_SECS,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal("error issuing session token").with_detail(err.to_string()))
    }

    /// Verify signature and expiry; `None` on any failure.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .ok()
    }
}
