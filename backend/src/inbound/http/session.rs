//! Session helpers to keep HTTP handlers free of cookie plumbing.
//!
//! `SessionContext` is an extractor: it reads the session cookie, verifies
//! the token against the process-wide codec and exposes the decoded claims.
//! A missing or invalid token is simply "no session"; handlers decide
//! whether that is acceptable.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::auth::{Claims, SESSION_TTL_SECS, TokenCodec};
use crate::domain::Error;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Cookie attributes that vary by deployment.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Whether cookies carry the `Secure` attribute. On by default; local
    /// development over plain HTTP may switch it off.
    pub cookie_secure: bool,
}

/// Build the session cookie set on successful login or registration.
///
/// HTTP-only, SameSite=Lax, path `/`, max-age 7 days; the cookie is only
/// ever set with a fully issued token.
pub fn session_cookie(token: String, settings: SessionSettings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .http_only(true)
        .secure(settings.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(CookieDuration::seconds(SESSION_TTL_SECS))
        .finish()
}

/// Build the expired cookie that clears the session on logout.
pub fn removal_cookie(settings: SessionSettings) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .http_only(true)
        .secure(settings.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Verified session claims for the current request, when present.
#[derive(Debug, Clone)]
pub struct SessionContext {
    claims: Option<Claims>,
}

impl SessionContext {
    /// The verified claims, or `None` for unauthenticated requests.
    pub fn identity(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Require an authenticated caller or answer `401 Unauthorized`.
    pub fn require(&self) -> Result<&Claims, Error> {
        self.claims
            .as_ref()
            .ok_or_else(|| Error::unauthorized("not authenticated"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(codec) = req.app_data::<web::Data<TokenCodec>>() else {
            return ready(Err(
                Error::internal("session token codec not configured").into()
            ));
        };
        let claims = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| codec.verify(cookie.value()));
        ready(Ok(Self { claims }))
    }
}
