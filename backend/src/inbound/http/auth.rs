//! Authentication handlers: login, register, identity check, logout.
//!
//! ```text
//! POST /api/auth/login    {"email":"a@b.com","password":"secret123"}
//! POST /api/auth/register {"email":"a@b.com","password":"secret123","name":"Ana"}
//! GET  /api/auth/me
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{TokenCodec, password};
use crate::domain::ports::PersistenceError;
use crate::domain::{Error, NewUser, UserIdentity};

use super::error::{ApiResult, map_persistence};
use super::session::{SessionContext, SessionSettings, removal_cookie, session_cookie};
use super::state::HttpState;

/// Login request body. Both fields are required; the check is explicit so
/// the JSON envelope stays consistent with the rest of the API.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Trim an optional field, dropping it entirely when blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Normalise an email for storage and comparison.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authenticate a user and establish a session.
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    codec: web::Data<TokenCodec>,
    settings: web::Data<SessionSettings>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let (Some(email), Some(password)) = (non_blank(email), password.filter(|p| !p.is_empty()))
    else {
        return Err(Error::invalid_request("email and password are required"));
    };

    let credentials = state
        .users
        .find_credentials(&normalize_email(&email))
        .await
        .map_err(|err| map_persistence("error logging in", err))?;

    let Some(credentials) = credentials else {
        return Err(Error::unauthorized("invalid credentials"));
    };
    if !password::verify(&password, &credentials.password_hash) {
        return Err(Error::unauthorized("invalid credentials"));
    }

    let token = codec.issue(&credentials.identity)?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, *settings.get_ref()))
        .json(json!({ "user": credentials.identity })))
}

/// Register a new user and establish a session.
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    codec: web::Data<TokenCodec>,
    settings: web::Data<SessionSettings>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        name,
        phone,
    } = payload.into_inner();
    let (Some(email), Some(password)) = (non_blank(email), password.filter(|p| !p.is_empty()))
    else {
        return Err(Error::invalid_request("email and password are required"));
    };
    let email = normalize_email(&email);

    // Early exit for the common case; the unique index on lower(email) is
    // the guard that holds under concurrent registration.
    if state
        .users
        .email_exists(&email)
        .await
        .map_err(|err| map_persistence("error registering user", err))?
    {
        return Err(Error::conflict("email already registered"));
    }

    let password_hash = password::hash(&password)?;
    let identity = state
        .users
        .create(NewUser {
            email,
            password_hash,
            name: non_blank(name),
            phone: non_blank(phone),
        })
        .await
        .map_err(|err| match err {
            PersistenceError::UniqueViolation { message } => {
                Error::conflict("email already registered").with_detail(message)
            }
            other => map_persistence("error registering user", other),
        })?;

    let token = codec.issue(&identity)?;
    Ok(HttpResponse::Created()
        .cookie(session_cookie(token, *settings.get_ref()))
        .json(json!({ "user": identity })))
}

/// Return the caller's identity, or `null` when unauthenticated.
///
/// This endpoint never answers 401; "not logged in" is a valid state. The
/// identity is re-read from storage so claims issued before a profile
/// update do not serve stale fields.
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let Some(claims) = session.identity() else {
        return Ok(HttpResponse::Ok().json(json!({ "user": null })));
    };

    let user: Option<UserIdentity> = state
        .users
        .find_identity(claims.uid)
        .await
        .map_err(|err| map_persistence("error fetching user", err))?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

/// Clear the session cookie.
#[post("/auth/logout")]
pub async fn logout(settings: web::Data<SessionSettings>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(*settings.get_ref()))
        .json(json!({ "success": true }))
}
