//! Profile update handler.

use actix_web::{HttpResponse, patch, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::password;
use crate::domain::{Error, ProfileChanges};

use super::error::{ApiResult, map_persistence};
use super::session::SessionContext;
use super::state::HttpState;

/// Partial profile update; absent or blank fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Apply a partial update to the caller's profile.
///
/// Changing the email re-checks uniqueness against other accounts; a new
/// password is hashed before it reaches storage. An empty update is a
/// successful no-op.
#[patch("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<HttpResponse> {
    let claims = session.require()?;
    let UpdateProfileRequest {
        name,
        phone,
        email,
        password,
    } = payload.into_inner();

    let email = non_blank(email).map(|e| e.to_lowercase());
    if let Some(candidate) = email.as_deref() {
        let taken = state
            .users
            .email_taken_by_other(candidate, claims.uid)
            .await
            .map_err(|err| map_persistence("error updating profile", err))?;
        if taken {
            return Err(Error::conflict("email already registered"));
        }
    }

    let password_hash = match non_blank(password) {
        Some(new_password) => Some(password::hash(&new_password)?),
        None => None,
    };

    let changes = ProfileChanges {
        name: non_blank(name),
        phone: non_blank(phone),
        email,
        password_hash,
    };
    if !changes.is_empty() {
        state
            .users
            .update_profile(claims.uid, changes)
            .await
            .map_err(|err| map_persistence("error updating profile", err))?;
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
