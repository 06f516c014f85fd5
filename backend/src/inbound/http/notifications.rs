//! Notification handlers: per-user listing and read-state updates.

use actix_web::{HttpResponse, get, patch, web};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiResult, map_persistence};
use super::session::SessionContext;
use super::state::HttpState;

/// Read-state update body; omitting `read` marks the notification unread,
/// matching the boolean coercion of an absent field.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    #[serde(default)]
    pub read: bool,
}

/// List the caller's notifications, newest first.
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let claims = session.require()?;
    let notifications = state
        .notifications
        .list_for_owner(claims.uid)
        .await
        .map_err(|err| map_persistence("error listing notifications", err))?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// Update the read flag of one of the caller's notifications.
///
/// Targeting a notification that does not exist or belongs to someone else
/// is not an error; the update simply touches nothing and `notification`
/// comes back `null`.
#[patch("/notifications/{id}")]
pub async fn mark_notification(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<MarkReadRequest>,
) -> ApiResult<HttpResponse> {
    let claims = session.require()?;
    let notification = state
        .notifications
        .set_read(path.into_inner(), claims.uid, payload.read)
        .await
        .map_err(|err| map_persistence("error updating notification", err))?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "notification": notification })))
}
