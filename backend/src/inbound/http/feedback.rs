//! Feedback submission handler. Works with or without a session.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, NewFeedback};

use super::error::{ApiResult, map_persistence};
use super::session::SessionContext;
use super::state::HttpState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub category: Option<String>,
    #[serde(default)]
    pub message: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Store a feedback message. A logged-in caller is linked via the session;
/// anonymous callers may leave contact fields instead.
#[post("/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let FeedbackRequest {
        category,
        message,
        name,
        email,
        phone,
    } = payload.into_inner();
    let message = message.trim().to_owned();
    if message.is_empty() {
        return Err(Error::invalid_request("message is required"));
    }

    let entry = NewFeedback {
        category: non_blank(category),
        message,
        user_id: session.identity().map(|claims| claims.uid),
        name: non_blank(name),
        email: non_blank(email),
        phone: non_blank(phone),
    };
    let feedback = state
        .feedback
        .create(entry)
        .await
        .map_err(|err| map_persistence("error saving feedback", err))?;
    Ok(HttpResponse::Created().json(json!({ "feedback": feedback })))
}
