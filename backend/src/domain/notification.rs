//! Notification entity: status updates addressed to a single user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification owned by exactly one user.
///
/// Only the owner may list it or toggle its read flag; ownership is always
/// taken from the verified session, never from the request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub category: String,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
}
