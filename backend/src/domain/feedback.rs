//! Feedback entity: append-only free-form messages, optionally linked to a
//! registered user and otherwise carrying anonymous contact fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i32,
    pub category: Option<String>,
    pub message: String,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when submitting feedback.
///
/// `user_id` is attached by the handler from the verified session when one
/// exists; anonymous submissions leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFeedback {
    pub category: Option<String>,
    pub message: String,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
