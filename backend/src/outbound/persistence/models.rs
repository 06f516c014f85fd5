//! Row structs mapping between Diesel and the domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Feedback, Incident, NewFeedback, NewIncidentRecord, NewUser, Notification, ProfileChanges,
    UserCredentials, UserIdentity,
};

use super::schema::{feedback, incidents, notifications, users};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub registered_at: DateTime<Utc>,
}

impl UserRow {
    /// Public identity view; the hash stays behind.
    pub fn into_identity(self) -> UserIdentity {
        UserIdentity {
            id: self.id,
            email: self.email,
            name: self.name,
            role: Some(self.role),
        }
    }

    pub fn into_credentials(self) -> UserCredentials {
        let password_hash = self.password_hash.clone();
        UserCredentials {
            identity: self.into_identity(),
            password_hash,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl From<NewUser> for NewUserRow {
    fn from(user: NewUser) -> Self {
        Self {
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            phone: user.phone,
        }
    }
}

/// Partial profile update; `None` fields are skipped by `AsChangeset`, so
/// the generated UPDATE touches only the supplied columns.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl From<ProfileChanges> for UserChangeset {
    fn from(changes: ProfileChanges) -> Self {
        Self {
            name: changes.name,
            phone: changes.phone,
            email: changes.email,
            password_hash: changes.password_hash,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IncidentRow {
    pub id: i32,
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: serde_json::Value,
}

impl From<IncidentRow> for Incident {
    fn from(row: IncidentRow) -> Self {
        // Stored as a JSON string array; tolerate legacy shapes by dropping
        // anything that does not deserialise.
        let photos = serde_json::from_value(row.photos).unwrap_or_default();
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            location: row.location,
            description: row.description,
            user_id: row.user_id,
            created_at: row.created_at,
            status: row.status,
            priority: row.priority,
            latitude: row.latitude,
            longitude: row.longitude,
            photos,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = incidents)]
pub struct NewIncidentRow {
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: serde_json::Value,
}

impl NewIncidentRow {
    /// Stamp the record with the server-side creation time.
    pub fn from_record(record: NewIncidentRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            title: record.title,
            category: record.category,
            location: record.location,
            description: record.description,
            user_id: record.owner_id,
            created_at: Some(created_at),
            status: record.status,
            priority: record.priority,
            latitude: record.latitude,
            longitude: record.longitude,
            photos: serde_json::Value::from(record.photos),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub category: String,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            category: row.category,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackRow {
    pub id: i32,
    pub category: Option<String>,
    pub message: String,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            message: row.message,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = feedback)]
pub struct NewFeedbackRow {
    pub category: Option<String>,
    pub message: String,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<NewFeedback> for NewFeedbackRow {
    fn from(feedback: NewFeedback) -> Self {
        Self {
            category: feedback.category,
            message: feedback.message,
            user_id: feedback.user_id,
            name: feedback.name,
            email: feedback.email,
            phone: feedback.phone,
        }
    }
}
