//! Ports implemented by outbound adapters.
//!
//! HTTP handlers depend only on these traits so they can be exercised with
//! in-memory stubs; the Diesel adapters in `outbound::persistence` provide
//! the production implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::feedback::{Feedback, NewFeedback};
use super::incident::{Incident, IncidentFilter, NewIncidentRecord, StatusCount};
use super::notification::Notification;
use super::user::{NewUser, ProfileChanges, UserCredentials, UserIdentity};

/// Failures surfaced by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// The database could not be reached or a pooled connection checked out.
    #[error("database connection error: {message}")]
    Connection { message: String },

    /// A statement failed to execute.
    #[error("database query error: {message}")]
    Query { message: String },

    /// A unique constraint rejected the write (e.g. duplicate email).
    #[error("unique constraint violated: {message}")]
    UniqueViolation { message: String },
}

impl PersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a unique-violation error with the given message.
    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::UniqueViolation {
            message: message.into(),
        }
    }
}

/// Credential and profile storage for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up identity plus stored hash by lowercased email.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError>;

    /// Look up the public identity by user id.
    async fn find_identity(&self, id: i32) -> Result<Option<UserIdentity>, PersistenceError>;

    /// Whether any user already holds this email (case-insensitive).
    async fn email_exists(&self, email: &str) -> Result<bool, PersistenceError>;

    /// Whether a user other than `user_id` holds this email.
    async fn email_taken_by_other(
        &self,
        email: &str,
        user_id: i32,
    ) -> Result<bool, PersistenceError>;

    /// Insert a new user and return the created identity.
    ///
    /// The unique index on `lower(email)` is the authoritative duplicate
    /// guard; a violation surfaces as [`PersistenceError::UniqueViolation`].
    async fn create(&self, user: NewUser) -> Result<UserIdentity, PersistenceError>;

    /// Apply a partial profile update as a single atomic write.
    async fn update_profile(
        &self,
        user_id: i32,
        changes: ProfileChanges,
    ) -> Result<(), PersistenceError>;
}

/// Incident storage and listing.
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Insert a resolved incident record; returns the stored row with its
    /// server-assigned id and timestamp.
    async fn create(&self, record: NewIncidentRecord) -> Result<Incident, PersistenceError>;

    /// Public listing with optional conjunctive filters, newest first,
    /// capped at [`crate::domain::incident::LISTING_CAP`] rows.
    async fn list(&self, filter: IncidentFilter) -> Result<Vec<Incident>, PersistenceError>;

    /// Owner-scoped listing with the same ordering and cap.
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Incident>, PersistenceError>;

    /// Unconditional incident count.
    async fn count(&self) -> Result<i64, PersistenceError>;

    /// Incident counts grouped by lowercased status text.
    async fn status_counts(&self) -> Result<Vec<StatusCount>, PersistenceError>;

    /// The `limit` most recent incidents.
    async fn recent(&self, limit: i64) -> Result<Vec<Incident>, PersistenceError>;
}

/// Notification listing and read-flag updates.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// All notifications owned by the caller, newest id first, capped.
    async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Notification>, PersistenceError>;

    /// Set the read flag, but only when the row is owned by `owner_id`.
    ///
    /// Returns `None` when no row matched (absent or foreign); that case is
    /// an empty success, not an error.
    async fn set_read(
        &self,
        id: i32,
        owner_id: i32,
        read: bool,
    ) -> Result<Option<Notification>, PersistenceError>;
}

/// Append-only feedback storage.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert a feedback message and return the stored row.
    async fn create(&self, feedback: NewFeedback) -> Result<Feedback, PersistenceError>;
}

/// Database reachability probe backing `GET /api/health/db`.
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round-trip the database and return its clock.
    async fn ping(&self) -> Result<DateTime<Utc>, PersistenceError>;
}
