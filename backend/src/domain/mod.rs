//! Domain types and pure rules.
//!
//! Purpose: define the transport-agnostic entities (users, incidents,
//! notifications, feedback) together with the validation and defaulting
//! rules applied to them. Inbound adapters map these to HTTP; outbound
//! adapters persist them.

pub mod error;
pub mod feedback;
pub mod incident;
pub mod notification;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::feedback::{Feedback, NewFeedback};
pub use self::incident::{
    Incident, IncidentDraft, IncidentFilter, IncidentStats, LISTING_CAP, NewIncidentRecord,
    RECENT_COUNT, StatusCount, classify_status_counts,
};
pub use self::notification::Notification;
pub use self::user::{NewUser, ProfileChanges, UserCredentials, UserIdentity};
