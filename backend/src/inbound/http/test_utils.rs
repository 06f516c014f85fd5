//! In-memory stub ports shared by the handler unit tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::auth::TokenCodec;
use crate::domain::ports::{
    DatabaseHealth, FeedbackRepository, IncidentRepository, NotificationRepository,
    PersistenceError, UserRepository,
};
use crate::domain::{
    Feedback, Incident, IncidentFilter, NewFeedback, NewIncidentRecord, NewUser, Notification,
    ProfileChanges, StatusCount, UserCredentials, UserIdentity,
};

use super::session::SessionSettings;
use super::state::HttpState;

pub fn test_codec() -> TokenCodec {
    TokenCodec::from_secret(b"handler-tests-secret")
}

pub fn test_settings() -> SessionSettings {
    SessionSettings {
        cookie_secure: false,
    }
}

fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().expect("valid fixture instant")
}

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub identity: UserIdentity,
    pub password_hash: String,
    pub phone: Option<String>,
}

#[derive(Default)]
pub struct StubUserRepository {
    users: Mutex<Vec<StoredUser>>,
    next_id: AtomicI32,
}

impl StubUserRepository {
    pub fn seed(&self, email: &str, password_hash: &str) -> UserIdentity {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let identity = UserIdentity {
            id,
            email: email.to_owned(),
            name: None,
            role: Some("user".into()),
        };
        self.users.lock().expect("users lock").push(StoredUser {
            identity: identity.clone(),
            password_hash: password_hash.to_owned(),
            phone: None,
        });
        identity
    }

    pub fn stored(&self, id: i32) -> Option<StoredUser> {
        self.users
            .lock()
            .expect("users lock")
            .iter()
            .find(|u| u.identity.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .find(|u| u.identity.email.eq_ignore_ascii_case(email))
            .map(|u| UserCredentials {
                identity: u.identity.clone(),
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn find_identity(&self, id: i32) -> Result<Option<UserIdentity>, PersistenceError> {
        Ok(self.stored(id).map(|u| u.identity))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, PersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .any(|u| u.identity.email.eq_ignore_ascii_case(email)))
    }

    async fn email_taken_by_other(
        &self,
        email: &str,
        user_id: i32,
    ) -> Result<bool, PersistenceError> {
        Ok(self
            .users
            .lock()
            .expect("users lock")
            .iter()
            .any(|u| u.identity.id != user_id && u.identity.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: NewUser) -> Result<UserIdentity, PersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        if users
            .iter()
            .any(|u| u.identity.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(PersistenceError::unique_violation(
                "duplicate key value violates unique constraint \"users_email_lower_idx\"",
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let identity = UserIdentity {
            id,
            email: user.email,
            name: user.name,
            role: Some("user".into()),
        };
        users.push(StoredUser {
            identity: identity.clone(),
            password_hash: user.password_hash,
            phone: user.phone,
        });
        Ok(identity)
    }

    async fn update_profile(
        &self,
        user_id: i32,
        changes: ProfileChanges,
    ) -> Result<(), PersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        let Some(user) = users.iter_mut().find(|u| u.identity.id == user_id) else {
            return Ok(());
        };
        if let Some(name) = changes.name {
            user.identity.name = Some(name);
        }
        if let Some(phone) = changes.phone {
            user.phone = Some(phone);
        }
        if let Some(email) = changes.email {
            user.identity.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct StubIncidentRepository {
    incidents: Mutex<Vec<Incident>>,
    next_id: AtomicI32,
}

impl StubIncidentRepository {
    pub fn seed(&self, owner_id: i32, title: &str, status: &str) -> Incident {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let incident = Incident {
            id,
            title: title.to_owned(),
            category: None,
            location: None,
            description: None,
            user_id: owner_id,
            created_at: Some(fixed_instant() + chrono::Duration::minutes(i64::from(id))),
            status: status.to_owned(),
            priority: "Media".to_owned(),
            latitude: -0.9536,
            longitude: -80.7286,
            photos: Vec::new(),
        };
        self.incidents
            .lock()
            .expect("incidents lock")
            .push(incident.clone());
        incident
    }

    fn snapshot_newest_first(&self) -> Vec<Incident> {
        let mut all = self.incidents.lock().expect("incidents lock").clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }
}

#[async_trait]
impl IncidentRepository for StubIncidentRepository {
    async fn create(&self, record: NewIncidentRecord) -> Result<Incident, PersistenceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let incident = Incident {
            id,
            title: record.title,
            category: record.category,
            location: record.location,
            description: record.description,
            user_id: record.owner_id,
            created_at: Some(fixed_instant() + chrono::Duration::minutes(i64::from(id))),
            status: record.status,
            priority: record.priority,
            latitude: record.latitude,
            longitude: record.longitude,
            photos: record.photos,
        };
        self.incidents
            .lock()
            .expect("incidents lock")
            .push(incident.clone());
        Ok(incident)
    }

    async fn list(&self, filter: IncidentFilter) -> Result<Vec<Incident>, PersistenceError> {
        Ok(self
            .snapshot_newest_first()
            .into_iter()
            .filter(|i| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| i.category.as_deref() == Some(c))
                    && filter.status.as_ref().is_none_or(|s| &i.status == s)
                    && filter.priority.as_ref().is_none_or(|p| &i.priority == p)
                    && filter
                        .location
                        .as_ref()
                        .is_none_or(|l| i.location.as_deref() == Some(l))
            })
            .take(200)
            .collect())
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Incident>, PersistenceError> {
        Ok(self
            .snapshot_newest_first()
            .into_iter()
            .filter(|i| i.user_id == owner_id)
            .take(200)
            .collect())
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        Ok(self.incidents.lock().expect("incidents lock").len() as i64)
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>, PersistenceError> {
        let mut counts: Vec<StatusCount> = Vec::new();
        for incident in self.incidents.lock().expect("incidents lock").iter() {
            let status = incident.status.to_lowercase();
            match counts.iter_mut().find(|c| c.status == status) {
                Some(entry) => entry.count += 1,
                None => counts.push(StatusCount { status, count: 1 }),
            }
        }
        Ok(counts)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Incident>, PersistenceError> {
        Ok(self
            .snapshot_newest_first()
            .into_iter()
            .take(usize::try_from(limit).unwrap_or_default())
            .collect())
    }
}

#[derive(Default)]
pub struct StubNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicI32,
}

impl StubNotificationRepository {
    pub fn seed(&self, owner_id: i32, title: &str) -> Notification {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let notification = Notification {
            id,
            user_id: owner_id,
            title: title.to_owned(),
            message: "mensaje".to_owned(),
            category: "info".to_owned(),
            read: false,
            created_at: Some(fixed_instant()),
        };
        self.notifications
            .lock()
            .expect("notifications lock")
            .push(notification.clone());
        notification
    }

    pub fn stored(&self, id: i32) -> Option<Notification> {
        self.notifications
            .lock()
            .expect("notifications lock")
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }
}

#[async_trait]
impl NotificationRepository for StubNotificationRepository {
    async fn list_for_owner(&self, owner_id: i32) -> Result<Vec<Notification>, PersistenceError> {
        let mut owned: Vec<Notification> = self
            .notifications
            .lock()
            .expect("notifications lock")
            .iter()
            .filter(|n| n.user_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.id.cmp(&a.id));
        owned.truncate(200);
        Ok(owned)
    }

    async fn set_read(
        &self,
        id: i32,
        owner_id: i32,
        read: bool,
    ) -> Result<Option<Notification>, PersistenceError> {
        let mut notifications = self.notifications.lock().expect("notifications lock");
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == owner_id)
        {
            Some(notification) => {
                notification.read = read;
                Ok(Some(notification.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct StubFeedbackRepository {
    entries: Mutex<Vec<Feedback>>,
    next_id: AtomicI32,
}

impl StubFeedbackRepository {
    pub fn entries(&self) -> Vec<Feedback> {
        self.entries.lock().expect("feedback lock").clone()
    }
}

#[async_trait]
impl FeedbackRepository for StubFeedbackRepository {
    async fn create(&self, entry: NewFeedback) -> Result<Feedback, PersistenceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let feedback = Feedback {
            id,
            category: entry.category,
            message: entry.message,
            user_id: entry.user_id,
            name: entry.name,
            email: entry.email,
            phone: entry.phone,
            created_at: fixed_instant(),
        };
        self.entries
            .lock()
            .expect("feedback lock")
            .push(feedback.clone());
        Ok(feedback)
    }
}

pub struct StubDatabaseHealth;

#[async_trait]
impl DatabaseHealth for StubDatabaseHealth {
    async fn ping(&self) -> Result<DateTime<Utc>, PersistenceError> {
        Ok(fixed_instant())
    }
}

/// Handles to the stub ports plus the assembled handler state.
pub struct TestState {
    pub state: HttpState,
    pub users: Arc<StubUserRepository>,
    pub incidents: Arc<StubIncidentRepository>,
    pub notifications: Arc<StubNotificationRepository>,
    pub feedback: Arc<StubFeedbackRepository>,
}

pub fn stub_state() -> TestState {
    let users = Arc::new(StubUserRepository::default());
    let incidents = Arc::new(StubIncidentRepository::default());
    let notifications = Arc::new(StubNotificationRepository::default());
    let feedback = Arc::new(StubFeedbackRepository::default());
    let state = HttpState {
        users: users.clone(),
        incidents: incidents.clone(),
        notifications: notifications.clone(),
        feedback: feedback.clone(),
        database: Arc::new(StubDatabaseHealth),
    };
    TestState {
        state,
        users,
        incidents,
        notifications,
        feedback,
    }
}
