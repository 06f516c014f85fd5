//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DatabaseHealth, FeedbackRepository, IncidentRepository, NotificationRepository, UserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub incidents: Arc<dyn IncidentRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub database: Arc<dyn DatabaseHealth>,
}
