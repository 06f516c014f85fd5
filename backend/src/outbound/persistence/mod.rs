//! Outbound persistence adapters backed by Diesel and PostgreSQL.

pub mod diesel_feedback_repository;
pub mod diesel_health;
pub mod diesel_incident_repository;
pub mod diesel_notification_repository;
pub mod diesel_user_repository;
mod error_mapping;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use diesel_health::DieselDatabaseHealth;
pub use diesel_incident_repository::DieselIncidentRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
