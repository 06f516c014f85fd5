//! HTTP adapter: handlers, session extraction and error mapping.
//!
//! Handlers talk to the domain through the ports bundled in [`HttpState`];
//! nothing in this module touches Diesel directly.

use actix_web::{Scope, web};

pub mod auth;
pub mod error;
pub mod feedback;
pub mod health;
pub mod incidents;
pub mod notifications;
pub mod profile;
pub mod session;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use health::HealthState;
pub use session::{SESSION_COOKIE, SessionContext, SessionSettings};
pub use state::HttpState;

/// All `/api` routes. Liveness and readiness probes live outside this scope
/// so orchestration traffic bypasses the API prefix.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(auth::login)
        .service(auth::register)
        .service(auth::me)
        .service(auth::logout)
        .service(incidents::create_incident)
        .service(incidents::list_incidents)
        .service(incidents::my_incidents)
        .service(notifications::list_notifications)
        .service(notifications::mark_notification)
        .service(profile::update_profile)
        .service(feedback::submit_feedback)
        .service(stats::incident_stats)
        .service(health::database_health)
}
