//! Server construction and wiring of the persistence adapters.

mod config;

pub use config::{Config, ConfigError};

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use crate::auth::TokenCodec;
use crate::inbound::http::health::{live, ready};
use crate::inbound::http::{HealthState, HttpState, SessionSettings, api_scope};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DbPool, DieselDatabaseHealth, DieselFeedbackRepository, DieselIncidentRepository,
    DieselNotificationRepository, DieselUserRepository,
};

/// Assemble the handler state from the Diesel adapters sharing one pool.
fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        incidents: Arc::new(DieselIncidentRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        feedback: Arc::new(DieselFeedbackRepository::new(pool.clone())),
        database: Arc::new(DieselDatabaseHealth::new(pool.clone())),
    }
}

/// Construct the HTTP server.
///
/// The returned [`Server`] must be awaited to drive the listener; readiness
/// is flagged once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &Config,
    pool: DbPool,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&pool));
    let codec = web::Data::new(TokenCodec::from_secret(config.session_secret.as_bytes()));
    let settings = web::Data::new(SessionSettings {
        cookie_secure: config.cookie_secure,
    });
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .app_data(codec.clone())
            .app_data(settings.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(ready)
            .service(live)
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
