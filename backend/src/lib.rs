//! Citizen incident-reporting backend.
//!
//! The crate follows a hexagonal layout: `domain` holds the entities, rules
//! and ports; `inbound::http` adapts Actix requests onto the ports;
//! `outbound::persistence` implements them with Diesel against PostgreSQL.

pub mod auth;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
