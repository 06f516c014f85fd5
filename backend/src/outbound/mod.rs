//! Outbound adapters: implementations of the domain ports against external
//! systems (PostgreSQL).

pub mod persistence;
