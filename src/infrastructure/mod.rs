//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`database`] - Connection pools for the tracking and dashboard roles
//! - [`persistence`] - PostgreSQL repository implementations

pub mod database;
pub mod persistence;
