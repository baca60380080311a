//! Utility functions used across the application.
//!
//! - [`code_generator`] - Short code generation and slug validation
//! - [`client_ip`] - Client address and header extraction

pub mod client_ip;
pub mod code_generator;
