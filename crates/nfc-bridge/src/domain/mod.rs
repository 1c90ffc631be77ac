//! Domain layer: configuration, error taxonomy, wire types.

pub mod config;
pub mod error;
pub mod types;
