//! Diesel row types mirroring `schema.rs`, plus server configuration.

pub mod category;
#[cfg(feature = "server")]
pub mod config;
