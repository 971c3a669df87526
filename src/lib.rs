//! Core library exports for the category service.
//!
//! With the `data` feature the crate exposes the domain, Diesel models and
//! repositories. The `server` feature adds forms, DTOs, services and the
//! Actix-web routes that make up the HTTP API.

pub mod db;
pub mod domain;
mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
