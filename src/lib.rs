//! Client for the charging-station booking REST API.
//!
//! [`api::ApiClient`] issues the requests; [`config::ClientConfig`] supplies the
//! base URL and bearer token at construction; [`models`] holds the typed payloads.
//! The `cli` module backs the `chargebook` binary.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{AppError, Result};
