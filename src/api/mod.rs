//! Provides the client for the charging-station booking REST API.
//!
//! `client` holds the transport and error mapping; the remaining modules add
//! the operations of one resource each to [`ApiClient`].

mod booking;
mod client;
mod stations;
mod stats;
mod users;
mod vehicles;

#[cfg(test)]
mod client_test;

pub use client::*;
