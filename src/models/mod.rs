//! Defines the data structures exchanged with the booking backend.
//!
//! Each endpoint gets an explicit schema; endpoints whose payload is not
//! characterized (vehicles) are handled as raw `serde_json::Value`.

mod booking;
mod common;
mod stats;
mod station;
mod user;

pub use booking::*;
pub use common::*;
pub use stats::*;
pub use station::*;
pub use user::*;
