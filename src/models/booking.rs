//! Station bookings (`POST /book`).

use super::common::ResourceId;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Booking length used when the caller does not pick one, in minutes.
pub const DEFAULT_BOOKING_MINUTES: u32 = 60;

/// Body of `POST /book`. Field order matches what the backend expects to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub station_id: ResourceId,
    pub vehicle_id: ResourceId,
    /// Minutes.
    pub duration: u32,
}

impl BookingRequest {
    pub fn new(station_id: impl Into<ResourceId>, vehicle_id: impl Into<ResourceId>) -> Self {
        Self {
            station_id: station_id.into(),
            vehicle_id: vehicle_id.into(),
            duration: DEFAULT_BOOKING_MINUTES,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }
}

/// Reply to a successful booking. Times are naive UTC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

impl BookingConfirmation {
    pub fn booked_for(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
