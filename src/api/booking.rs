//! Booking a station for a vehicle.

use super::client::ApiClient;
use crate::error::Result;
use crate::models::{BookingConfirmation, BookingRequest, ResourceId};
use reqwest::Method;
use tracing::info;

impl ApiClient {
    /// Books `station_id` for `vehicle_id` for the default 60 minutes.
    pub async fn book_station(
        &self,
        station_id: impl Into<ResourceId>,
        vehicle_id: impl Into<ResourceId>,
    ) -> Result<BookingConfirmation> {
        self.submit_booking(&BookingRequest::new(station_id, vehicle_id))
            .await
    }

    /// Books `station_id` for `vehicle_id` for `minutes`.
    pub async fn book_station_for(
        &self,
        station_id: impl Into<ResourceId>,
        vehicle_id: impl Into<ResourceId>,
        minutes: u32,
    ) -> Result<BookingConfirmation> {
        self.submit_booking(&BookingRequest::new(station_id, vehicle_id).with_duration(minutes))
            .await
    }

    /// `POST /book` with a prepared request.
    pub async fn submit_booking(&self, booking: &BookingRequest) -> Result<BookingConfirmation> {
        info!(
            "Booking station {} for vehicle {} ({} min)",
            booking.station_id, booking.vehicle_id, booking.duration
        );
        self.request("/book", Method::POST, Some(booking)).await
    }
}
