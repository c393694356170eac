//! Station endpoints: list, inspect, create, update and delete.

use super::client::{ApiClient, NO_BODY};
use crate::error::Result;
use crate::models::{ActionResponse, ResourceId, Station, StationDetail, StationInput};
use reqwest::Method;
use tracing::{debug, info};

impl ApiClient {
    /// `GET /stations`, each entry flagged with whether it is currently occupied.
    pub async fn get_stations(&self) -> Result<Vec<Station>> {
        let stations: Vec<Station> = self.request("/stations", Method::GET, NO_BODY).await?;
        debug!("Received {} stations", stations.len());
        Ok(stations)
    }

    /// `GET /stations/{id}` with the station's latest charge sessions.
    pub async fn get_station(&self, id: impl Into<ResourceId>) -> Result<StationDetail> {
        let id = id.into();
        self.request(&format!("/stations/{}", id), Method::GET, NO_BODY)
            .await
    }

    pub async fn create_station(&self, station: &StationInput) -> Result<ActionResponse> {
        info!("Creating station at {}", station.address);
        self.request("/stations", Method::POST, Some(station)).await
    }

    pub async fn update_station(
        &self,
        id: impl Into<ResourceId>,
        station: &StationInput,
    ) -> Result<ActionResponse> {
        let id = id.into();
        info!("Updating station {}", id);
        self.request(&format!("/stations/{}", id), Method::PUT, Some(station))
            .await
    }

    pub async fn delete_station(&self, id: impl Into<ResourceId>) -> Result<ActionResponse> {
        let id = id.into();
        info!("Deleting station {}", id);
        self.request(&format!("/stations/{}", id), Method::DELETE, NO_BODY)
            .await
    }
}
