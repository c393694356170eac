//! Usage statistics per neighbourhood.

use super::client::{ApiClient, NO_BODY};
use crate::error::Result;
use crate::models::DailyCharges;
use reqwest::Method;
use tracing::debug;

impl ApiClient {
    /// `GET /stats?neighborhood={n}&days={d}`: charges per day over the last `days` days.
    ///
    /// Both parameters are URL-encoded.
    pub async fn get_stats(&self, neighborhood: &str, days: u32) -> Result<Vec<DailyCharges>> {
        let series: Vec<DailyCharges> = self
            .execute(
                Method::GET,
                "/stats",
                &[
                    ("neighborhood", neighborhood.to_string()),
                    ("days", days.to_string()),
                ],
                NO_BODY,
            )
            .await?;
        debug!(
            "Received {} days of stats for neighbourhood {}",
            series.len(),
            neighborhood
        );
        Ok(series)
    }
}
