//! Vehicle listing. The payload is not characterized, so entries stay raw JSON.

use super::client::{ApiClient, NO_BODY};
use crate::error::Result;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// `GET /vehicles`.
    pub async fn get_vehicles(&self) -> Result<Vec<Value>> {
        self.request("/vehicles", Method::GET, NO_BODY).await
    }
}
