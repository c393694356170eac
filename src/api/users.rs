//! User administration endpoints.

use super::client::{ApiClient, NO_BODY};
use crate::error::Result;
use crate::models::{ActionResponse, ResourceId, User, UserInput};
use reqwest::Method;
use tracing::{debug, info};

impl ApiClient {
    /// `GET /users`.
    pub async fn get_users(&self) -> Result<Vec<User>> {
        let users: Vec<User> = self.request("/users", Method::GET, NO_BODY).await?;
        debug!("Received {} users", users.len());
        Ok(users)
    }

    pub async fn create_user(&self, user: &UserInput) -> Result<ActionResponse> {
        info!("Creating user {}", user.email);
        self.request("/users", Method::POST, Some(user)).await
    }

    pub async fn update_user(
        &self,
        id: impl Into<ResourceId>,
        user: &UserInput,
    ) -> Result<ActionResponse> {
        let id = id.into();
        info!("Updating user {}", id);
        self.request(&format!("/users/{}", id), Method::PUT, Some(user))
            .await
    }

    pub async fn delete_user(&self, id: impl Into<ResourceId>) -> Result<ActionResponse> {
        let id = id.into();
        info!("Deleting user {}", id);
        self.request(&format!("/users/{}", id), Method::DELETE, NO_BODY)
            .await
    }
}
