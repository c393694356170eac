//! Registered users, as managed through the admin endpoints.

use serde::{Deserialize, Serialize};

/// A user as listed by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Payload for `POST /users` and `PUT /users/{id}`.
///
/// On update the backend writes `phone` unconditionally, so `None` clears it.
/// `password` is only sent when set; the backend keeps the current hash otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct UserInput {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
