//! Charging stations and the charge sessions recorded against them.

use super::common::{lenient_f64, lenient_string};
use serde::{Deserialize, Serialize};

/// A charging station as listed by `GET /stations`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Station {
    pub id: i64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub power_kw: Option<f64>,
    /// Neighbourhood code the station belongs to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub nil: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Only present in listings: whether a charge session is still running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,
}

/// A single station plus its most recent charge sessions (`GET /stations/{id}`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationDetail {
    #[serde(flatten)]
    pub station: Station,
    #[serde(default)]
    pub recent_sessions: Vec<ChargeSession>,
}

/// A charge session joined with the user's name and the vehicle's plate.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChargeSession {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub vehicle_id: Option<i64>,
    #[serde(default)]
    pub station_id: Option<i64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub energy_kwh: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost_eur: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
}

impl ChargeSession {
    /// "Name Surname" of the user who started the session, if known.
    pub fn driver(&self) -> Option<String> {
        match (&self.name, &self.surname) {
            (Some(n), Some(s)) => Some(format!("{} {}", n, s)),
            (Some(n), None) => Some(n.clone()),
            (None, Some(s)) => Some(s.clone()),
            (None, None) => None,
        }
    }
}

/// Payload for `POST /stations` and `PUT /stations/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInput {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub power_kw: f64,
    pub nil: String,
    /// Left out on create to get `active`; updates should always set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
