//! Interactive prompts used by the menu loop to build command arguments.

use crate::cli::{BookArgs, StationFields, StatsArgs, UserArgs};
use crate::error::{AppError, Result};
use crate::models::{ResourceId, Station, DEFAULT_BOOKING_MINUTES, DEFAULT_STATS_DAYS};
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input};
use std::convert::Infallible;

fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

// Empty answer means "not set".
fn optional_text(prompt: &str) -> Result<Option<String>> {
    let value = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} (optional)", prompt))
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(value.trim().to_string()).filter(|v| !v.is_empty()))
}

fn number(prompt: &str) -> Result<f64> {
    Ok(Input::<f64>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

fn positive(prompt: &str, default: u32) -> Result<u32> {
    Ok(Input::<u32>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .validate_with(|v: &u32| if *v > 0 { Ok(()) } else { Err("must be at least 1") })
        .interact_text()?)
}

pub fn prompt_id(what: &str) -> Result<ResourceId> {
    let raw = text(&format!("{} ID", what))?;
    Ok(raw.parse().unwrap_or_else(|never: Infallible| match never {}))
}

pub fn prompt_station_fields() -> Result<StationFields> {
    Ok(StationFields {
        address: text("Address")?,
        latitude: number("Latitude")?,
        longitude: number("Longitude")?,
        power_kw: number("Power (kW)")?,
        nil: text("Neighbourhood code")?,
    })
}

/// Status for a new station; empty keeps the backend default.
pub fn prompt_create_status() -> Result<Option<String>> {
    optional_text("Status")
}

/// Status for an update, which the backend always overwrites.
pub fn prompt_update_status() -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Status")
        .default("active".to_string())
        .interact_text()?)
}

pub fn prompt_user_fields(password_label: &str) -> Result<UserArgs> {
    Ok(UserArgs {
        name: text("Name")?,
        surname: text("Surname")?,
        email: text("Email")?,
        phone: optional_text("Phone")?,
        password: optional_text(password_label)?,
    })
}

pub fn prompt_stats() -> Result<StatsArgs> {
    Ok(StatsArgs {
        neighborhood: text("Neighbourhood code")?,
        days: positive("Days to look back", DEFAULT_STATS_DAYS)?,
    })
}

/// Lets the user fuzzy-pick one of `stations`, then asks for the vehicle and duration.
pub fn prompt_booking(stations: &[Station]) -> Result<BookArgs> {
    if stations.is_empty() {
        return Err(AppError::Cli("No free stations to book".to_string()));
    }

    let labels: Vec<String> = stations
        .iter()
        .map(|s| {
            format!(
                "#{} {} [{}]",
                s.id,
                s.address.as_deref().unwrap_or("?"),
                s.nil.as_deref().unwrap_or("-")
            )
        })
        .collect();
    let index = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Station")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(BookArgs {
        station: ResourceId::Number(stations[index].id),
        vehicle: prompt_id("Vehicle")?,
        duration: positive("Duration (minutes)", DEFAULT_BOOKING_MINUTES)?,
    })
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
