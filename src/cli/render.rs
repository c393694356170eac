//! Turns API results into `comfy-table` tables for terminal output.

use crate::models::{ChargeSession, DailyCharges, Station, User};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Row, Table};
use serde_json::Value;
use std::collections::BTreeSet;

const EMPTY: &str = "-";

fn new_table(header: impl Into<Row>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| EMPTY.to_string(), |v| v.to_string())
}

fn number(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| EMPTY.to_string(), |v| format!("{:.*}", decimals, v))
}

pub fn stations_table(stations: &[Station]) -> Table {
    let mut table = new_table(vec![
        "ID", "Address", "Neighbourhood", "Power (kW)", "Lat", "Lon", "Status", "Occupied",
    ]);
    for s in stations {
        let occupied = match s.occupied {
            Some(true) => "yes",
            Some(false) => "no",
            None => EMPTY,
        };
        table.add_row(vec![
            s.id.to_string(),
            opt(s.address.as_deref()),
            opt(s.nil.as_deref()),
            number(s.power_kw, 1),
            number(s.latitude, 6),
            number(s.longitude, 6),
            opt(s.status.as_deref()),
            occupied.to_string(),
        ]);
    }
    table
}

pub fn sessions_table(sessions: &[ChargeSession]) -> Table {
    let mut table = new_table(vec![
        "ID", "Driver", "Plate", "Start", "End", "Energy (kWh)", "Cost (EUR)",
    ]);
    for s in sessions {
        table.add_row(vec![
            opt(s.id),
            opt(s.driver()),
            opt(s.license_plate.as_deref()),
            opt(s.start_time.as_deref()),
            opt(s.end_time.as_deref()),
            number(s.energy_kwh, 2),
            number(s.cost_eur, 2),
        ]);
    }
    table
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = new_table(vec!["ID", "Name", "Email", "Phone"]);
    for u in users {
        table.add_row(vec![
            u.id.to_string(),
            u.full_name(),
            u.email.clone(),
            opt(u.phone.as_deref()),
        ]);
    }
    table
}

pub fn stats_table(series: &[DailyCharges]) -> Table {
    let mut table = new_table(vec!["Day", "Charges"]);
    for d in series {
        let day = d
            .date()
            .map_or_else(|| d.day.clone(), |date| date.format("%Y-%m-%d").to_string());
        table.add_row(vec![day, d.charges_count.to_string()]);
    }
    table
}

/// Vehicles have no fixed schema: columns are the union of keys over all objects.
pub fn vehicles_table(vehicles: &[Value]) -> Table {
    let columns: BTreeSet<&str> = vehicles
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();

    if columns.is_empty() {
        let mut table = new_table(vec!["Value"]);
        for v in vehicles {
            table.add_row(vec![v.to_string()]);
        }
        return table;
    }

    let mut table = new_table(columns.iter().copied());
    for v in vehicles {
        table.add_row(
            columns
                .iter()
                .map(|col| match v.get(*col) {
                    None | Some(Value::Null) => EMPTY.to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}
