//! Weather normalization.

use serde_json::Value;

use crate::domain::WeatherData;

use super::{NormalizeError, field, string_field};

/// Normalize a raw weather payload.
///
/// The payload must be an object carrying at least one of `hourly` or
/// `daily`; the series themselves pass through untouched. The location name
/// is taken from `locationName`, `location`, or `name`, in that order.
pub fn normalize_weather(raw: &Value) -> Result<WeatherData, NormalizeError> {
    let invalid = || NormalizeError::invalid("weather");

    if !raw.is_object() {
        return Err(invalid());
    }

    let hourly = field(raw, "hourly");
    let daily = field(raw, "daily");

    if hourly.is_none() && daily.is_none() {
        return Err(invalid());
    }

    let location_name = string_field(raw, &["locationName", "location", "name"])
        .unwrap_or_else(|| "Unknown location".to_string());

    Ok(WeatherData {
        location_name,
        hourly,
        daily,
    })
}
