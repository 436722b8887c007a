//! Route-comparison normalization.

use serde_json::{Map, Value};

use crate::domain::{CompareData, Route};

use super::{NormalizeError, QueryContext, field, string_field};

/// Route fields recognized by the canonical [`Route`] record; everything
/// else a passthrough route carries lands in `Route::extra`.
const ROUTE_FIELDS: [&str; 5] = ["name", "duration", "transfers", "departure", "arrival"];

/// Normalize a raw comparison payload.
///
/// Accepts either an object or a bare array (which is treated directly as
/// the route list). For objects the routes come from `routes`, or are
/// synthesized from `trips`; an object with neither is invalid. Origin and
/// destination come from the payload when present, falling back to the
/// caller's [`QueryContext`].
pub fn normalize_compare(
    raw: &Value,
    params: &QueryContext,
) -> Result<CompareData, NormalizeError> {
    let invalid = || NormalizeError::invalid("compare");

    if let Some(routes) = raw.as_array() {
        return Ok(CompareData {
            origin: params.origin.clone(),
            destination: params.destination.clone(),
            criteria: None,
            routes: routes.iter().map(route_from_value).collect(),
            analysis: None,
        });
    }

    let obj = raw.as_object().ok_or_else(invalid)?;

    let routes = if let Some(routes) = obj.get("routes").and_then(Value::as_array) {
        routes.iter().map(route_from_value).collect()
    } else if let Some(trips) = obj.get("trips").and_then(Value::as_array) {
        trips
            .iter()
            .enumerate()
            .map(|(index, trip)| route_from_trip(index, trip))
            .collect()
    } else {
        return Err(invalid());
    };

    let origin = string_field(raw, &["origin"]).or_else(|| params.origin.clone());
    let destination = string_field(raw, &["destination"]).or_else(|| params.destination.clone());

    Ok(CompareData {
        origin,
        destination,
        criteria: field(raw, "criteria"),
        routes,
        analysis: field(raw, "analysis"),
    })
}

/// Pass a route-shaped value through, keeping unrecognized fields.
fn route_from_value(value: &Value) -> Route {
    let mut extra = Map::new();
    if let Some(obj) = value.as_object() {
        for (key, val) in obj {
            if !ROUTE_FIELDS.contains(&key.as_str()) {
                extra.insert(key.clone(), val.clone());
            }
        }
    }

    Route {
        name: value.get("name").and_then(Value::as_str).map(str::to_string),
        duration: field(value, "duration"),
        transfers: value
            .get("transfers")
            .and_then(Value::as_u64)
            .map(|n| n as u32),
        departure: field(value, "departure"),
        arrival: field(value, "arrival"),
        extra,
    }
}

/// Synthesize a route from a trip-shaped value: `"Option N"` naming,
/// transfers derived from the leg count.
fn route_from_trip(index: usize, trip: &Value) -> Route {
    let transfers = trip
        .get("legs")
        .and_then(Value::as_array)
        .map(|legs| legs.len().saturating_sub(1) as u32);

    Route {
        name: Some(format!("Option {}", index + 1)),
        duration: trip.pointer("/summary/duration").filter(|v| !v.is_null()).cloned(),
        transfers,
        departure: field(trip, "departureTime"),
        arrival: field(trip, "arrivalTime"),
        extra: Map::new(),
    }
}
