//! Canonical view records.
//!
//! These are the validated, shape-normalized outputs handed to rendering and
//! mapping collaborators. They are constructed once per normalization call
//! and never mutated afterward. Fields the upstream leaves semantically
//! opaque (weather series, service journey details, free-form analysis text)
//! pass through as `serde_json::Value` — reinterpreting their contents is
//! out of scope here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::CoordinatePoint;

/// Which direction a station board describes.
///
/// Always one of the two literals; ambiguous input is resolved during
/// normalization, never passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    Departures,
    Arrivals,
}

/// A departure or arrival board for one station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardData {
    /// Board direction.
    #[serde(rename = "type")]
    pub kind: BoardKind,

    /// Station name; `"Unknown Station"` when the payload offers none.
    pub station: String,

    /// Board events (connections), passed through in source order.
    pub connections: Vec<Value>,
}

/// A single leg of a trip.
///
/// A true tagged union: the variant is chosen by the explicit `type` tag on
/// the wire, never inferred from which fields happen to be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Leg {
    Service(ServiceLeg),
    Walk(WalkLeg),
}

/// A leg ridden on a public-transport service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLeg {
    /// Service journey details (line, direction, stop points).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_journey: Option<Value>,

    /// Departure endpoint (place and time as the upstream sent them).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<Value>,

    /// Arrival endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Value>,

    /// Leg duration, passed through (usually an ISO-8601 duration string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
}

/// A leg covered on foot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkLeg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,

    /// Walking distance in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// One trip from origin to destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripData {
    /// Legs in travel order. Order is significant and preserved.
    pub legs: Vec<Leg>,

    /// Trip summary (duration, transfers), passed through if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
}

/// Weather for one location.
///
/// The arrays inside `hourly`/`daily` are parallel per source series; this
/// layer does not reinterpret them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<Value>,
}

/// CO2 comparison between travel modes. Only the train figure is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoData {
    #[serde(rename = "trainCO2")]
    pub train_co2: f64,

    #[serde(rename = "carCO2", skip_serializing_if = "Option::is_none")]
    pub car_co2: Option<f64>,

    #[serde(rename = "planeCO2", skip_serializing_if = "Option::is_none")]
    pub plane_co2: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,

    #[serde(rename = "treesEquivalent", skip_serializing_if = "Option::is_none")]
    pub trees_equivalent: Option<f64>,
}

/// A station lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationData {
    pub name: String,

    /// Resolved `[lat, lon]`, whichever shape the source used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatePoint>,

    /// Distance from the query point in meters, when the source provides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// One route option in a comparison.
///
/// May be passed through from the payload's `routes` or synthesized from a
/// trip. Unrecognized fields of a passthrough route are kept in `extra` so
/// nothing is silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfers: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A route comparison between an origin and a destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Comparison criteria, passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Value>,

    pub routes: Vec<Route>,

    /// Free-form analysis, passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
}
