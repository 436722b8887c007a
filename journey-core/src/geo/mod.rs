//! Coordinate extraction from loosely-typed upstream payloads.
//!
//! Upstream producers disagree on how they spell a coordinate pair: some send
//! `{latitude, longitude}`, some `{lat, lon}`, some a GeoJSON
//! `{coordinates: [lon, lat]}` (note the reversed axis order), and some nest
//! one of those under `centroid` or `coordinates`. The resolver reconciles
//! all of them into a single `[lat, lon]` point.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

mod distance;
mod path;

pub use distance::{format_distance, haversine_distance};
pub use path::extract_trip_coordinates;

/// A geographic point, always `[latitude, longitude]`.
///
/// Serializes as a two-element array in that fixed order, which is what the
/// map-drawing collaborator expects regardless of how the source spelled it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePoint {
    pub lat: f64,
    pub lon: f64,
}

impl CoordinatePoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether this point is the `(0, 0)` placeholder used when no pattern
    /// matched a candidate. Station selection treats it as "no coordinates".
    pub fn is_origin_placeholder(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

impl Serialize for CoordinatePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lon].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CoordinatePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lat, lon] = <[f64; 2]>::deserialize(deserializer)?;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(D::Error::custom("coordinate components must be finite"));
        }
        Ok(Self { lat, lon })
    }
}

/// One recognized coordinate shape. Patterns are pure and independently
/// testable; `resolve_coordinates` evaluates them in a fixed order.
type Pattern = fn(&Value) -> Option<CoordinatePoint>;

/// The shape patterns in priority order. The order (including `centroid`
/// ahead of the nested `coordinates` object) reflects observed upstream data
/// and is deliberately not re-derived.
const PATTERNS: [Pattern; 5] = [
    latitude_longitude,
    lat_lon,
    geojson_array,
    centroid,
    nested_coordinates,
];

/// Extract a `[lat, lon]` pair from an arbitrary JSON value.
///
/// Tries each known shape in priority order and returns the first match.
/// Never fails: anything unrecognized yields `None`. A shape that matches
/// structurally but carries a non-finite number is treated as a non-match
/// and the search continues.
pub fn resolve_coordinates(value: &Value) -> Option<CoordinatePoint> {
    PATTERNS.iter().find_map(|pattern| pattern(value))
}

/// Read a finite number from a field.
fn finite_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key)?.as_f64().filter(|n| n.is_finite())
}

/// Shape 1: `{latitude, longitude}`.
pub(crate) fn latitude_longitude(value: &Value) -> Option<CoordinatePoint> {
    Some(CoordinatePoint {
        lat: finite_field(value, "latitude")?,
        lon: finite_field(value, "longitude")?,
    })
}

/// Shape 2: `{lat, lon}`.
pub(crate) fn lat_lon(value: &Value) -> Option<CoordinatePoint> {
    Some(CoordinatePoint {
        lat: finite_field(value, "lat")?,
        lon: finite_field(value, "lon")?,
    })
}

/// Shape 3: GeoJSON `{coordinates: [lon, lat]}` — swapped on output.
pub(crate) fn geojson_array(value: &Value) -> Option<CoordinatePoint> {
    let coords = value.get("coordinates")?.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    let lon = coords[0].as_f64().filter(|n| n.is_finite())?;
    let lat = coords[1].as_f64().filter(|n| n.is_finite())?;
    Some(CoordinatePoint { lat, lon })
}

/// Shape 4: `{centroid: {...}}` — a GeoJSON array inside the centroid, or a
/// plain pair spelled with either field naming.
pub(crate) fn centroid(value: &Value) -> Option<CoordinatePoint> {
    let inner = value.get("centroid")?;
    geojson_array(inner)
        .or_else(|| latitude_longitude(inner))
        .or_else(|| lat_lon(inner))
}

/// Shape 5: `{coordinates: {...}}` where the value is an object, not an
/// array — recurse with the plain-pair patterns.
pub(crate) fn nested_coordinates(value: &Value) -> Option<CoordinatePoint> {
    let inner = value.get("coordinates")?;
    if !inner.is_object() {
        return None;
    }
    latitude_longitude(inner).or_else(|| lat_lon(inner))
}
