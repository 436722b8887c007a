//! Station normalization.

use serde_json::Value;

use crate::domain::StationData;
use crate::geo::resolve_coordinates;

use super::NormalizeError;

/// Normalize a raw station payload.
///
/// `name` is mandatory; coordinates are resolved from `coordinates`, then
/// `location`, then the station object itself (which covers direct `lat`/
/// `lon` fields and GeoJSON centroids). An unresolvable position is not an
/// error — the record simply carries no coordinates.
pub fn normalize_station(raw: &Value) -> Result<StationData, NormalizeError> {
    let invalid = || NormalizeError::invalid("station");

    let obj = raw.as_object().ok_or_else(invalid)?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(invalid)?
        .to_string();

    let coordinates = ["coordinates", "location"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(resolve_coordinates))
        .or_else(|| resolve_coordinates(raw));

    let distance = obj.get("distance").and_then(Value::as_f64);

    Ok(StationData {
        name,
        coordinates,
        distance,
    })
}
