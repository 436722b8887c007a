//! Trip geometry extraction for map rendering.
//!
//! Walks a raw trip payload leg by leg and collects every coordinate that
//! resolves, preferring the detailed stop-point sequence when the upstream
//! supplied one and falling back to leg endpoints otherwise. A point that
//! fails to resolve is skipped; a bad leg never invalidates the trip.

use serde_json::Value;

use super::{CoordinatePoint, resolve_coordinates};

/// Field names tried, in order, for a leg's starting point. For each name the
/// nested `place` object is preferred over the value itself.
const START_FIELDS: [&str; 3] = ["departure", "start", "origin"];

/// Field names tried, in order, for a leg's ending point.
const END_FIELDS: [&str; 3] = ["arrival", "end", "destination"];

/// Extract the ordered coordinate sequence of a trip.
///
/// Walk legs contribute nothing. For every other leg the detailed
/// `serviceJourney.stopPoints` sequence is used when present; otherwise the
/// leg's endpoints are resolved through the start/end field chains.
/// Consecutive duplicate points are collapsed (non-consecutive duplicates,
/// e.g. a loop through the same station, are preserved). Never fails:
/// a trip without `legs`, or one where nothing resolves, yields `[]`.
pub fn extract_trip_coordinates(trip: &Value) -> Vec<CoordinatePoint> {
    let Some(legs) = trip.get("legs").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut points = Vec::new();

    for leg in legs {
        if leg.get("type").and_then(Value::as_str) == Some("walk") {
            continue;
        }

        match leg.pointer("/serviceJourney/stopPoints").and_then(Value::as_array) {
            Some(stops) => {
                points.extend(stops.iter().filter_map(resolve_stop));
            }
            None => {
                points.extend(resolve_leg_endpoint(leg, &START_FIELDS));
                points.extend(resolve_leg_endpoint(leg, &END_FIELDS));
            }
        }
    }

    points.dedup_by(|current, previous| {
        current.lat == previous.lat && current.lon == previous.lon
    });

    points
}

/// Resolve a stop point, preferring its `place` over the stop itself.
fn resolve_stop(stop: &Value) -> Option<CoordinatePoint> {
    stop.get("place")
        .and_then(resolve_coordinates)
        .or_else(|| resolve_coordinates(stop))
}

/// Resolve one endpoint of a leg through an ordered field chain.
fn resolve_leg_endpoint(leg: &Value, fields: &[&str]) -> Option<CoordinatePoint> {
    fields.iter().find_map(|field| {
        let value = leg.get(field)?;
        value
            .get("place")
            .and_then(resolve_coordinates)
            .or_else(|| resolve_coordinates(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BERN: [f64; 2] = [46.948, 7.4474];
    const ZURICH: [f64; 2] = [47.3769, 8.5417];

    fn point(pair: [f64; 2]) -> CoordinatePoint {
        CoordinatePoint::new(pair[0], pair[1])
    }

    #[test]
    fn stop_points_in_order() {
        let trip = json!({
            "legs": [{
                "type": "service",
                "serviceJourney": {
                    "stopPoints": [
                        {"place": {"latitude": BERN[0], "longitude": BERN[1]}},
                        {"place": {"latitude": ZURICH[0], "longitude": ZURICH[1]}}
                    ]
                }
            }]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH)]
        );
    }

    #[test]
    fn stop_points_with_geojson_centroids() {
        // Same journey, but each stop carries a GeoJSON centroid instead.
        let trip = json!({
            "legs": [{
                "type": "service",
                "serviceJourney": {
                    "stopPoints": [
                        {"place": {"centroid": {"coordinates": [BERN[1], BERN[0]]}}},
                        {"place": {"centroid": {"coordinates": [ZURICH[1], ZURICH[0]]}}}
                    ]
                }
            }]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH)]
        );
    }

    #[test]
    fn stop_without_place_resolves_directly() {
        let trip = json!({
            "legs": [{
                "type": "service",
                "serviceJourney": {
                    "stopPoints": [
                        {"lat": BERN[0], "lon": BERN[1]},
                        {"place": {"lat": ZURICH[0], "lon": ZURICH[1]}}
                    ]
                }
            }]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH)]
        );
    }

    #[test]
    fn walk_legs_are_skipped() {
        let trip = json!({
            "legs": [
                {"type": "walk", "departure": {"latitude": 1.0, "longitude": 1.0}},
                {
                    "type": "service",
                    "departure": {"place": {"latitude": BERN[0], "longitude": BERN[1]}},
                    "arrival": {"place": {"latitude": ZURICH[0], "longitude": ZURICH[1]}}
                }
            ]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH)]
        );
    }

    #[test]
    fn endpoint_fallback_chain() {
        // No stopPoints and no departure/arrival; origin/destination are the
        // last resort in the chains.
        let trip = json!({
            "legs": [{
                "type": "service",
                "origin": {"latitude": BERN[0], "longitude": BERN[1]},
                "destination": {"latitude": ZURICH[0], "longitude": ZURICH[1]}
            }]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH)]
        );
    }

    #[test]
    fn partial_endpoints_keep_what_resolves() {
        // Arrival is unusable; the start still contributes.
        let trip = json!({
            "legs": [{
                "type": "service",
                "departure": {"latitude": BERN[0], "longitude": BERN[1]},
                "arrival": {"name": "somewhere"}
            }]
        });

        assert_eq!(extract_trip_coordinates(&trip), vec![point(BERN)]);
    }

    #[test]
    fn consecutive_duplicates_collapse() {
        // Leg 1 ends where leg 2 begins; the shared point appears once.
        let trip = json!({
            "legs": [
                {
                    "type": "service",
                    "departure": {"latitude": BERN[0], "longitude": BERN[1]},
                    "arrival": {"latitude": ZURICH[0], "longitude": ZURICH[1]}
                },
                {
                    "type": "service",
                    "departure": {"latitude": ZURICH[0], "longitude": ZURICH[1]},
                    "arrival": {"latitude": 47.5596, "longitude": 7.5886}
                }
            ]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH), point([47.5596, 7.5886])]
        );
    }

    #[test]
    fn non_consecutive_duplicates_are_preserved() {
        // Out-and-back journey: Bern appears at both ends.
        let trip = json!({
            "legs": [
                {
                    "type": "service",
                    "departure": {"latitude": BERN[0], "longitude": BERN[1]},
                    "arrival": {"latitude": ZURICH[0], "longitude": ZURICH[1]}
                },
                {
                    "type": "service",
                    "departure": {"latitude": ZURICH[0], "longitude": ZURICH[1]},
                    "arrival": {"latitude": BERN[0], "longitude": BERN[1]}
                }
            ]
        });

        assert_eq!(
            extract_trip_coordinates(&trip),
            vec![point(BERN), point(ZURICH), point(BERN)]
        );
    }

    #[test]
    fn missing_legs_yields_empty() {
        assert!(extract_trip_coordinates(&json!({})).is_empty());
        assert!(extract_trip_coordinates(&json!(null)).is_empty());
        assert!(extract_trip_coordinates(&json!({"legs": "none"})).is_empty());
    }

    #[test]
    fn unresolvable_legs_yield_empty() {
        let trip = json!({
            "legs": [
                {"type": "service", "departure": {"name": "a"}, "arrival": {"name": "b"}}
            ]
        });
        assert!(extract_trip_coordinates(&trip).is_empty());
    }
}
