//! Station ranking and nearest-station lookup.
//!
//! Candidates come back from the places endpoint in arbitrary order and
//! arbitrary coordinate spellings. Ranking resolves each candidate's
//! position, measures the distance to the user, and sorts by a composite
//! key: major hubs first, then ascending importance, then ascending
//! distance. The sort is stable, so ties keep the upstream order.

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{Clock, TtlCache};
use crate::geo::{
    CoordinatePoint, centroid, format_distance, geojson_array, haversine_distance, lat_lon,
    latitude_longitude, nested_coordinates, resolve_coordinates,
};

mod client;
mod error;

pub use client::{PlacesClient, PlacesClientConfig};
pub use error::StationError;

/// Importance assigned to candidates that don't state one. Lower is better,
/// so unranked stations sort behind every explicitly ranked one.
const DEFAULT_IMPORTANCE: f64 = 10.0;

/// How many places to request per lookup.
const DEFAULT_LIMIT: u32 = 10;

/// A candidate with its resolved position and distance to the user.
#[derive(Debug, Clone)]
pub struct RankedStation {
    /// The raw candidate, untouched.
    pub station: Value,

    /// Resolved position; `(0, 0)` when no coordinate shape matched.
    pub coordinates: CoordinatePoint,

    /// Great-circle distance to the user in meters.
    pub distance_m: f64,
}

impl RankedStation {
    /// Human-readable distance (`"842m"`, `"3.2km"`).
    pub fn display_distance(&self) -> String {
        format_distance(self.distance_m)
    }
}

/// Resolve a candidate's coordinates: `location`, then a `coordinates`
/// field (array or object), then `centroid`, then direct `lat`/`lon` style
/// fields on the candidate itself.
fn candidate_coordinates(candidate: &Value) -> Option<CoordinatePoint> {
    candidate
        .get("location")
        .and_then(resolve_coordinates)
        .or_else(|| geojson_array(candidate))
        .or_else(|| nested_coordinates(candidate))
        .or_else(|| centroid(candidate))
        .or_else(|| latitude_longitude(candidate))
        .or_else(|| lat_lon(candidate))
}

fn is_major_hub(candidate: &Value) -> bool {
    candidate
        .get("majorHub")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn importance(candidate: &Value) -> f64 {
    candidate
        .get("importance")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_IMPORTANCE)
}

/// Rank candidates by suitability for the user's position.
///
/// Candidates whose coordinates cannot be resolved get the `(0, 0)`
/// placeholder; selection treats a placeholder winner as a failed lookup.
pub fn rank_stations(candidates: &[Value], user: CoordinatePoint) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = candidates
        .iter()
        .map(|candidate| {
            let coordinates = candidate_coordinates(candidate)
                .unwrap_or(CoordinatePoint { lat: 0.0, lon: 0.0 });
            let distance_m =
                haversine_distance(user.lat, user.lon, coordinates.lat, coordinates.lon);
            RankedStation {
                station: candidate.clone(),
                coordinates,
                distance_m,
            }
        })
        .collect();

    // Stable sort: ties preserve the upstream order.
    ranked.sort_by(|a, b| {
        is_major_hub(&b.station)
            .cmp(&is_major_hub(&a.station))
            .then_with(|| importance(&a.station).total_cmp(&importance(&b.station)))
            .then_with(|| a.distance_m.total_cmp(&b.distance_m))
    });

    ranked
}

/// Pick the best candidate, or `None` when the lookup effectively failed.
///
/// A winner whose coordinates resolved to exactly `(0, 0)` means no pattern
/// matched any of its spellings; reporting it would hand the map a bogus
/// point in the Gulf of Guinea.
pub fn select_nearest(candidates: &[Value], user: CoordinatePoint) -> Option<RankedStation> {
    let best = rank_stations(candidates, user).into_iter().next()?;

    if best.coordinates.is_origin_placeholder() {
        warn!("best station candidate has no resolvable coordinates; treating lookup as failed");
        return None;
    }

    Some(best)
}

/// Cache key for a lookup position, rounded so nearby queries share entries.
fn position_key(user: CoordinatePoint) -> String {
    format!("nearby:{:.4}:{:.4}", user.lat, user.lon)
}

/// Find the nearest station to the user, memoizing candidate lists in the
/// caller-owned cache.
///
/// Transport errors propagate; an empty or unresolvable candidate list is
/// reported as `Ok(None)` ("no station found").
pub async fn find_nearest_station<C: Clock>(
    client: &PlacesClient,
    cache: &mut TtlCache<Vec<Value>, C>,
    user: CoordinatePoint,
) -> Result<Option<RankedStation>, StationError> {
    let key = position_key(user);

    let candidates = match cache.get(&key) {
        Some(cached) => {
            debug!(%key, "nearby candidates served from cache");
            cached.clone()
        }
        None => {
            let fetched = client.find_places_by_location(user, DEFAULT_LIMIT).await?;
            cache.insert(key, fetched.clone());
            fetched
        }
    };

    Ok(select_nearest(&candidates, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const USER: CoordinatePoint = CoordinatePoint { lat: 46.948, lon: 7.4474 };

    /// A candidate `meters` north of the user, roughly.
    fn candidate_at_distance(name: &str, meters: f64) -> Value {
        let lat = USER.lat + meters / 111_320.0;
        json!({"name": name, "latitude": lat, "longitude": USER.lon})
    }

    #[test]
    fn closer_station_ranks_first() {
        let far = candidate_at_distance("far", 2000.0);
        let near = candidate_at_distance("near", 100.0);

        let ranked = rank_stations(&[far, near], USER);
        assert_eq!(ranked[0].station["name"], json!("near"));
        assert_eq!(ranked[1].station["name"], json!("far"));
    }

    #[test]
    fn major_hub_beats_distance() {
        let mut hub = candidate_at_distance("hub", 500.0);
        hub["majorHub"] = json!(true);
        let near = candidate_at_distance("near", 10.0);

        let ranked = rank_stations(&[near, hub], USER);
        assert_eq!(ranked[0].station["name"], json!("hub"));
    }

    #[test]
    fn importance_beats_distance_within_hub_class() {
        let mut important = candidate_at_distance("important", 2000.0);
        important["importance"] = json!(1);
        let near = candidate_at_distance("near", 10.0);

        let ranked = rank_stations(&[near, important], USER);
        assert_eq!(ranked[0].station["name"], json!("important"));
        // Missing importance is treated as 10, behind any explicit rank.
    }

    #[test]
    fn ties_preserve_input_order() {
        let a = candidate_at_distance("a", 100.0);
        let b = candidate_at_distance("b", 100.0);

        let ranked = rank_stations(&[a, b], USER);
        assert_eq!(ranked[0].station["name"], json!("a"));
        assert_eq!(ranked[1].station["name"], json!("b"));
    }

    #[test]
    fn candidate_coordinate_spellings() {
        let spellings = [
            json!({"location": {"latitude": 46.948, "longitude": 7.4474}}),
            json!({"coordinates": [7.4474, 46.948]}),
            json!({"coordinates": {"lat": 46.948, "lon": 7.4474}}),
            json!({"centroid": {"coordinates": [7.4474, 46.948]}}),
            json!({"lat": 46.948, "lon": 7.4474}),
        ];
        for candidate in &spellings {
            assert_eq!(
                candidate_coordinates(candidate),
                Some(CoordinatePoint::new(46.948, 7.4474)),
                "failed for {candidate}"
            );
        }
    }

    #[test]
    fn unresolvable_winner_means_no_station() {
        let candidates = vec![json!({"name": "mystery"})];
        assert!(select_nearest(&candidates, USER).is_none());
    }

    #[test]
    fn empty_candidate_list_means_no_station() {
        assert!(select_nearest(&[], USER).is_none());
    }

    #[test]
    fn resolvable_winner_is_selected() {
        let candidates = vec![
            json!({"name": "mystery"}),
            candidate_at_distance("Bern", 100.0),
        ];
        // The unresolvable candidate sorts behind the real one on distance
        // (its placeholder sits thousands of kilometers away).
        let best = select_nearest(&candidates, USER).unwrap();
        assert_eq!(best.station["name"], json!("Bern"));
        assert!(best.distance_m < 200.0);
    }

    #[test]
    fn display_distance_formats() {
        let best = select_nearest(&[candidate_at_distance("Bern", 500.0)], USER).unwrap();
        let formatted = best.display_distance();
        assert!(formatted.ends_with('m'), "got {formatted}");
    }

    #[test]
    fn position_key_rounds_coordinates() {
        let a = position_key(CoordinatePoint::new(46.94801, 7.44739));
        let b = position_key(CoordinatePoint::new(46.94802, 7.44741));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn cached_candidates_skip_the_network() {
        // Pre-populated cache: the client points at a dead address and must
        // never be contacted.
        let client = PlacesClient::new(PlacesClientConfig::new("http://127.0.0.1:1")).unwrap();
        let mut cache = TtlCache::with_ttl_minutes(5);
        cache.insert(position_key(USER), vec![candidate_at_distance("Bern", 100.0)]);

        let best = find_nearest_station(&client, &mut cache, USER)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(best.station["name"], json!("Bern"));
    }
}
