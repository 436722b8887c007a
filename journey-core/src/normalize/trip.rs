//! Trip normalization.

use serde_json::Value;

use crate::domain::{Leg, ServiceLeg, TripData, WalkLeg};

use super::{NormalizeError, field};

/// Normalize a raw trip payload.
///
/// The payload must be an object with a `legs` array (an empty one is a
/// valid, if useless, trip). Leg order is preserved. Every leg must carry an
/// explicit `type` tag: `"walk"` makes a walk leg, any other string a service
/// leg. A leg without a tag invalidates the whole trip — leg kind is never
/// inferred from which fields happen to be present.
pub fn normalize_trip(raw: &Value) -> Result<TripData, NormalizeError> {
    let invalid = || NormalizeError::invalid("trip");

    let obj = raw.as_object().ok_or_else(invalid)?;
    let legs_raw = obj.get("legs").and_then(Value::as_array).ok_or_else(invalid)?;

    let legs = legs_raw
        .iter()
        .map(normalize_leg)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TripData {
        legs,
        summary: field(raw, "summary"),
    })
}

fn normalize_leg(leg: &Value) -> Result<Leg, NormalizeError> {
    let tag = leg
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| NormalizeError::invalid("trip"))?;

    if tag == "walk" {
        Ok(Leg::Walk(WalkLeg {
            duration: field(leg, "duration"),
            distance: leg.get("distance").and_then(Value::as_f64),
        }))
    } else {
        Ok(Leg::Service(ServiceLeg {
            service_journey: field(leg, "serviceJourney"),
            departure: field(leg, "departure"),
            arrival: field(leg, "arrival"),
            duration: field(leg, "duration"),
        }))
    }
}
