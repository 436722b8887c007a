//! Eco-comparison normalization.

use serde_json::Value;

use crate::domain::EcoData;

use super::NormalizeError;

/// Normalize a raw eco-comparison payload.
///
/// Only the train figure is mandatory; every comparison field is optional.
pub fn normalize_eco(raw: &Value) -> Result<EcoData, NormalizeError> {
    let invalid = || NormalizeError::invalid("eco");

    let obj = raw.as_object().ok_or_else(invalid)?;

    let train_co2 = obj
        .get("trainCO2")
        .and_then(Value::as_f64)
        .ok_or_else(invalid)?;

    let number = |key: &str| obj.get(key).and_then(Value::as_f64);

    Ok(EcoData {
        train_co2,
        car_co2: number("carCO2"),
        plane_co2: number("planeCO2"),
        savings: number("savings"),
        trees_equivalent: number("treesEquivalent"),
    })
}
