//! Normalization of raw upstream tool responses into canonical records.
//!
//! Each entity kind gets one normalizer. They all follow the same shape:
//! reject structurally invalid input fast with an entity-named error, then
//! try the known field spellings in a fixed priority order, consulting the
//! caller-supplied [`QueryContext`] only after the payload itself offers
//! nothing. Callers catch the error and render a degraded or omitted card
//! rather than crashing the chat turn.

use serde_json::Value;

mod board;
mod compare;
mod eco;
mod station;
mod trip;
mod weather;

pub use board::normalize_board;
pub use compare::normalize_compare;
pub use eco::normalize_eco;
pub use station::normalize_station;
pub use trip::normalize_trip;
pub use weather::normalize_weather;

/// Structurally invalid input for one entity kind.
///
/// The message is part of the contract with callers: it is always exactly
/// `Invalid {entity} data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {entity} data")]
pub struct NormalizeError {
    /// Entity kind being normalized ("board", "trip", ...).
    pub entity: &'static str,
}

impl NormalizeError {
    pub(crate) fn invalid(entity: &'static str) -> Self {
        Self { entity }
    }
}

/// Query context supplied by the caller, used as a last-resort fallback when
/// the payload itself names neither endpoint (e.g. the user asked to compare
/// "Bern to Zürich" but the tool response carries only the routes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Clone a field, treating JSON `null` the same as absent.
pub(crate) fn field(value: &Value, key: &str) -> Option<Value> {
    value.get(key).filter(|v| !v.is_null()).cloned()
}

/// Read a string field, trying each key in order. A blank (empty or
/// whitespace-only) string counts as absent, so the chain keeps looking and
/// downstream defaults still apply.
pub(crate) fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| {
            value
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}
