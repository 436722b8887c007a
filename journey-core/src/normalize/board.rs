//! Departure/arrival board normalization.

use serde_json::Value;
use tracing::debug;

use crate::domain::{BoardData, BoardKind};

use super::{NormalizeError, string_field};

/// Field names that may carry the board's event list, in priority order.
const EVENT_FIELDS: [&str; 4] = ["connections", "departures", "arrivals", "events"];

/// Normalize a raw board payload.
///
/// The payload must be an object carrying a connections-like array under one
/// of the known field names; anything else is `Invalid board data`. The board
/// kind always resolves to one of the two literals: an explicit
/// `type: "arrivals"` wins, otherwise a list sourced from the `arrivals` key
/// makes an arrivals board, and everything else defaults to departures.
pub fn normalize_board(raw: &Value) -> Result<BoardData, NormalizeError> {
    let invalid = || NormalizeError::invalid("board");

    let obj = raw.as_object().ok_or_else(invalid)?;

    let (source_field, events) = EVENT_FIELDS
        .iter()
        .find_map(|key| {
            obj.get(*key)
                .and_then(Value::as_array)
                .map(|events| (*key, events))
        })
        .ok_or_else(invalid)?;

    if source_field != "connections" {
        debug!(source_field, "board events found under a fallback field");
    }

    let kind = match obj.get("type").and_then(Value::as_str) {
        Some("arrivals") => BoardKind::Arrivals,
        Some("departures") => BoardKind::Departures,
        _ if source_field == "arrivals" => BoardKind::Arrivals,
        _ => BoardKind::Departures,
    };

    let station = string_field(raw, &["station", "stationName"])
        .or_else(|| station_object_name(raw))
        .unwrap_or_else(|| "Unknown Station".to_string());

    Ok(BoardData {
        kind,
        station,
        connections: events.clone(),
    })
}

/// Some producers send the station as an object rather than a name.
fn station_object_name(raw: &Value) -> Option<String> {
    raw.get("station")?
        .get("name")?
        .as_str()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
