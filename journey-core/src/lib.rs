//! Normalization core for a transit chat assistant.
//!
//! Upstream tool calls (trip search, departure/arrival boards, weather,
//! eco comparison, station lookup) answer in loosely-typed, mutually
//! inconsistent JSON. This crate reconciles those payloads into a small set
//! of canonical records, derives `[lat, lon]` point sequences for map
//! rendering, and memoizes upstream lookups in a bounded-lifetime cache.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod normalize;
pub mod stations;
