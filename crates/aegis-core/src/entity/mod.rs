//! Graph entity definitions.
//!
//! Every node label gets a typed request shape instead of an open map, so a
//! misnamed property in a payload is rejected at the boundary rather than
//! written into the graph.

pub mod model;

use serde::Serialize;

pub use model::{
    Asset, AssetUpdate, Control, ControlUpdate, Incident, IncidentUpdate, Numberish, Threat,
    ThreatUpdate, Vulnerability, VulnerabilityUpdate,
};

/// Property map of a graph node, as returned to API clients.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A typed request shape bound to one node label.
///
/// `KEY` is the property used for exact-match lookup (update/delete).
pub trait Entity: Serialize {
    const LABEL: &'static str;
    const KEY: &'static str;
}

/// Serialize a model into the property map that will be written to the
/// graph. Absent optional fields are skipped during serialization; explicit
/// JSON nulls are dropped here so they never become stored properties.
pub fn to_properties<T: Serialize>(model: &T) -> Properties {
    match serde_json::to_value(model) {
        Ok(serde_json::Value::Object(map)) => map
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .collect(),
        _ => Properties::new(),
    }
}
