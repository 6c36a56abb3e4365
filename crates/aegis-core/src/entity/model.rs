//! Entity request models.
//!
//! Field names serialize to the exact property names stored in the graph
//! (`assetID`, `dataSensitivity`, ...). Create shapes require only the key
//! property; update shapes are fully optional and merge onto the node.

use serde::{Deserialize, Serialize};

use super::Entity;

/// A property value that arrives as either a number or a numeric string.
///
/// Seed data stores `severityLevel` both ways, and risk calculation must
/// accept either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numberish {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numberish {
    /// Coerce to an integer, truncating floats and parsing integral text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Numberish::Int(i) => Some(*i),
            Numberish::Float(f) => Some(f.trunc() as i64),
            Numberish::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// An IT asset under risk management.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Asset {
    #[serde(rename = "assetID")]
    pub asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sensitivity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Partial update for an [`Asset`]. The key is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_sensitivity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Entity for Asset {
    const LABEL: &'static str = "Asset";
    const KEY: &'static str = "assetID";
}

impl Entity for AssetUpdate {
    const LABEL: &'static str = "Asset";
    const KEY: &'static str = "assetID";
}

/// A threat actor technique or campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Threat {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<Numberish>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_assets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_identified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_vector: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Partial update for a [`Threat`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThreatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<Numberish>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_assets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_identified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_vector: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Entity for Threat {
    const LABEL: &'static str = "Threat";
    const KEY: &'static str = "id";
}

impl Entity for ThreatUpdate {
    const LABEL: &'static str = "Threat";
    const KEY: &'static str = "id";
}

/// A known weakness that assets can be linked to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Vulnerability {
    #[serde(rename = "vulnID")]
    pub vuln_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vuln_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Partial update for a [`Vulnerability`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VulnerabilityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vuln_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl Entity for Vulnerability {
    const LABEL: &'static str = "Vulnerability";
    const KEY: &'static str = "vulnID";
}

impl Entity for VulnerabilityUpdate {
    const LABEL: &'static str = "Vulnerability";
    const KEY: &'static str = "vulnID";
}

/// A mitigating control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Control {
    #[serde(rename = "controlID")]
    pub control_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<String>,
}

/// Partial update for a [`Control`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ControlUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<String>,
}

impl Entity for Control {
    const LABEL: &'static str = "Control";
    const KEY: &'static str = "controlID";
}

impl Entity for ControlUpdate {
    const LABEL: &'static str = "Control";
    const KEY: &'static str = "controlID";
}

/// A recorded security incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Incident {
    #[serde(rename = "incidentID")]
    pub incident_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// Partial update for an [`Incident`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IncidentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl Entity for Incident {
    const LABEL: &'static str = "Incident";
    const KEY: &'static str = "incidentID";
}

impl Entity for IncidentUpdate {
    const LABEL: &'static str = "Incident";
    const KEY: &'static str = "incidentID";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::to_properties;
    use serde_json::json;

    #[test]
    fn test_asset_property_renames() {
        let asset: Asset = serde_json::from_value(json!({
            "assetID": "A-001",
            "assetName": "Payroll DB",
            "assetType": "Database",
            "dataSensitivity": "PII",
            "riskScore": 7.5
        }))
        .unwrap();

        assert_eq!(asset.asset_id, "A-001");
        assert_eq!(asset.data_sensitivity.as_deref(), Some("PII"));

        let props = to_properties(&asset);
        assert!(props.contains_key("assetID"));
        assert!(props.contains_key("dataSensitivity"));
        assert_eq!(props["riskScore"], json!(7.5));
        // Absent optionals never appear in the stored map.
        assert!(!props.contains_key("owner"));
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn test_threat_type_keyword_field() {
        let threat: Threat = serde_json::from_value(json!({
            "id": "T-01",
            "name": "Phishing",
            "type": "Social Engineering"
        }))
        .unwrap();

        assert_eq!(threat.threat_type.as_deref(), Some("Social Engineering"));
        assert_eq!(to_properties(&threat)["type"], json!("Social Engineering"));
    }

    #[test]
    fn test_severity_level_accepts_number_or_string() {
        let numeric: Threat =
            serde_json::from_value(json!({"id": "T-1", "severityLevel": 3})).unwrap();
        let text: Threat =
            serde_json::from_value(json!({"id": "T-2", "severityLevel": "3"})).unwrap();

        assert_eq!(numeric.severity_level, Some(Numberish::Int(3)));
        assert_eq!(text.severity_level, Some(Numberish::Text("3".into())));
    }

    #[test]
    fn test_numberish_coercion() {
        assert_eq!(Numberish::Int(3).as_i64(), Some(3));
        assert_eq!(Numberish::Float(3.9).as_i64(), Some(3));
        assert_eq!(Numberish::Text("3".into()).as_i64(), Some(3));
        assert_eq!(Numberish::Text(" 4 ".into()).as_i64(), Some(4));
        assert_eq!(Numberish::Text("high".into()).as_i64(), None);
    }

    #[test]
    fn test_update_serializes_only_provided_fields() {
        let update: AssetUpdate =
            serde_json::from_value(json!({"criticality": "High"})).unwrap();
        let props = to_properties(&update);

        assert_eq!(props.len(), 1);
        assert_eq!(props["criticality"], json!("High"));
    }

    #[test]
    fn test_explicit_null_is_dropped() {
        let update: AssetUpdate =
            serde_json::from_value(json!({"owner": null, "location": "DC-2"})).unwrap();
        let props = to_properties(&update);

        assert!(!props.contains_key("owner"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_miscased_key_is_rejected() {
        // A miscased property would otherwise land in the graph as a brand
        // new property next to the real one.
        let result: Result<Asset, _> =
            serde_json::from_value(json!({"assetID": "A-1", "AssetName": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let result: Result<Vulnerability, _> =
            serde_json::from_value(json!({"vulnName": "Log4Shell"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_entity_key_constants() {
        assert_eq!(Asset::KEY, "assetID");
        assert_eq!(Threat::KEY, "id");
        assert_eq!(Vulnerability::KEY, "vulnID");
        assert_eq!(Control::KEY, "controlID");
        assert_eq!(Incident::KEY, "incidentID");
        assert_eq!(AssetUpdate::LABEL, Asset::LABEL);
    }
}
