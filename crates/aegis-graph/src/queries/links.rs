//! Relationship queries: linking, exposure listing, risk scoring.
//!
//! One naming convention everywhere a query matches a node: assets by
//! `assetName`, threats by `name`, vulnerabilities by `vulnName`. No create
//! path writes a `name` property on assets, so matching them on anything
//! else never resolves.

use aegis_core::entity::Numberish;
use anyhow::{anyhow, Result};
use neo4rs::Query;
use serde::Serialize;
use serde_json::Value;

use crate::GraphClient;

/// Severity-to-risk multiplier for exposure scoring.
const RISK_MULTIPLIER: i64 = 10;

/// An `(Asset)-[EXPOSED_TO]->(Threat)` pair.
#[derive(Debug, Clone, Serialize)]
pub struct ExposurePair {
    pub asset: String,
    pub threat: String,
}

/// A computed exposure risk row. Scores are never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RiskEntry {
    pub asset: String,
    pub threat: String,
    pub risk_score: i64,
}

/// Outcome of linking an asset to a vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulnerabilityLink {
    Linked,
    AssetMissing,
    VulnerabilityMissing,
}

/// Merge an `EXPOSED_TO` edge between an asset and a threat.
///
/// Returns the matched pairs; an empty result means at least one side did
/// not exist and nothing was merged.
pub async fn link_asset_threat(
    client: &GraphClient,
    asset_name: &str,
    threat_name: &str,
) -> Result<Vec<ExposurePair>> {
    let query = Query::new(
        "MATCH (a:Asset {assetName: $asset_name}), (t:Threat {name: $threat_name})
         MERGE (a)-[:EXPOSED_TO]->(t)
         RETURN a.assetName AS asset, t.name AS threat"
            .to_string(),
    )
    .param("asset_name", asset_name)
    .param("threat_name", threat_name);

    let rows = client.query(query).await?;
    let mut pairs = Vec::new();
    for row in rows {
        pairs.push(ExposurePair {
            asset: row.get("asset")?,
            threat: row.get("threat")?,
        });
    }
    Ok(pairs)
}

/// Merge a `LINKED_TO` edge between an asset and a vulnerability.
///
/// Both endpoints are checked up front so the caller can report which one
/// is missing.
pub async fn link_asset_vulnerability(
    client: &GraphClient,
    asset_name: &str,
    vuln_name: &str,
) -> Result<VulnerabilityLink> {
    if !exists(client, "MATCH (a:Asset {assetName: $name}) RETURN count(a) AS total", asset_name)
        .await?
    {
        return Ok(VulnerabilityLink::AssetMissing);
    }
    if !exists(
        client,
        "MATCH (v:Vulnerability {vulnName: $name}) RETURN count(v) AS total",
        vuln_name,
    )
    .await?
    {
        return Ok(VulnerabilityLink::VulnerabilityMissing);
    }

    let query = Query::new(
        "MATCH (a:Asset {assetName: $asset_name}), (v:Vulnerability {vulnName: $vuln_name})
         MERGE (a)-[:LINKED_TO]->(v)"
            .to_string(),
    )
    .param("asset_name", asset_name)
    .param("vuln_name", vuln_name);
    client.execute(query).await?;

    Ok(VulnerabilityLink::Linked)
}

/// List every exposure pair currently in the graph.
pub async fn list_exposures(client: &GraphClient) -> Result<Vec<ExposurePair>> {
    let query = Query::new(
        "MATCH (a:Asset)-[:EXPOSED_TO]->(t:Threat)
         RETURN a.assetName AS asset, t.name AS threat"
            .to_string(),
    );

    let rows = client.query(query).await?;
    let mut pairs = Vec::new();
    for row in rows {
        pairs.push(ExposurePair {
            asset: row.get::<Option<String>>("asset")?.unwrap_or_default(),
            threat: row.get::<Option<String>>("threat")?.unwrap_or_default(),
        });
    }
    Ok(pairs)
}

/// Compute `severityLevel * 10` for every exposure edge.
///
/// Fails when a threat's severity cannot be coerced to an integer.
pub async fn calculate_risk(client: &GraphClient) -> Result<Vec<RiskEntry>> {
    let query = Query::new(
        "MATCH (a:Asset)-[:EXPOSED_TO]->(t:Threat)
         RETURN a.assetName AS asset, t.name AS threat, t.severityLevel AS severity"
            .to_string(),
    );

    let rows = client.query(query).await?;
    let mut entries = Vec::new();
    for row in rows {
        let severity: Value = row.get("severity").unwrap_or(Value::Null);
        let level = coerce_severity(&severity)
            .ok_or_else(|| anyhow!("Threat severityLevel {severity} is not numeric"))?;

        entries.push(RiskEntry {
            asset: row.get::<Option<String>>("asset")?.unwrap_or_default(),
            threat: row.get::<Option<String>>("threat")?.unwrap_or_default(),
            risk_score: level * RISK_MULTIPLIER,
        });
    }
    Ok(entries)
}

async fn exists(client: &GraphClient, statement: &str, name: &str) -> Result<bool> {
    let query = Query::new(statement.to_string()).param("name", name);
    let total: i64 = client.query_scalar(query, "total").await?.unwrap_or(0);
    Ok(total > 0)
}

/// `severityLevel` is stored as either a number or a numeric string.
fn coerce_severity(value: &Value) -> Option<i64> {
    serde_json::from_value::<Numberish>(value.clone())
        .ok()?
        .as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_severity_from_string() {
        assert_eq!(coerce_severity(&json!("3")), Some(3));
    }

    #[test]
    fn test_coerce_severity_from_numbers() {
        assert_eq!(coerce_severity(&json!(3)), Some(3));
        assert_eq!(coerce_severity(&json!(3.9)), Some(3));
    }

    #[test]
    fn test_coerce_severity_rejects_non_numeric() {
        assert_eq!(coerce_severity(&json!("critical")), None);
        assert_eq!(coerce_severity(&json!(null)), None);
        assert_eq!(coerce_severity(&json!(true)), None);
        assert_eq!(coerce_severity(&json!(["3"])), None);
    }

    #[test]
    fn test_string_severity_scores_thirty() {
        let level = coerce_severity(&json!("3")).unwrap();
        assert_eq!(level * RISK_MULTIPLIER, 30);
    }
}
