//! Generic CRUD queries over labeled nodes.
//!
//! Query text is assembled from the serialized property names of the typed
//! models; values are always bound as parameters, never spliced into the
//! statement.

use aegis_core::{to_properties, Entity, Properties};
use anyhow::{Context, Result};
use neo4rs::{Node, Query};

use crate::value::{bind_json, node_properties};
use crate::GraphClient;

/// List every node with the given label as a property map.
pub async fn list_all(client: &GraphClient, label: &str) -> Result<Vec<Properties>> {
    let query = Query::new(format!("MATCH (n:{label}) RETURN n"));
    let rows = client.query(query).await?;

    let mut nodes = Vec::new();
    for row in rows {
        let node: Node = row.get("n").context("Result row is missing node column")?;
        nodes.push(node_properties(&node));
    }
    Ok(nodes)
}

/// Create a node from a typed model, returning the stored property map.
pub async fn create<E: Entity>(client: &GraphClient, model: &E) -> Result<Properties> {
    let props = to_properties(model);
    let mut query = Query::new(create_statement(E::LABEL, &props));
    for (key, value) in &props {
        query = bind_json(query, key, value);
    }

    let rows = client.query(query).await?;
    let row = rows
        .into_iter()
        .next()
        .context("Create query returned no rows")?;
    let node: Node = row.get("n")?;
    Ok(node_properties(&node))
}

/// Merge the provided fields onto the node matched by key.
///
/// Returns `None` when the key matches no node; nothing is created in that
/// case. Fields absent from the update keep their stored values.
pub async fn update<U: Entity>(
    client: &GraphClient,
    key: &str,
    model: &U,
) -> Result<Option<Properties>> {
    let props = to_properties(model);
    // Update shapes never carry the key field, so the key parameter name
    // cannot collide with a bound property.
    let mut query = Query::new(update_statement(U::LABEL, U::KEY, &props)).param(U::KEY, key);
    for (field, value) in &props {
        query = bind_json(query, field, value);
    }

    let rows = client.query(query).await?;
    match rows.into_iter().next() {
        Some(row) => {
            let node: Node = row.get("n")?;
            Ok(Some(node_properties(&node)))
        }
        None => Ok(None),
    }
}

/// Delete the node matched by key, detaching any edges first.
///
/// Returns whether a node was actually deleted.
pub async fn delete(
    client: &GraphClient,
    label: &str,
    key_field: &str,
    key: &str,
) -> Result<bool> {
    let query = Query::new(format!(
        "MATCH (n:{label} {{{key_field}: ${key_field}}}) DETACH DELETE n RETURN count(n) AS deleted"
    ))
    .param(key_field, key);

    let deleted: i64 = client.query_scalar(query, "deleted").await?.unwrap_or(0);
    Ok(deleted > 0)
}

fn create_statement(label: &str, props: &Properties) -> String {
    let fields: Vec<String> = props.keys().map(|k| format!("{k}: ${k}")).collect();
    format!("CREATE (n:{} {{{}}}) RETURN n", label, fields.join(", "))
}

fn update_statement(label: &str, key_field: &str, props: &Properties) -> String {
    if props.is_empty() {
        // An empty update is still a lookup: match and echo the node back.
        return format!("MATCH (n:{label} {{{key_field}: ${key_field}}}) RETURN n");
    }
    let assignments: Vec<String> = props.keys().map(|k| format!("n.{k} = ${k}")).collect();
    format!(
        "MATCH (n:{label} {{{key_field}: ${key_field}}}) SET {} RETURN n",
        assignments.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props_of(value: serde_json::Value) -> Properties {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_create_statement_lists_each_field() {
        let props = props_of(json!({"assetID": "A-1", "assetName": "Payroll DB"}));
        assert_eq!(
            create_statement("Asset", &props),
            "CREATE (n:Asset {assetID: $assetID, assetName: $assetName}) RETURN n"
        );
    }

    #[test]
    fn test_update_statement_assigns_each_field() {
        let props = props_of(json!({"criticality": "High", "owner": "SecOps"}));
        assert_eq!(
            update_statement("Asset", "assetID", &props),
            "MATCH (n:Asset {assetID: $assetID}) SET n.criticality = $criticality, n.owner = $owner RETURN n"
        );
    }

    #[test]
    fn test_empty_update_statement_is_a_lookup() {
        let props = Properties::new();
        assert_eq!(
            update_statement("Incident", "incidentID", &props),
            "MATCH (n:Incident {incidentID: $incidentID}) RETURN n"
        );
    }
}
