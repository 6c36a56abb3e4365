//! Whole-graph export in node-link form.
//!
//! Feeds graph visualizations: every `(n)-[r]->(m)` triple system-wide,
//! with nodes deduplicated by the database's internal node id.

use std::collections::BTreeMap;

use aegis_core::Properties;
use anyhow::Result;
use neo4rs::{Node, Query};
use serde::Serialize;

use crate::value::node_properties;
use crate::GraphClient;

/// A node in the export, keyed by the database's internal id.
#[derive(Debug, Clone, Serialize)]
pub struct ExportNode {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Properties,
}

/// A directed edge between two exported nodes.
#[derive(Debug, Clone, Serialize)]
pub struct ExportLink {
    pub source: i64,
    pub target: i64,
    pub label: String,
}

/// The full graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

/// Export every relationship triple in the database.
pub async fn export_graph(client: &GraphClient) -> Result<GraphExport> {
    let query =
        Query::new("MATCH (n)-[r]->(m) RETURN n, m, type(r) AS relationship".to_string());
    let rows = client.query(query).await?;

    let mut triples = Vec::with_capacity(rows.len());
    for row in rows {
        let source: Node = row.get("n")?;
        let target: Node = row.get("m")?;
        let label: String = row.get("relationship")?;
        triples.push((export_node(&source), export_node(&target), label));
    }
    Ok(collect_graph(triples))
}

fn export_node(node: &Node) -> ExportNode {
    ExportNode {
        id: node.id(),
        labels: node.labels().into_iter().map(String::from).collect(),
        properties: node_properties(node),
    }
}

/// Accumulate triples into the export, deduplicating nodes by id.
///
/// A node appearing in several edges is emitted once; every edge keeps its
/// own link entry.
fn collect_graph(triples: Vec<(ExportNode, ExportNode, String)>) -> GraphExport {
    let mut nodes = BTreeMap::new();
    let mut links = Vec::with_capacity(triples.len());

    for (source, target, label) in triples {
        links.push(ExportLink {
            source: source.id,
            target: target.id,
            label,
        });
        nodes.insert(source.id, source);
        nodes.insert(target.id, target);
    }

    GraphExport {
        nodes: nodes.into_values().collect(),
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, label: &str) -> ExportNode {
        ExportNode {
            id,
            labels: vec![label.to_string()],
            properties: Properties::new(),
        }
    }

    #[test]
    fn test_shared_node_is_emitted_once() {
        // One asset exposed to a threat and linked to a vulnerability: the
        // asset shows up as the source of both edges but must be exported
        // exactly once.
        let triples = vec![
            (node(1, "Asset"), node(2, "Threat"), "EXPOSED_TO".to_string()),
            (node(1, "Asset"), node(3, "Vulnerability"), "LINKED_TO".to_string()),
        ];

        let export = collect_graph(triples);

        assert_eq!(export.nodes.len(), 3);
        assert_eq!(export.links.len(), 2);
    }

    #[test]
    fn test_links_preserve_direction_and_label() {
        let triples = vec![(node(7, "Asset"), node(9, "Threat"), "EXPOSED_TO".to_string())];

        let export = collect_graph(triples);

        assert_eq!(export.links[0].source, 7);
        assert_eq!(export.links[0].target, 9);
        assert_eq!(export.links[0].label, "EXPOSED_TO");
    }

    #[test]
    fn test_empty_graph_exports_empty_collections() {
        let export = collect_graph(Vec::new());
        assert!(export.nodes.is_empty());
        assert!(export.links.is_empty());
    }
}
