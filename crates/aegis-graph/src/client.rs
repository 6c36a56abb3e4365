//! Neo4j connection client.

use anyhow::{Context, Result};
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use tracing::info;

/// Connection settings for the graph database.
///
/// Populated from CLI flags or `AEGIS_DB_*` environment variables; the
/// defaults match a stock local Neo4j install.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Shared handle to the Neo4j connection pool.
///
/// Cheap to clone; every request handler borrows a pooled connection for
/// the duration of a single query.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j and verify it responds.
    ///
    /// neo4rs builds its pool lazily, so `Graph::connect` succeeds even when
    /// the endpoint is unreachable. A `RETURN 1` ping runs immediately so a
    /// misconfigured endpoint fails at startup rather than on the first
    /// request.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.endpoint)
            .user(&config.username)
            .password(&config.password)
            .db("neo4j")
            .max_connections(16)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;

        info!(endpoint = %config.endpoint, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Run a query, discarding any results.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph
            .run(query)
            .await
            .context("Neo4j query execution failed")?;
        Ok(())
    }

    /// Run a query and collect all result rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self
            .graph
            .execute(query)
            .await
            .context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Run a query and read a single named field from the first row.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let value: T = row
                .get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Node and relationship totals, logged at startup.
    pub async fn counts(&self) -> Result<GraphCounts> {
        let node_query = Query::new("MATCH (n) RETURN count(n) AS count".to_string());
        let rel_query = Query::new("MATCH ()-[r]->() RETURN count(r) AS count".to_string());

        let nodes: i64 = self.query_scalar(node_query, "count").await?.unwrap_or(0);
        let relationships: i64 = self.query_scalar(rel_query, "count").await?.unwrap_or(0);

        Ok(GraphCounts {
            nodes: nodes as usize,
            relationships: relationships as usize,
        })
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}
