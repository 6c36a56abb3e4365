//! Application state.

use aegis_graph::GraphClient;

/// State shared across handlers: the injected graph client.
///
/// The client wraps a connection pool, so the per-request clone is cheap.
/// Handlers hold no other shared state.
#[derive(Clone)]
pub struct AppState {
    pub graph: GraphClient,
}

impl AppState {
    pub fn new(graph: GraphClient) -> Self {
        Self { graph }
    }
}
