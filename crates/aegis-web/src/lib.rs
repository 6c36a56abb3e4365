//! AEGIS Web Server
//!
//! Axum REST facade over the risk management graph. Every route runs one
//! parameterized Cypher query and flattens the result.

pub mod error;
pub mod routes;
pub mod state;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use aegis_graph::GraphClient;
use state::AppState;

/// Create the application router.
///
/// One CORS layer with a single configurable origin covers every route.
pub fn create_router(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::home))
        // Assets
        .route(
            "/assets",
            get(routes::assets::list_assets).post(routes::assets::create_asset),
        )
        .route(
            "/assets/{asset_id}",
            put(routes::assets::update_asset).delete(routes::assets::delete_asset),
        )
        // Threats
        .route(
            "/threats",
            get(routes::threats::list_threats).post(routes::threats::create_threat),
        )
        .route(
            "/threats/{threat_id}",
            put(routes::threats::update_threat).delete(routes::threats::delete_threat),
        )
        // Vulnerabilities
        .route(
            "/vulnerabilities",
            get(routes::vulnerabilities::list_vulnerabilities)
                .post(routes::vulnerabilities::create_vulnerability),
        )
        .route(
            "/vulnerabilities/{vuln_id}",
            put(routes::vulnerabilities::update_vulnerability)
                .delete(routes::vulnerabilities::delete_vulnerability),
        )
        // Controls
        .route(
            "/controls",
            get(routes::controls::list_controls).post(routes::controls::create_control),
        )
        .route(
            "/controls/{control_id}",
            put(routes::controls::update_control).delete(routes::controls::delete_control),
        )
        // Incidents
        .route(
            "/incidents",
            get(routes::incidents::list_incidents).post(routes::incidents::create_incident),
        )
        .route(
            "/incidents/{incident_id}",
            put(routes::incidents::update_incident).delete(routes::incidents::delete_incident),
        )
        // Relationships and derived views
        .route("/link_asset_threat", post(routes::links::link_asset_threat))
        .route(
            "/link_asset_vulnerability",
            post(routes::links::link_asset_vulnerability),
        )
        .route("/relationships", get(routes::links::list_relationships))
        .route("/calculate_risk", get(routes::links::calculate_risk))
        .route("/graph", get(routes::graph::export_graph))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(
    graph: GraphClient,
    host: &str,
    port: u16,
    cors_origin: &str,
) -> anyhow::Result<()> {
    let origin: HeaderValue = cors_origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {cors_origin}"))?;
    let state = AppState::new(graph);
    let app = create_router(state, origin);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!("API server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
