//! AEGIS Server
//!
//! Long-running HTTP server for the cybersecurity risk management graph.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aegis_graph::{GraphClient, GraphConfig};

#[derive(Parser)]
#[command(
    name = "aegis-server",
    about = "REST facade over the cybersecurity risk management graph",
    version
)]
struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "5000")]
    port: u16,

    /// Bolt endpoint of the Neo4j database
    #[arg(long, env = "AEGIS_DB_ENDPOINT", default_value = "bolt://localhost:7687")]
    db_endpoint: String,

    /// Database username
    #[arg(long, env = "AEGIS_DB_USERNAME", default_value = "neo4j")]
    db_username: String,

    /// Database password
    #[arg(
        long,
        env = "AEGIS_DB_PASSWORD",
        default_value = "password",
        hide_env_values = true
    )]
    db_password: String,

    /// Origin allowed to make cross-origin requests (the dashboard)
    #[arg(long, env = "AEGIS_CORS_ORIGIN", default_value = "http://localhost:3000")]
    cors_origin: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aegis_server=info,aegis_web=debug,aegis_graph=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = GraphConfig {
        endpoint: cli.db_endpoint,
        username: cli.db_username,
        password: cli.db_password,
    };
    let graph = GraphClient::connect(&config).await?;

    let counts = graph.counts().await?;
    tracing::info!(
        nodes = counts.nodes,
        relationships = counts.relationships,
        "Graph database ready"
    );

    println!();
    println!("  {} {}", "AEGIS".cyan().bold(), "Risk Management API".bold());
    println!();
    println!("  {}       http://{}:{}", "API".green(), cli.host, cli.port);
    println!("  {}  {}", "Database".green(), config.endpoint);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    aegis_web::run_server(graph, &cli.host, cli.port, &cli.cors_origin).await?;
    Ok(())
}
