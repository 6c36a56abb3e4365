//! Route handlers, one module per endpoint group.

pub mod assets;
pub mod controls;
pub mod graph;
pub mod incidents;
pub mod links;
pub mod threats;
pub mod vulnerabilities;

/// Liveness banner.
pub async fn home() -> &'static str {
    "Cybersecurity Risk Management API is running!"
}
