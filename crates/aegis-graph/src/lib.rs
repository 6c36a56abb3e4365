//! # AEGIS Graph
//!
//! Neo4j integration for the risk management API: connection client,
//! JSON-to-Bolt parameter bridging, and one module per query family.

pub mod client;
pub mod queries;
pub mod value;

pub use client::{GraphClient, GraphConfig, GraphCounts};
