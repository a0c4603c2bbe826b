//! billscan Gateway HTTP API Server
//!
//! Hosts the bill extraction endpoint and a health probe.

pub mod extract_api;
pub mod health_api;
pub mod server;

pub use server::{build_router, start_server, GatewayState};
