//! # Adapters
//!
//! Outbound port implementations for the real backend.

pub mod http_gateway;

pub use http_gateway::HttpGateway;
