//! # Client Container
//!
//! Configuration and the wired client.

pub mod client;
pub mod config;

pub use client::{ClientError, TetherClient};
pub use config::{ApiConfig, ClientConfig, ConfigError, StorageConfig, TelemetryConfig};
