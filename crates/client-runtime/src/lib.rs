//! # Tether Client Runtime
//!
//! Wiring for the Tether client subsystems.
//!
//! ## Modular Structure
//!
//! - `container/` - `ClientConfig` and the `TetherClient` holding every subsystem
//! - `adapters/` - `HttpGateway`, the reqwest implementation of the outbound ports
//! - `telemetry` - tracing subscriber setup
//!
//! ## Subsystems
//!
//! 1. Session Controller (tc-01) - login, logout, credential persistence
//! 2. Report Submission Flow (tc-02) - draft, validation, submit
//! 3. Match Lifecycle Controller (tc-03) - review, decisions, return home
//! 4. View Router (tc-04) - state to screen

pub mod adapters;
pub mod container;
pub mod telemetry;

pub use adapters::HttpGateway;
pub use container::{ClientConfig, ClientError, TetherClient};
pub use telemetry::init_logging;
