//! # Application Layer
//!
//! Session controller service.

pub mod service;

pub use service::SessionController;
