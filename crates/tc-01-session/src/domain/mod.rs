//! # Domain Module
//!
//! Core domain types for the Session Controller.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
