//! # Domain Layer
//!
//! Drafts, validated reports and submission errors.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
