//! # Domain Layer
//!
//! Tracked match, lifecycle state, score and errors.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
