//! # Domain Layer

pub mod entities;
pub mod routing;

pub use entities::*;
pub use routing::*;
