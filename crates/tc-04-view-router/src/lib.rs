//! # TC-04 View Router
//!
//! Derives the visible screen from `{session, lifecycle phase, marker, intent}`.
//!
//! **Subsystem ID:** 04
//!
//! The mapping is a pure function; the router itself only remembers the
//! user's navigation intent. Nothing here calls back into other subsystems.

#![warn(clippy::all)]

pub mod application;
pub mod domain;

// Re-exports
pub use application::ViewRouter;
pub use domain::{resolve_screen, NavigationIntent, ReviewMode, RouterInput, Screen};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
