//! # Shared Types Crate
//!
//! This crate contains the entities, gateway errors and cross-subsystem
//! signals used by every Tether client subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Types that cross a subsystem boundary are
//!   defined here, never duplicated.
//! - **No Partial Sessions**: a [`Session`] always carries both a token and a
//!   profile; "logged out" is `Option::None`, never a half-filled struct.
//! - **Snapshots are read-only**: report snapshots mirror the backend's nested
//!   match-detail shape and are never edited client-side.

pub mod entities;
pub mod errors;
pub mod signals;

pub use entities::*;
pub use errors::*;
pub use signals::*;
