//! # TC-03 Match Lifecycle Controller
//!
//! Drives a proposed match from loading to a terminal user decision.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## State Machine
//!
//! ```text
//!   Idle ──load──▶ Loading ──ok──▶ Pending ──confirm──▶ Confirmed ─┐
//!     ▲               │                │                           ├─ delay ─▶ ReturnHome
//!     │               └──err──▶ Failed └──reject───▶ Rejected ─────┘
//!     └──────────────── reset (session ended) ◀──────────────────────
//! ```
//!
//! | Rule | Effect |
//! |------|--------|
//! | Decisions only from Pending | a second confirm/reject never reaches the backend |
//! | Optimistic decisions | local transition first, backend call best-effort |
//! | Marker | set on confirm, cleared on reject, seeded by status restore |
//! | Return home | one signal per decision, cancellable, after `return_delay_ms` |
//!
//! ## Module Structure
//!
//! ```text
//! tc-03-match-lifecycle/
//! ├── domain/          # TrackedMatch, LifecycleState, MatchScore, MatchError
//! ├── ports/           # MatchLifecycleApi (inbound), MatchGateway (outbound)
//! ├── application/     # MatchLifecycleController
//! └── config.rs        # MatchLifecycleConfig
//! ```

#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::MatchLifecycleController;
pub use config::{MatchLifecycleConfig, DEFAULT_RETURN_DELAY_MS};
pub use domain::{
    LifecycleState, MatchError, MatchScore, MatchStatus, TrackedMatch, Transition,
};
pub use ports::{
    ConfirmedMatchInfo, MatchGateway, MatchLifecycleApi, MatchStatusReport, MockMatchGateway,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
