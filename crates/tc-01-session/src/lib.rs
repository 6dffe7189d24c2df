//! # TC-01 Session Controller
//!
//! Owns the authenticated identity of the running client.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Restore a persisted session optimistically on start-up
//! - Log in / sign up against the auth endpoints
//! - Persist token + profile durably, clear them on logout
//! - Apply backend profile updates and password changes
//!
//! ## Ordering Guarantees
//!
//! | Operation | Order |
//! |-----------|-------|
//! | login / signup / profile update | credential write happens-before memory update |
//! | logout | memory clear (and listeners) happens-before credential clear |
//!
//! ## Module Structure
//!
//! ```text
//! tc-01-session/
//! ├── domain/          # PersistedCredentials, AccountDetails, SessionError
//! ├── ports/           # SessionApi (inbound), AuthGateway + CredentialStore (outbound)
//! ├── adapters/        # InMemoryCredentialStore, FileCredentialStore
//! └── application/     # SessionController
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{FileCredentialStore, InMemoryCredentialStore};
pub use application::SessionController;
pub use domain::{
    AccountDetails, AuthGrant, CredentialStoreError, PersistedCredentials, SessionError,
};
pub use ports::{AuthGateway, CredentialStore, MockAuthGateway, SessionApi};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
