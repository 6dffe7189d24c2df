//! # Adapters
//!
//! Credential store implementations.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileCredentialStore;
pub use memory_store::InMemoryCredentialStore;
