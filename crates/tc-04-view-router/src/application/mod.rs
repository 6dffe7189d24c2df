//! # Application Layer

pub mod router;

pub use router::ViewRouter;
