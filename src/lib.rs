// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod backend;
pub mod config;
pub mod envelope;
pub mod error;
pub mod query;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::backend::{build_backend, DynNewsBackend, NewsBackend};
pub use crate::config::Settings;
pub use crate::envelope::{Envelope, FailureKind};
pub use crate::error::FetchError;
