//! Shared types for the supplier directory
//!
//! Domain models, the unified error system, API DTOs and the pure
//! tag-search core used by the directory server.

pub mod client;
pub mod error;
pub mod models;
pub mod search;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
