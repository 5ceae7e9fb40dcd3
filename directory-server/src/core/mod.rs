//! Core module - configuration, state and startup errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared state handed to every handler
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{BackendKind, Config};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::{SeenReports, ServerState, TagIndexCache};
