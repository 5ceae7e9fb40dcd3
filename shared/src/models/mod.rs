//! Data models
//!
//! Shared between directory-server and its clients (via API).
//! Serde names follow the managed backend's column names.

pub mod company;
pub mod partner;
pub mod profile;
pub mod report;
pub mod supplier;

// Re-exports
pub use company::*;
pub use partner::*;
pub use profile::*;
pub use report::*;
pub use supplier::*;
