//! Utility module
//!
//! - [`AppError`] / [`AppResult`] re-exported from `shared::error`
//! - logger setup
//! - input validation and normalization

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
