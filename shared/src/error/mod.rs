//! Error codes and the error envelope shared by server and clients
//!
//! Numeric codes are grouped by range:
//!
//! | Range | Area |
//! |-------|------|
//! | 0xxx | general |
//! | 1xxx | authentication |
//! | 2xxx | permission |
//! | 3xxx | suppliers |
//! | 4xxx | reports |
//! | 5xxx | registry lookups |
//! | 65xx | file upload |
//! | 9xxx | system and remote backend |
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::InvalidPhone).with_detail("field", "whatsapp");
//! let body = ApiResponse::error(&err);
//! assert_eq!(body.code, 3002);
//! assert_eq!(err.http_status().as_u16(), 400);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
