//! Authentication and authorization
//!
//! - [`JwtService`] - token issue and validation
//! - [`CurrentUser`] - caller context injected by [`require_auth`]
//! - [`require_admin`] - admin-only route guard

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, bearer_token};
pub use middleware::{CurrentUserExt, require_admin, require_auth};
