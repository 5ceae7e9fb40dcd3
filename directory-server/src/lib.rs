//! Directory Server - supplier directory backend
//!
//! Suppliers are tagged with `#hashtags`; searchers filter the directory by
//! free text and get tag suggestions while typing. Admins curate suppliers,
//! triage contact reports and manage partner branding.
//!
//! # Modules
//!
//! ```text
//! directory-server/src/
//! ├── core/        # config, state, server, startup errors
//! ├── auth/        # JWT sessions and guards
//! ├── store/       # supplier/report/profile stores, auth provider, file storage
//! ├── lookup/      # CNPJ registry and CEP lookup
//! ├── services/    # supplier writes, logo processing
//! ├── api/         # HTTP handlers
//! ├── routes/      # router assembly
//! ├── middleware/  # request logging
//! └── utils/       # logger, input validation
//! ```
//!
//! The search core itself (tag index, suggestion engine, record filter,
//! suggestion controller) lives in `shared::search`.

pub mod api;
pub mod auth;
pub mod core;
pub mod lookup;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event logging under the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and install the global logger
///
/// Reads `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR` directly since the logger
/// must be up before [`Config::from_env`] reports anything.
pub fn setup_environment() -> Result<(), ServerError> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(ServerError::Config(format!(".env: {e}")));
    }

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());
    let dir = std::env::var("LOG_DIR").ok();

    init_logger_with_file(level.as_deref(), json, dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ___  _                __
   / _ \(_)_______ ____  / /____  ______ __
  / // / / __/ -_) __/ / __/ _ \/ __/ // /
 /____/_/_/  \__/\__/  \__/\___/_/  \_, /
                                   /___/
    "#
    );
}
