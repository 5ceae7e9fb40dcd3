use std::str::FromStr;

use shared::search::{MatchPolicy, SuggestConfig};

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Which collaborator implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Process-local stores, lost on restart
    Memory,
    /// Supabase PostgREST / GoTrue / Storage
    Supabase,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Supabase => "supabase",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "supabase" => Ok(BackendKind::Supabase),
            other => Err(ServerError::Config(format!(
                "BACKEND must be 'memory' or 'supabase', got '{other}'"
            ))),
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | HTTP_PORT | 3000 | |
/// | ENVIRONMENT | development | secrets are mandatory elsewhere |
/// | BACKEND | memory | `memory` or `supabase` |
/// | SUPABASE_URL | - | required for `supabase` |
/// | SUPABASE_KEY | - | required for `supabase` |
/// | LOGO_BUCKET | logos | storage bucket for partner logos |
/// | PARTNER_NAME | - | partner shown with the logo |
/// | BRASIL_API_URL | https://brasilapi.com.br/api | CNPJ and CEP lookups |
/// | LOOKUP_TIMEOUT_MS | 10000 | |
/// | ADMIN_ACCESS_CODE | admin123 (dev only) | sign-up code granting `admin` |
/// | SEARCHER_ACCESS_CODE | buscador123 (dev only) | sign-up code granting `buscador` |
/// | FORM_SUGGEST_MIN_LEN | 2 | |
/// | FORM_SUGGEST_LIMIT | 5 | |
/// | SEARCH_SUGGEST_MIN_LEN | 4 | |
/// | MAX_LOGO_BYTES | 5242880 | |
/// | LOG_LEVEL | info | |
/// | LOG_JSON | false | |
/// | LOG_DIR | - | daily rolling file when the directory exists |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub backend: BackendKind,
    pub supabase_url: String,
    pub supabase_key: String,
    pub logo_bucket: String,
    pub partner_name: Option<String>,
    pub brasil_api_url: String,
    pub lookup_timeout_ms: u64,
    pub admin_access_code: String,
    pub searcher_access_code: String,
    /// Tag field completion (prefix of the last token)
    pub form_suggest: SuggestConfig,
    /// Search bar suggestions (substring anywhere)
    pub search_suggest: SuggestConfig,
    pub max_logo_bytes: usize,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Read a secret; outside development it must be set and non-empty
    fn require_secret(name: &str, environment: &str) -> Result<String, ServerError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ServerError::Config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    /// Access codes fall back to well-known values only in development
    fn access_code(name: &str, dev_default: &str, environment: &str) -> Result<String, ServerError> {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => Ok(v),
            _ if environment == "development" => Ok(dev_default.to_string()),
            _ => Self::require_secret(name, environment),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let backend: BackendKind = std::env::var("BACKEND")
            .unwrap_or_else(|_| "memory".into())
            .parse()?;

        let (supabase_url, supabase_key) = match backend {
            BackendKind::Supabase => (
                std::env::var("SUPABASE_URL").map_err(|_| {
                    ServerError::Config("SUPABASE_URL must be set for the supabase backend".into())
                })?,
                std::env::var("SUPABASE_KEY")
                    .ok()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        ServerError::Config("SUPABASE_KEY must be set for the supabase backend".into())
                    })?,
            ),
            BackendKind::Memory => (String::new(), String::new()),
        };

        let defaults = Self::default_with(environment.clone(), JwtConfig::load(&environment)?);

        Ok(Self {
            http_port: env_or("HTTP_PORT", defaults.http_port),
            backend,
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_key,
            logo_bucket: std::env::var("LOGO_BUCKET").unwrap_or(defaults.logo_bucket),
            partner_name: std::env::var("PARTNER_NAME").ok().filter(|n| !n.is_empty()),
            brasil_api_url: std::env::var("BRASIL_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.brasil_api_url),
            lookup_timeout_ms: env_or("LOOKUP_TIMEOUT_MS", defaults.lookup_timeout_ms),
            admin_access_code: Self::access_code("ADMIN_ACCESS_CODE", "admin123", &environment)?,
            searcher_access_code: Self::access_code(
                "SEARCHER_ACCESS_CODE",
                "buscador123",
                &environment,
            )?,
            form_suggest: SuggestConfig {
                policy: MatchPolicy::PrefixOfLastToken,
                min_len: env_or("FORM_SUGGEST_MIN_LEN", defaults.form_suggest.min_len),
                limit: Some(env_or(
                    "FORM_SUGGEST_LIMIT",
                    defaults.form_suggest.limit.unwrap_or(5),
                )),
            },
            search_suggest: SuggestConfig {
                policy: MatchPolicy::SubstringAnywhere,
                min_len: env_or("SEARCH_SUGGEST_MIN_LEN", defaults.search_suggest.min_len),
                limit: None,
            },
            max_logo_bytes: env_or("MAX_LOGO_BYTES", defaults.max_logo_bytes),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env_or("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt: defaults.jwt,
            environment,
        })
    }

    /// Development defaults with an in-memory backend, no environment read
    fn default_with(environment: String, jwt: JwtConfig) -> Self {
        Self {
            http_port: 3000,
            environment,
            backend: BackendKind::Memory,
            supabase_url: String::new(),
            supabase_key: String::new(),
            logo_bucket: "logos".into(),
            partner_name: None,
            brasil_api_url: "https://brasilapi.com.br/api".into(),
            lookup_timeout_ms: 10_000,
            admin_access_code: "admin123".into(),
            searcher_access_code: "buscador123".into(),
            form_suggest: SuggestConfig::FORM_ENTRY,
            search_suggest: SuggestConfig::SEARCH_BAR,
            max_logo_bytes: 5 * 1024 * 1024,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            jwt,
        }
    }

    /// Suggestion settings for a surface
    pub fn suggest_config(&self, surface: shared::search::Surface) -> &SuggestConfig {
        match surface {
            shared::search::Surface::Form => &self.form_suggest,
            shared::search::Surface::Search => &self.search_suggest,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    /// Development configuration on the memory backend (used by tests)
    fn default() -> Self {
        Self::default_with("development".into(), JwtConfig::default())
    }
}
