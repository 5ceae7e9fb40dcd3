//! Session tokens
//!
//! Login hands out an HS256 token carrying the user's id, email and role.
//! The managed backend's own session is not forwarded to clients; every
//! later request is authorized from these claims alone, so a role change
//! takes effect on the next login.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;
const DEFAULT_LIFETIME_MINUTES: i64 = 24 * 60;
const DEFAULT_ISSUER: &str = "directory-server";
const DEFAULT_AUDIENCE: &str = "directory-clients";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub lifetime_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// `JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`, `JWT_AUDIENCE`.
    ///
    /// A missing secret is only tolerated in development, where a random
    /// one is used and sessions end with the process.
    pub fn load(environment: &str) -> Result<Self, JwtError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() < MIN_SECRET_LEN => {
                return Err(JwtError::Config(format!(
                    "JWT_SECRET needs at least {MIN_SECRET_LEN} characters"
                )));
            }
            Ok(secret) => secret,
            Err(_) if environment == "development" => {
                tracing::warn!("JWT_SECRET unset, sessions will not survive a restart");
                random_secret()?
            }
            Err(_) => {
                return Err(JwtError::Config(format!(
                    "JWT_SECRET is required when ENVIRONMENT={environment}"
                )));
            }
        };

        let env = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };

        Ok(Self {
            secret,
            lifetime_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LIFETIME_MINUTES),
            issuer: env("JWT_ISSUER", DEFAULT_ISSUER),
            audience: env("JWT_AUDIENCE", DEFAULT_AUDIENCE),
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("lifetime_minutes", &self.lifetime_minutes)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        // ring only fails here when the OS has no entropy source
        let secret = random_secret().unwrap_or_else(|_| "x".repeat(MIN_SECRET_LEN * 2));
        Self {
            secret,
            lifetime_minutes: DEFAULT_LIFETIME_MINUTES,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Auth user id
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("token rejected: {0}")]
    Rejected(String),

    #[error("could not sign token: {0}")]
    Signing(String),

    #[error("no entropy available for a JWT secret")]
    Entropy,

    #[error("{0}")]
    Config(String),
}

/// 32 random bytes, hex encoded
pub fn random_secret() -> Result<String, JwtError> {
    let mut bytes = [0u8; 32];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| JwtError::Entropy)?;
    Ok(hex::encode(bytes))
}

/// Token out of an `Authorization` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("lifetime_minutes", &self.config.lifetime_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["sub", "exp", "iss", "aud"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            config,
        }
    }

    pub fn generate_token(&self, user_id: &str, email: &str, role: Role) -> Result<String, JwtError> {
        let issued = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: issued.timestamp(),
            exp: (issued + Duration::minutes(self.config.lifetime_minutes)).timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Rejected(e.to_string()),
            })
    }
}

/// The signed-in caller, as the auth middleware saw it
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}
