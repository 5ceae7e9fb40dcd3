//! Collaborator seams
//!
//! Every piece of persistence, authentication and file storage is delegated
//! to a remote backend. The traits here are what handlers and services see;
//! [`memory`] and [`supabase`] provide the two implementations.
//!
//! Each call is one independent round-trip: no retries, no transactions
//! spanning calls.

pub mod memory;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{NewReport, NewSupplier, Profile, ProfileFields, Report, Supplier, SupplierChanges};
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Failure of a store, storage or auth round-trip
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered with an error; its message is kept as-is
    #[error("{0}")]
    Remote(String),

    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected backend response: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Remote(msg) => AppError::remote(msg),
            StoreError::Transport(e) => {
                AppError::with_message(ErrorCode::NetworkError, e.to_string())
            }
            StoreError::Decode(msg) => AppError::database(msg),
        }
    }
}

/// Failure of sign-in / sign-up
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or password
    #[error("{0}")]
    InvalidCredentials(String),

    /// Sign-up refused (already registered, weak password, ...)
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Store(StoreError::Transport(err))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(msg) => {
                AppError::with_message(ErrorCode::InvalidCredentials, msg)
            }
            AuthError::Rejected(msg) => AppError::invalid_request(msg),
            AuthError::Store(e) => e.into(),
        }
    }
}

/// Account returned by the auth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// `fornecedores` table
#[async_trait]
pub trait SupplierStore: Send + Sync {
    /// Full collection
    async fn list(&self) -> StoreResult<Vec<Supplier>>;

    async fn get(&self, id: i64) -> StoreResult<Option<Supplier>>;

    /// Ids of suppliers whose stored (formatted) phone equals `whatsapp`
    async fn find_by_phone(&self, whatsapp: &str) -> StoreResult<Vec<i64>>;

    /// Suppliers among `ids`; unknown ids are skipped
    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<Supplier>>;

    async fn insert(&self, supplier: NewSupplier) -> StoreResult<Supplier>;

    /// `None` when no row has this id
    async fn update(&self, id: i64, changes: SupplierChanges) -> StoreResult<Option<Supplier>>;

    /// `false` when no row has this id
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Number of rows actually removed
    async fn delete_many(&self, ids: &[i64]) -> StoreResult<usize>;
}

/// `reports` table
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Newest first
    async fn list(&self) -> StoreResult<Vec<Report>>;

    async fn insert(&self, report: NewReport) -> StoreResult<Report>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// `profiles` table
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &str) -> StoreResult<Option<Profile>>;

    /// Insert or overwrite the profile of `user_id`
    async fn upsert(&self, user_id: &str, fields: ProfileFields) -> StoreResult<Profile>;
}

/// Account management
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;
}

/// Object storage bucket
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` at `path` (overwriting) and return its public URL
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String>;
}

/// The set of collaborators a server runs against
#[derive(Clone)]
pub struct Backend {
    pub suppliers: Arc<dyn SupplierStore>,
    pub reports: Arc<dyn ReportStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub storage: Arc<dyn FileStorage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_reaches_client_verbatim() {
        let err: AppError = StoreError::Remote("permission denied for table fornecedores".into()).into();
        assert_eq!(err.code, ErrorCode::RemoteServiceError);
        assert_eq!(err.message, "permission denied for table fornecedores");
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: AppError = AuthError::InvalidCredentials("Invalid login credentials".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert_eq!(err.message, "Invalid login credentials");

        let err: AppError = AuthError::Rejected("User already registered".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidRequest);

        let err: AppError = AuthError::Store(StoreError::Decode("no user".into())).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
