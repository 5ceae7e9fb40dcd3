//! Tax-registry (CNPJ) and postal-code (CEP) lookups
//!
//! The registry answers first; when its address is incomplete the postal
//! lookup fills in the missing parts. A failing postal lookup never fails
//! the registry answer.

pub mod brasil_api;
pub mod fixture;

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{CompanyInfo, PostalAddress};
use thiserror::Error;

use crate::utils::validation::{normalize_cep, normalize_cnpj};
use crate::utils::{AppError, AppResult, ErrorCode};

pub use brasil_api::BrasilApiClient;
pub use fixture::FixtureLookup;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup service unavailable: {0}")]
    Unavailable(String),

    #[error("lookup service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected lookup response: {0}")]
    Decode(String),
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        let code = match &err {
            LookupError::Decode(_) => ErrorCode::RemoteServiceError,
            _ => ErrorCode::LookupUnavailable,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// 14-digit CNPJ → registered entity
#[async_trait]
pub trait CompanyRegistry: Send + Sync {
    /// `None` when the registry does not know the CNPJ
    async fn company(&self, cnpj: &str) -> Result<Option<CompanyInfo>, LookupError>;
}

/// 8-digit CEP → address fragments
#[async_trait]
pub trait PostalCodeLookup: Send + Sync {
    async fn address(&self, cep: &str) -> Result<Option<PostalAddress>, LookupError>;
}

/// Lookup collaborators held by the server
#[derive(Clone)]
pub struct Lookups {
    pub registry: Arc<dyn CompanyRegistry>,
    pub postal: Arc<dyn PostalCodeLookup>,
}

impl Lookups {
    pub fn brasil_api(base_url: &str, timeout_ms: u64) -> Result<Self, LookupError> {
        let client = Arc::new(BrasilApiClient::new(base_url, timeout_ms)?);
        Ok(Self {
            registry: client.clone(),
            postal: client,
        })
    }

    pub fn fixture(fixture: FixtureLookup) -> Self {
        let fixture = Arc::new(fixture);
        Self {
            registry: fixture.clone(),
            postal: fixture,
        }
    }

    /// Look up a CNPJ typed in any format.
    ///
    /// # Errors
    ///
    /// - InvalidCnpj when the input does not hold exactly 14 digits (no remote call)
    /// - CnpjNotFound when the registry does not know it
    /// - LookupUnavailable when the registry cannot be reached
    pub async fn company(&self, raw_cnpj: &str) -> AppResult<CompanyInfo> {
        let cnpj = normalize_cnpj(raw_cnpj)?;

        let mut info = self
            .registry
            .company(&cnpj)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CnpjNotFound).with_detail("cnpj", cnpj.clone()))?;

        if info.address_incomplete()
            && let Some(cep) = info.postal_code.as_deref().and_then(normalize_cep)
        {
            match self.postal.address(&cep).await {
                Ok(Some(address)) => info.backfill(address),
                Ok(None) => tracing::debug!(cep = %cep, "CEP unknown, address left incomplete"),
                Err(e) => tracing::warn!(cep = %cep, error = %e, "CEP backfill failed"),
            }
        }

        Ok(info)
    }
}
