//! BrasilAPI client
//!
//! `GET {base}/cnpj/v1/{cnpj}` and `GET {base}/cep/v1/{cep}`. Client errors
//! (unknown or rejected identifier) mean not found; server errors and
//! timeouts mean unavailable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::models::{CompanyInfo, PostalAddress};
use shared::util::digits_only;

use super::{CompanyRegistry, LookupError, PostalCodeLookup};

#[derive(Debug, Clone)]
pub struct BrasilApiClient {
    http: Client,
    base_url: String,
}

/// `cnpj/v1` payload, only the fields shown to the user
#[derive(Debug, Deserialize)]
struct CnpjResponse {
    cnpj: String,
    razao_social: Option<String>,
    descricao_logradouro: Option<String>,
    logradouro: Option<String>,
    numero: Option<String>,
    bairro: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cep: Option<String>,
    ddd_telefone_1: Option<String>,
    #[serde(default)]
    inscricoes_estaduais: Vec<StateRegistration>,
    cnae_fiscal: Option<i64>,
    cnae_fiscal_descricao: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StateRegistration {
    inscricao_estadual: Option<String>,
}

/// `cep/v1` payload
#[derive(Debug, Deserialize)]
struct CepResponse {
    cep: String,
    state: Option<String>,
    city: Option<String>,
    neighborhood: Option<String>,
    street: Option<String>,
}

/// The API sends `""` for unknown text fields
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<CnpjResponse> for CompanyInfo {
    fn from(r: CnpjResponse) -> Self {
        CompanyInfo {
            cnpj: digits_only(&r.cnpj),
            legal_name: non_empty(r.razao_social),
            street: non_empty(r.descricao_logradouro).or_else(|| non_empty(r.logradouro)),
            number: non_empty(r.numero),
            district: non_empty(r.bairro),
            city: non_empty(r.municipio),
            state: non_empty(r.uf),
            postal_code: non_empty(r.cep).map(|c| digits_only(&c)),
            phone: non_empty(r.ddd_telefone_1),
            state_registration: r
                .inscricoes_estaduais
                .into_iter()
                .find_map(|i| non_empty(i.inscricao_estadual)),
            primary_activity_code: r.cnae_fiscal,
            primary_activity: non_empty(r.cnae_fiscal_descricao),
        }
    }
}

impl From<CepResponse> for PostalAddress {
    fn from(r: CepResponse) -> Self {
        PostalAddress {
            postal_code: digits_only(&r.cep),
            street: non_empty(r.street),
            district: non_empty(r.neighborhood),
            city: non_empty(r.city),
            state: non_empty(r.state),
        }
    }
}

impl BrasilApiClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, LookupError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Option<T>, LookupError> {
        let status = response.status();
        if status.is_client_error() {
            tracing::debug!(status = %status.as_u16(), "Lookup answered not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Unavailable(format!("HTTP {}", status.as_u16())));
        }
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CompanyRegistry for BrasilApiClient {
    async fn company(&self, cnpj: &str) -> Result<Option<CompanyInfo>, LookupError> {
        let found: Option<CnpjResponse> = self.fetch(&format!("cnpj/v1/{cnpj}")).await?;
        Ok(found.map(CompanyInfo::from))
    }
}

#[async_trait]
impl PostalCodeLookup for BrasilApiClient {
    async fn address(&self, cep: &str) -> Result<Option<PostalAddress>, LookupError> {
        let found: Option<CepResponse> = self.fetch(&format!("cep/v1/{cep}")).await?;
        Ok(found.map(PostalAddress::from))
    }
}
