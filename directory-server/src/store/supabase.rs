//! Supabase backend
//!
//! Talks to the project's REST surfaces with the service key:
//! - PostgREST `/rest/v1/{table}` for `fornecedores`, `reports`, `profiles`
//! - GoTrue `/auth/v1` for password sign-in and sign-up
//! - Storage `/storage/v1/object/{bucket}/{path}` for logos
//!
//! Error bodies are reduced to their message and passed through untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::models::{
    NewReport, NewSupplier, Profile, ProfileFields, Report, Supplier, SupplierChanges,
};

use super::{
    AuthError, AuthProvider, AuthUser, Backend, FileStorage, ProfileStore, ReportStore,
    StoreError, StoreResult, SupplierStore,
};

const SUPPLIERS: &str = "fornecedores";
const REPORTS: &str = "reports";
const PROFILES: &str = "profiles";

/// Remote request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a backend whose every collaborator is the Supabase project
pub fn backend(base_url: &str, api_key: &str, bucket: &str) -> StoreResult<Backend> {
    let client = Arc::new(SupabaseClient::new(base_url, api_key, bucket)?);
    Ok(Backend {
        suppliers: client.clone(),
        reports: client.clone(),
        profiles: client.clone(),
        auth: client.clone(),
        storage: client,
    })
}

/// HTTP client for one Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

/// PostgREST `in.(…)` filter value
fn in_list(ids: &[i64]) -> String {
    let joined = ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}

/// The human message inside a Supabase error body.
///
/// PostgREST uses `message`, GoTrue `msg` or `error_description`, Storage
/// `error`; anything else falls back to the raw body, then the status.
pub fn remote_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str())
                && !msg.is_empty()
            {
                return msg.to_string();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

impl SupabaseClient {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> StoreResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Fail with the backend's own message on a non-success status
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status.as_u16(), body = %body, "Supabase request failed");
        Err(StoreError::Remote(remote_message(status, &body)))
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        let response = Self::check(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> StoreResult<Vec<T>> {
        let request = self.http.get(self.table_url(table)).query(query);
        let response = self.authorized(request).send().await?;
        Self::handle_response(response).await
    }

    /// First row of a `return=representation` write
    fn first<T>(rows: Vec<T>, action: &str) -> StoreResult<T> {
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("{action} returned no rows")))
    }
}

// ==================== Suppliers ====================

#[async_trait]
impl SupplierStore for SupabaseClient {
    async fn list(&self) -> StoreResult<Vec<Supplier>> {
        self.select(SUPPLIERS, &[("select", "*".into())]).await
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Supplier>> {
        let rows: Vec<Supplier> = self
            .select(SUPPLIERS, &[("select", "*".into()), ("id", format!("eq.{id}"))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn find_by_phone(&self, whatsapp: &str) -> StoreResult<Vec<i64>> {
        let rows: Vec<IdRow> = self
            .select(
                SUPPLIERS,
                &[("select", "id".into()), ("whatsapp", format!("eq.{whatsapp}"))],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<Supplier>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(SUPPLIERS, &[("select", "*".into()), ("id", in_list(ids))])
            .await
    }

    async fn insert(&self, supplier: NewSupplier) -> StoreResult<Supplier> {
        let request = self
            .http
            .post(self.table_url(SUPPLIERS))
            .header("Prefer", "return=representation")
            .json(&[supplier]);
        let response = self.authorized(request).send().await?;
        Self::first(Self::handle_response(response).await?, "insert")
    }

    async fn update(&self, id: i64, changes: SupplierChanges) -> StoreResult<Option<Supplier>> {
        let request = self
            .http
            .patch(self.table_url(SUPPLIERS))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&changes);
        let response = self.authorized(request).send().await?;
        let rows: Vec<Supplier> = Self::handle_response(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.delete_many(&[id]).await? > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> StoreResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let request = self
            .http
            .delete(self.table_url(SUPPLIERS))
            .query(&[("id", in_list(ids)), ("select", "id".into())])
            .header("Prefer", "return=representation");
        let response = self.authorized(request).send().await?;
        let rows: Vec<IdRow> = Self::handle_response(response).await?;
        Ok(rows.len())
    }
}

// ==================== Reports ====================

#[async_trait]
impl ReportStore for SupabaseClient {
    async fn list(&self) -> StoreResult<Vec<Report>> {
        self.select(
            REPORTS,
            &[("select", "*".into()), ("order", "created_at.desc".into())],
        )
        .await
    }

    async fn insert(&self, report: NewReport) -> StoreResult<Report> {
        let request = self
            .http
            .post(self.table_url(REPORTS))
            .header("Prefer", "return=representation")
            .json(&[report]);
        let response = self.authorized(request).send().await?;
        Self::first(Self::handle_response(response).await?, "insert")
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let request = self
            .http
            .delete(self.table_url(REPORTS))
            .query(&[("id", format!("eq.{id}")), ("select", "id".into())])
            .header("Prefer", "return=representation");
        let response = self.authorized(request).send().await?;
        let rows: Vec<IdRow> = Self::handle_response(response).await?;
        Ok(!rows.is_empty())
    }
}

// ==================== Profiles ====================

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn get(&self, user_id: &str) -> StoreResult<Option<Profile>> {
        let rows: Vec<Profile> = self
            .select(
                PROFILES,
                &[("select", "*".into()), ("id", format!("eq.{user_id}"))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert(&self, user_id: &str, fields: ProfileFields) -> StoreResult<Profile> {
        let row = Profile {
            id: user_id.to_string(),
            name: Some(fields.name),
            company: Some(fields.company),
            sector: Some(fields.sector),
            role: fields.role,
        };
        let request = self
            .http
            .post(self.table_url(PROFILES))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[row]);
        let response = self.authorized(request).send().await?;
        Self::first(Self::handle_response(response).await?, "upsert")
    }
}

// ==================== Auth ====================

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Token grant: `{ access_token, user }`
#[derive(Debug, Deserialize)]
struct GoTrueSession {
    user: GoTrueUser,
}

/// Sign-up answers with a session (auto-confirm) or the bare user
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GoTrueSignUp {
    Session { user: GoTrueUser },
    User(GoTrueUser),
}

impl GoTrueUser {
    fn into_auth_user(self, fallback_email: &str) -> AuthUser {
        AuthUser {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
        }
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let request = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response = self.authorized(request).send().await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::InvalidCredentials(remote_message(status, &body)));
        }
        let session: GoTrueSession = Self::handle_response(response).await?;
        Ok(session.user.into_auth_user(email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let request = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response = self.authorized(request).send().await?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(remote_message(status, &body)));
        }
        let user = match Self::handle_response::<GoTrueSignUp>(response).await? {
            GoTrueSignUp::Session { user } | GoTrueSignUp::User(user) => user,
        };
        Ok(user.into_auth_user(email))
    }
}

// ==================== Storage ====================

#[async_trait]
impl FileStorage for SupabaseClient {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String> {
        let request = self
            .http
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url, self.bucket, path
            ))
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        let response = self.authorized(request).send().await?;
        Self::check(response).await?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_shapes() {
        let postgrest = r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#;
        assert_eq!(
            remote_message(StatusCode::CONFLICT, postgrest),
            "duplicate key value violates unique constraint"
        );

        let gotrue = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            remote_message(StatusCode::BAD_REQUEST, gotrue),
            "Invalid login credentials"
        );

        let gotrue_v2 = r#"{"code":422,"msg":"User already registered"}"#;
        assert_eq!(
            remote_message(StatusCode::UNPROCESSABLE_ENTITY, gotrue_v2),
            "User already registered"
        );

        assert_eq!(remote_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(remote_message(StatusCode::BAD_GATEWAY, ""), "502 Bad Gateway");
    }

    #[test]
    fn test_in_list() {
        assert_eq!(in_list(&[3, 1, 2]), "in.(3,1,2)");
    }

    #[test]
    fn test_sign_up_shapes() {
        let session = r#"{"access_token":"t","user":{"id":"u1","email":"a@b.c"}}"#;
        let user = r#"{"id":"u2","email":"d@e.f","aud":"authenticated"}"#;
        assert!(matches!(
            serde_json::from_str::<GoTrueSignUp>(session).unwrap(),
            GoTrueSignUp::Session { user } if user.id == "u1"
        ));
        assert!(matches!(
            serde_json::from_str::<GoTrueSignUp>(user).unwrap(),
            GoTrueSignUp::User(user) if user.id == "u2"
        ));
    }

    #[test]
    fn test_backend_builds() {
        assert!(backend("https://example.supabase.co/", "key", "logos").is_ok());
    }
}
