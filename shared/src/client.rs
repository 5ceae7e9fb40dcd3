//! Request/response types shared between server and clients
//!
//! Success bodies are the plain JSON of these types; failures use
//! [`crate::error::ApiResponse`].

use serde::{Deserialize, Serialize};

use crate::models::{Report, Role, Supplier};
use crate::search::Surface;

// =============================================================================
// Auth API DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued session plus where the client should land
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    /// Landing area for the role (`/admin` or `/busca`)
    pub redirect: String,
}

/// The signed-in account; `name` comes from the profile row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

/// Sign-up request; the access code decides the role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "setor")]
    pub sector: String,
    pub access_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub user_id: String,
    pub role: Role,
}

// =============================================================================
// Supplier API DTOs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierQuery {
    #[serde(default)]
    pub q: String,
}

/// Supplier plus the derived fields a list row shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierView {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub verified: bool,
    pub whatsapp_link: String,
    pub tel_link: String,
}

impl From<Supplier> for SupplierView {
    fn from(supplier: Supplier) -> Self {
        Self {
            verified: supplier.is_verified(),
            whatsapp_link: supplier.whatsapp_link(),
            tel_link: supplier.tel_link(),
            supplier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierListResponse {
    pub suppliers: Vec<SupplierView>,
    pub total: usize,
}

/// Selected id set for bulk operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdSet {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsResponse {
    pub text: String,
    pub count: usize,
}

// =============================================================================
// Tag suggestion DTOs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub surface: Surface,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

// =============================================================================
// Report DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCreate {
    pub supplier_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: Report,
    pub seen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportView>,
    pub unread: usize,
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
}
