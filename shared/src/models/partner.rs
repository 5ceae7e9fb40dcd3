//! Partner branding shown on the public registration page

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerBranding {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    /// Unix millis of the last logo upload
    pub updated_at: Option<i64>,
}
