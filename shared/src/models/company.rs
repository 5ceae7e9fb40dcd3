//! Company data returned by the tax-registry lookup

use serde::{Deserialize, Serialize};

/// Registry entity, address already backfilled where possible
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// 14 digits, unformatted
    pub cnpj: String,
    pub legal_name: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// 8 digits, unformatted
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub state_registration: Option<String>,
    pub primary_activity_code: Option<i64>,
    pub primary_activity: Option<String>,
}

impl CompanyInfo {
    /// Street, district, city or state still unknown
    pub fn address_incomplete(&self) -> bool {
        [&self.street, &self.district, &self.city, &self.state]
            .iter()
            .any(|part| part.as_deref().is_none_or(str::is_empty))
    }
}

/// Address fragments from the postal-code lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub postal_code: String,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl CompanyInfo {
    /// Fills only the address parts that are missing or blank.
    pub fn backfill(&mut self, address: PostalAddress) {
        fn fill(slot: &mut Option<String>, value: Option<String>) {
            if slot.as_deref().is_none_or(str::is_empty)
                && let Some(v) = value.filter(|v| !v.is_empty())
            {
                *slot = Some(v);
            }
        }
        fill(&mut self.street, address.street);
        fill(&mut self.district, address.district);
        fill(&mut self.city, address.city);
        fill(&mut self.state, address.state);
    }
}
