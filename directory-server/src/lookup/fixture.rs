//! Canned lookup answers for development and tests

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{CompanyInfo, PostalAddress};
use shared::util::digits_only;

use super::{CompanyRegistry, LookupError, PostalCodeLookup};

/// Registry and postal lookup answering from fixed tables
#[derive(Debug, Default, Clone)]
pub struct FixtureLookup {
    companies: HashMap<String, CompanyInfo>,
    addresses: HashMap<String, PostalAddress>,
    offline: bool,
}

impl FixtureLookup {
    /// Every call fails as if the remote service were down
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn with_company(mut self, info: CompanyInfo) -> Self {
        self.companies.insert(digits_only(&info.cnpj), info);
        self
    }

    pub fn with_address(mut self, address: PostalAddress) -> Self {
        self.addresses
            .insert(digits_only(&address.postal_code), address);
        self
    }

    fn check_online(&self) -> Result<(), LookupError> {
        if self.offline {
            return Err(LookupError::Unavailable("fixture offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CompanyRegistry for FixtureLookup {
    async fn company(&self, cnpj: &str) -> Result<Option<CompanyInfo>, LookupError> {
        self.check_online()?;
        Ok(self.companies.get(cnpj).cloned())
    }
}

#[async_trait]
impl PostalCodeLookup for FixtureLookup {
    async fn address(&self, cep: &str) -> Result<Option<PostalAddress>, LookupError> {
        self.check_online()?;
        Ok(self.addresses.get(cep).cloned())
    }
}
