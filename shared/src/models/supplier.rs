//! Supplier Model

use serde::{Deserialize, Serialize};

/// Tag that marks a supplier as Coopercon-verified
pub const VERIFIED_TAG: &str = "#coopercon";

/// Supply category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Servico,
    Material,
    MaterialServico,
}

/// Supplier entity (row of the `fornecedores` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "empresa", default)]
    pub company: String,
    /// Pre-formatted `(DD) number`
    pub whatsapp: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub coopercon: bool,
    #[serde(default)]
    pub qualifios: bool,
    /// Conventionally `#`-prefixed and lowercased, duplicates allowed
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl Supplier {
    /// Plain-text contact card used by "copy contact"
    pub fn contact_card(&self) -> String {
        format!(
            "Nome: {}\nEmpresa: {}\nWhatsApp: {}",
            self.name, self.company, self.whatsapp
        )
    }

    /// Digits of the stored phone, as dialled
    pub fn phone_digits(&self) -> String {
        self.whatsapp.chars().filter(char::is_ascii_digit).collect()
    }

    pub fn whatsapp_link(&self) -> String {
        format!("https://wa.me/{}", self.phone_digits())
    }

    pub fn tel_link(&self) -> String {
        format!("tel:{}", self.phone_digits())
    }

    /// Coopercon flag set, or the `#coopercon` tag present in any case
    pub fn is_verified(&self) -> bool {
        self.coopercon
            || self
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(VERIFIED_TAG))
    }
}

/// Joins contact cards with a blank line between records.
pub fn contact_cards<'a>(suppliers: impl IntoIterator<Item = &'a Supplier>) -> String {
    suppliers
        .into_iter()
        .map(Supplier::contact_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// PostgREST returns `null` for an unset array column.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Registration payload, as typed into the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierCreate {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "empresa")]
    pub company: String,
    /// Raw phone input, any punctuation
    pub whatsapp: String,
    /// Raw tags text: whitespace/comma separated, only `#` tokens kept
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub coopercon: bool,
    #[serde(default)]
    pub qualifios: bool,
}

/// Update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "empresa")]
    pub company: Option<String>,
    pub whatsapp: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "categoria")]
    pub category: Option<Category>,
    pub coopercon: Option<bool>,
    pub qualifios: Option<bool>,
}

/// Validated record ready for insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSupplier {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "empresa")]
    pub company: String,
    pub whatsapp: String,
    #[serde(rename = "categoria")]
    pub category: Option<Category>,
    pub coopercon: bool,
    pub qualifios: bool,
    pub tags: Vec<String>,
}

impl NewSupplier {
    pub fn into_supplier(self, id: i64) -> Supplier {
        Supplier {
            id,
            name: self.name,
            company: self.company,
            whatsapp: self.whatsapp,
            category: self.category,
            coopercon: self.coopercon,
            qualifios: self.qualifios,
            tags: self.tags,
        }
    }
}

/// Validated partial update; serializes only the fields being changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierChanges {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "empresa", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coopercon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifios: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SupplierChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, supplier: &mut Supplier) {
        if let Some(name) = self.name {
            supplier.name = name;
        }
        if let Some(company) = self.company {
            supplier.company = company;
        }
        if let Some(whatsapp) = self.whatsapp {
            supplier.whatsapp = whatsapp;
        }
        if let Some(category) = self.category {
            supplier.category = Some(category);
        }
        if let Some(coopercon) = self.coopercon {
            supplier.coopercon = coopercon;
        }
        if let Some(qualifios) = self.qualifios {
            supplier.qualifios = qualifios;
        }
        if let Some(tags) = self.tags {
            supplier.tags = tags;
        }
    }
}
