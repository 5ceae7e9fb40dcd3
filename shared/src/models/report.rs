//! Report Model
//!
//! A report flags a supplier contact as wrong or unreachable. Seen/unseen is
//! tracked per admin session by the server and never stored with the row.

use serde::{Deserialize, Serialize};

use super::supplier::Supplier;

/// Text shown next to a flagged contact
pub const FLAGGED_CONTACT_NOTICE: &str = "Contato com erro ou inexistente";

/// Report entity (row of the `reports` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(rename = "mensagem")]
    pub message: String,
    /// Who flagged the contact
    #[serde(rename = "nome_pessoa", default)]
    pub reporter_name: Option<String>,
    /// Description of the flagged contact
    #[serde(rename = "contato_marcado", default)]
    pub flagged_contact: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
}

/// Insert payload built by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "nome_pessoa")]
    pub reporter_name: Option<String>,
    #[serde(rename = "contato_marcado")]
    pub flagged_contact: Option<String>,
    pub supplier_id: Option<i64>,
    pub created_at: i64,
}

impl NewReport {
    /// Report for a supplier contact flagged by `reporter`.
    pub fn flagging(supplier: &Supplier, reporter: Option<String>, created_at: i64) -> Self {
        let contact = format!(
            "{} ({}) - {}",
            supplier.name, supplier.company, supplier.whatsapp
        );
        Self {
            message: format!("{FLAGGED_CONTACT_NOTICE}: {contact}"),
            reporter_name: reporter,
            flagged_contact: Some(contact),
            supplier_id: Some(supplier.id),
            created_at,
        }
    }

    pub fn into_report(self, id: i64) -> Report {
        Report {
            id,
            message: self.message,
            reporter_name: self.reporter_name,
            flagged_contact: self.flagged_contact,
            supplier_id: self.supplier_id,
            created_at: self.created_at,
        }
    }
}
