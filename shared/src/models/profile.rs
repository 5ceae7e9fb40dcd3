//! Profile Model

use serde::{Deserialize, Serialize};

/// Role stored in `profiles.perfil`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Searcher: may search, suggest and flag contacts
    #[serde(rename = "buscador")]
    Searcher,
    /// Signed up, waiting for approval
    #[serde(rename = "pendente")]
    Pending,
    /// Anything else found in the column
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Searcher => "buscador",
            Role::Pending => "pendente",
            Role::Unknown => "unknown",
        }
    }

    /// Roles allowed to hold a session
    pub fn can_sign_in(&self) -> bool {
        matches!(self, Role::Admin | Role::Searcher)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile entity (row of the `profiles` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Auth user id
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "setor", default)]
    pub sector: Option<String>,
    #[serde(rename = "perfil")]
    pub role: Role,
}

/// Fields written to `profiles` after sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "setor")]
    pub sector: String,
    #[serde(rename = "perfil")]
    pub role: Role,
}
