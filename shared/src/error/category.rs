//! Error areas

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Area an error code belongs to, by thousands digit.
/// Everything from 7000 up counts as system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Supplier,
    Report,
    Lookup,
    Upload,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Supplier,
            4000..5000 => Self::Report,
            5000..6000 => Self::Lookup,
            6000..7000 => Self::Upload,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Supplier);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Report);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Lookup);
        assert_eq!(ErrorCategory::from_code(6501), ErrorCategory::Upload);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::AccountPending.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::DuplicatePhone.category(),
            ErrorCategory::Supplier
        );
        assert_eq!(ErrorCode::CnpjNotFound.category(), ErrorCategory::Lookup);
        assert_eq!(
            ErrorCode::RemoteServiceError.category(),
            ErrorCategory::System
        );
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Supplier).unwrap();
        assert_eq!(json, "\"supplier\"");
        let category: ErrorCategory = serde_json::from_str("\"lookup\"").unwrap();
        assert_eq!(category, ErrorCategory::Lookup);
    }
}
