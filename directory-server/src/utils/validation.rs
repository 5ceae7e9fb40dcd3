//! Input validation helpers
//!
//! Text length limits plus the normalizers applied before any remote call:
//! WhatsApp numbers, tag text, CNPJ and CEP.

use shared::util::digits_only;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Person and company names
pub const MAX_NAME_LEN: usize = 200;

/// Sector, access codes and other short fields
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Raw tags text as typed in the form
pub const MAX_TAGS_TEXT_LEN: usize = 2000;

/// Digits accepted for a WhatsApp number: DDD + 8 or 9 digit number
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=11;

const CNPJ_DIGITS: usize = 14;
const CEP_DIGITS: usize = 8;

// ── Text helpers ────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

// ── Normalizers ─────────────────────────────────────────────────────

/// Normalize a WhatsApp number to `(DD) rest`.
///
/// Punctuation is ignored; what remains must be 10 or 11 digits.
///
/// ```
/// use directory_server::utils::validation::normalize_phone;
/// assert_eq!(normalize_phone("85 99620-4919").unwrap(), "(85) 996204919");
/// ```
pub fn normalize_phone(raw: &str) -> Result<String, AppError> {
    let digits = digits_only(raw);
    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err(AppError::new(ErrorCode::InvalidPhone).with_detail("field", "whatsapp"));
    }
    let (ddd, number) = digits.split_at(2);
    Ok(format!("({ddd}) {number}"))
}

/// Parse the free-text tags field.
///
/// Tokens are separated by whitespace or commas; only `#` tokens are kept,
/// lowercased. A bare `#` carries no tag and is dropped. Order and
/// duplicates are preserved.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| token.starts_with('#') && token.len() > 1)
        .map(str::to_lowercase)
        .collect()
}

/// Strip a CNPJ to digits; exactly 14 are required.
pub fn normalize_cnpj(raw: &str) -> Result<String, AppError> {
    let digits = digits_only(raw);
    if digits.len() != CNPJ_DIGITS {
        return Err(AppError::new(ErrorCode::InvalidCnpj).with_detail("cnpj", raw));
    }
    Ok(digits)
}

/// Strip a CEP to digits; `None` unless exactly 8 remain.
pub fn normalize_cep(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    (digits.len() == CEP_DIGITS).then_some(digits)
}
