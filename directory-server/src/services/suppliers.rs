//! Supplier registration and editing
//!
//! Public self-registration and editor registration go through the same
//! path: validate, check the phone is not taken, insert.
//!
//! The duplicate check and the insert are two independent round-trips.
//! Two registrations of the same number racing each other can both pass
//! the check; nothing here closes that window.

use shared::models::{NewSupplier, Supplier, SupplierChanges, SupplierCreate, SupplierUpdate};

use crate::store::SupplierStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TAGS_TEXT_LEN, normalize_phone, parse_tags, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Validate a registration form into an insertable record.
///
/// Runs before any remote call.
pub fn validate_new_supplier(form: SupplierCreate) -> AppResult<NewSupplier> {
    validate_required_text(&form.name, "nome", MAX_NAME_LEN)?;
    validate_required_text(&form.company, "empresa", MAX_NAME_LEN)?;
    validate_optional_text(&Some(form.tags.clone()), "tags", MAX_TAGS_TEXT_LEN)?;
    let whatsapp = normalize_phone(&form.whatsapp)?;

    Ok(NewSupplier {
        name: form.name.trim().to_string(),
        company: form.company.trim().to_string(),
        whatsapp,
        category: form.category,
        coopercon: form.coopercon,
        qualifios: form.qualifios,
        tags: parse_tags(&form.tags),
    })
}

/// Validate an edit; absent fields stay untouched.
pub fn validate_changes(update: SupplierUpdate) -> AppResult<SupplierChanges> {
    if let Some(name) = &update.name {
        validate_required_text(name, "nome", MAX_NAME_LEN)?;
    }
    if let Some(company) = &update.company {
        validate_required_text(company, "empresa", MAX_NAME_LEN)?;
    }
    validate_optional_text(&update.tags, "tags", MAX_TAGS_TEXT_LEN)?;

    Ok(SupplierChanges {
        name: update.name.map(|n| n.trim().to_string()),
        company: update.company.map(|c| c.trim().to_string()),
        whatsapp: update.whatsapp.as_deref().map(normalize_phone).transpose()?,
        category: update.category,
        coopercon: update.coopercon,
        qualifios: update.qualifios,
        tags: update.tags.as_deref().map(parse_tags),
    })
}

fn duplicate_phone(whatsapp: &str) -> AppError {
    AppError::new(ErrorCode::DuplicatePhone).with_detail("whatsapp", whatsapp)
}

/// Supplier writes over any [`SupplierStore`]
pub struct SupplierService<'a> {
    store: &'a dyn SupplierStore,
}

impl<'a> SupplierService<'a> {
    pub fn new(store: &'a dyn SupplierStore) -> Self {
        Self { store }
    }

    /// Register a supplier.
    ///
    /// # Errors
    ///
    /// - validation errors (no remote call made)
    /// - DuplicatePhone when the formatted number is already stored
    /// - remote errors from the store, message untouched
    pub async fn register(&self, form: SupplierCreate) -> AppResult<Supplier> {
        let new = validate_new_supplier(form)?;

        if !self.store.find_by_phone(&new.whatsapp).await?.is_empty() {
            return Err(duplicate_phone(&new.whatsapp));
        }

        let supplier = self.store.insert(new).await?;
        tracing::info!(id = supplier.id, whatsapp = %supplier.whatsapp, "Supplier registered");
        Ok(supplier)
    }

    /// Apply an edit to supplier `id`.
    ///
    /// A changed phone is re-validated and must not belong to another supplier.
    pub async fn update(&self, id: i64, update: SupplierUpdate) -> AppResult<Supplier> {
        let changes = validate_changes(update)?;

        if changes.is_empty() {
            return self
                .store
                .get(id)
                .await?
                .ok_or_else(|| supplier_not_found(id));
        }

        if let Some(whatsapp) = &changes.whatsapp {
            let owners = self.store.find_by_phone(whatsapp).await?;
            if owners.iter().any(|owner| *owner != id) {
                return Err(duplicate_phone(whatsapp));
            }
        }

        self.store
            .update(id, changes)
            .await?
            .ok_or_else(|| supplier_not_found(id))
    }
}

pub fn supplier_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::SupplierNotFound, format!("Supplier {id} not found"))
        .with_detail("id", id)
}
