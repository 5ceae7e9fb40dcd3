//! Domain services shared by several handlers

pub mod image;
pub mod suppliers;

pub use suppliers::{SupplierService, validate_changes, validate_new_supplier};
