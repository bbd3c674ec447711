//! Shared primitives for the menuseal workspace.
//!
//! Every crate in the workspace speaks in terms of [`MenuItem`], [`Nutrient`]
//! and [`SealRule`]; nothing in here performs I/O.

pub mod item;
pub mod nutrient;
pub mod profile;
pub mod seal;

use thiserror::Error;

pub use item::{company_display, company_token, Category, ItemId, MenuItem, PhysicalState};
pub use nutrient::{coerce, Nutrient, NutrientValue, Nutrients};
pub use profile::{ReferenceProfile, ToleranceTable};
pub use seal::SealRule;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("unknown nutrient: {0}")]
    UnknownNutrient(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown physical state: {0}")]
    UnknownPhysicalState(String),
}

#[cfg(test)]
mod tests;
