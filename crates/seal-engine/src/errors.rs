use menuseal_core_types::Nutrient;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid rule table: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("nutrient {0} cannot carry a seal rule")]
    UnsupportedNutrient(Nutrient),
    #[error("duplicate rule id: {0}")]
    DuplicateId(String),
    #[error("invalid threshold for {id}: {value}")]
    InvalidThreshold { id: String, value: f64 },
}
