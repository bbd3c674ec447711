use std::path::PathBuf;

use menuseal_seal_engine::RuleError;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum StoreErrKind {
    #[error("item store not initialized")]
    NotReady,
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("source dataset missing: {0}")]
    SourceMissing(PathBuf),
    #[error("dataset corrupt: {0}")]
    Corrupt(String),
    #[error("io failure: {0}")]
    IoFailed(String),
    #[error("invalid seal rules: {0}")]
    Rules(String),
}

#[derive(Clone, Debug, Error)]
#[error(transparent)]
pub struct StoreError(pub StoreErrKind);

impl StoreError {
    pub fn new(kind: StoreErrKind) -> Self {
        Self(kind)
    }

    pub fn kind(&self) -> &StoreErrKind {
        &self.0
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.0, StoreErrKind::NotFound(_))
    }
}

impl From<StoreErrKind> for StoreError {
    fn from(kind: StoreErrKind) -> Self {
        StoreError(kind)
    }
}

impl From<RuleError> for StoreError {
    fn from(value: RuleError) -> Self {
        StoreError(StoreErrKind::Rules(value.to_string()))
    }
}
