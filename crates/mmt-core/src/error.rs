use mmt_store::StoreError;
use thiserror::Error;

/// Failures of the practice core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Every skill is still locked, which only happens with a misconfigured registry
    #[error("No skill is unlocked for this player")]
    NoEligibleSkill,
    /// An explicitly requested skill id is not registered
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
    #[error("No question source registered for skill: {0}")]
    NoQuestionSource(String),
    /// Propagated from the progress store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
}
