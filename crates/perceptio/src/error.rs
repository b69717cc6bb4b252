//! Error types for session construction and input parsing.
//!
//! Computing the next directive never fails; malformed history records are
//! logged and skipped. Errors only come from building a session or parsing
//! JSON input.

use perceptio_core::{BankError, StaircaseConfigError};

/// Invalid session configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("block_prefix must not be empty")]
    EmptyBlockPrefix,

    #[error("component must not be empty")]
    EmptyComponent,

    #[error("response_id must not be empty")]
    EmptyResponseId,

    #[error("item_parameter must not be empty")]
    EmptyItemParameter,

    #[error("item_budget must be positive")]
    ZeroItemBudget,

    #[error("invalid ability grid: {points} points over [{min}, {max}]")]
    InvalidGrid { min: f64, max: f64, points: usize },

    #[error("invalid prior: mean {mean}, std_dev {std_dev}")]
    InvalidPrior { mean: f64, std_dev: f64 },

    #[error("invalid staircase: {0}")]
    Staircase(#[from] StaircaseConfigError),
}

/// Errors returned by the fallible entry points of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid item bank: {0}")]
    Bank(#[from] BankError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
