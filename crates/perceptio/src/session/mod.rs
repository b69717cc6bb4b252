//! Stateless session controller.
//!
//! [`compute_next`] replays the current block's history from the start and
//! returns the next directive. Nothing survives between calls, so re-invoking
//! after a reload with the stored history gives the same answer.

pub mod irt;
pub mod staircase;

use std::sync::Arc;

use perceptio_core::ItemBank;

use crate::config::{SessionConfig, SessionMode};
use crate::directive::Directive;
use crate::error::Result;
use crate::history::ResponseHistory;
use crate::output;

/// Next directive for `history` under `config`.
///
/// Pure: the same inputs always give the same directive. Malformed records
/// are logged and skipped.
pub fn compute_next(history: &ResponseHistory, bank: &ItemBank, config: &SessionConfig) -> Directive {
    let trials = history.block_trials(&config.block_prefix);
    match &config.mode {
        SessionMode::Irt(irt_config) => {
            let progress = irt::replay(&trials, bank, config, irt_config);
            irt::next_directive(&progress, bank, config, irt_config)
        }
        SessionMode::Staircase(staircase_config) => {
            let progress = staircase::replay(&trials, config, staircase_config);
            staircase::next_directive(&progress, config, staircase_config)
        }
    }
}

/// Validated configuration bound to an item bank.
///
/// Holds no per-participant state; one session can serve any number of
/// participants concurrently.
#[derive(Debug, Clone)]
pub struct AdaptiveSession {
    config: SessionConfig,
    bank: Arc<ItemBank>,
}

impl AdaptiveSession {
    /// Validate `config` and bind it to `bank`.
    pub fn new(config: SessionConfig, bank: Arc<ItemBank>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, bank })
    }

    /// Session over the built-in bank.
    pub fn with_builtin_bank(config: SessionConfig) -> Result<Self> {
        Self::new(config, Arc::new(ItemBank::vlat()))
    }

    /// Validated configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Item bank used by IRT blocks.
    pub fn bank(&self) -> &ItemBank {
        &self.bank
    }

    /// Next directive for one participant's history.
    pub fn compute_next(&self, history: &ResponseHistory) -> Directive {
        compute_next(history, &self.bank, &self.config)
    }

    /// JSON in, JSON out.
    pub fn compute_next_json(&self, history_json: &str) -> Result<String> {
        let history = ResponseHistory::from_json(history_json)?;
        Ok(output::to_json(&self.compute_next(&history))?)
    }
}
