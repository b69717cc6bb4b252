//! IRT block replay and next-item directive.

use std::collections::BTreeSet;

use serde_json::{json, Map, Value};

use perceptio_core::irt::{
    select_next_item, AbilityPosterior, CoverageState, ExhaustionReason, NormalPrior, Selection,
};
use perceptio_core::{ItemBank, ItemId};

use crate::config::{IrtConfig, SessionConfig};
use crate::directive::{CorrectAnswer, Directive};
use crate::history::{BlockTrial, TrialRecord};
use crate::scoring::score;

/// State of an IRT block recovered from its history.
#[derive(Debug, Clone)]
pub struct IrtProgress {
    /// Prior the posterior started from.
    pub prior: NormalPrior,
    /// Ability posterior after every scored response.
    pub posterior: AbilityPosterior,
    /// Administered items in order.
    pub administered: Vec<ItemId>,
    /// Categories still missing.
    pub coverage: CoverageState,
}

impl IrtProgress {
    /// Nothing administered yet.
    pub fn initial(bank: &ItemBank, irt: &IrtConfig) -> Self {
        let prior = irt.prior.resolve();
        Self {
            prior,
            posterior: AbilityPosterior::from_prior(&irt.grid.build(), prior),
            administered: Vec::new(),
            coverage: CoverageState::new(bank),
        }
    }

    /// Posterior mean, or the exact prior mean before any response.
    pub fn ability(&self) -> f64 {
        if self.administered.is_empty() {
            self.prior.mean
        } else {
            self.posterior.mean()
        }
    }

    /// Posterior standard deviation.
    pub fn standard_error(&self) -> f64 {
        self.posterior.std_dev()
    }

    /// Fold one trial in. Records that cannot be attributed to a fresh,
    /// scorable bank item are skipped.
    fn apply(mut self, trial: &BlockTrial, bank: &ItemBank, config: &SessionConfig, irt: &IrtConfig) -> Self {
        if self.administered.len() >= irt.item_budget {
            tracing::warn!(index = trial.key.index, "ignoring record past the item budget");
            return self;
        }
        let Some(id) = item_id(&trial.record, &irt.item_parameter) else {
            tracing::warn!(index = trial.key.index, parameter = %irt.item_parameter, "skipping record without an item id");
            return self;
        };
        let Some(item) = bank.get(id) else {
            tracing::warn!(index = trial.key.index, item = id, "skipping record for an unknown item");
            return self;
        };
        if self.administered.contains(&id) {
            tracing::warn!(index = trial.key.index, item = id, "skipping repeated item");
            return self;
        }
        let Some(correct) = score(&trial.record, &config.response_id) else {
            tracing::warn!(index = trial.key.index, item = id, "skipping unscorable response");
            return self;
        };

        self.posterior.update(item, correct);
        self.coverage.record(item);
        self.administered.push(id);
        self
    }
}

/// Replay the block's trials from the start.
pub fn replay(trials: &[BlockTrial], bank: &ItemBank, config: &SessionConfig, irt: &IrtConfig) -> IrtProgress {
    let progress = trials
        .iter()
        .fold(IrtProgress::initial(bank, irt), |progress, trial| {
            progress.apply(trial, bank, config, irt)
        });
    tracing::debug!(
        administered = progress.administered.len(),
        ability = progress.ability(),
        uncovered = progress.coverage.remaining(),
        "replayed IRT history"
    );
    progress
}

/// Directive following `progress`.
pub fn next_directive(progress: &IrtProgress, bank: &ItemBank, config: &SessionConfig, irt: &IrtConfig) -> Directive {
    let ability = progress.ability();
    let standard_error = progress.standard_error();
    let trials_remaining = irt.item_budget.saturating_sub(progress.administered.len());
    let administered: BTreeSet<ItemId> = progress.administered.iter().copied().collect();

    let selection = select_next_item(
        bank,
        &administered,
        &progress.coverage,
        ability,
        trials_remaining,
        irt.coverage,
    );

    match selection {
        Selection::Next { item_id, information } => {
            tracing::debug!(item = item_id, information, ability, "selected next item");
            let mut parameters = Map::new();
            parameters.insert(irt.item_parameter.clone(), json!(item_id));
            parameters.insert("qidx".to_string(), json!(progress.administered.len()));
            parameters.insert("score".to_string(), json!(ability));
            parameters.insert("standardError".to_string(), json!(standard_error));

            let correct_answer = irt
                .answer_key(item_id)
                .map(|answer| vec![CorrectAnswer::new(config.response_id.clone(), answer)])
                .unwrap_or_default();
            Directive::show(config.component.clone(), Value::Object(parameters), correct_answer)
        }
        Selection::Exhausted(reason) => {
            tracing::debug!(?reason, administered = progress.administered.len(), "IRT block finished");
            end_summary(progress, ability, standard_error, reason)
        }
    }
}

fn end_summary(progress: &IrtProgress, ability: f64, standard_error: f64, reason: ExhaustionReason) -> Directive {
    Directive::end(json!({
        "ability": ability,
        "standardError": standard_error,
        "administered": progress.administered,
        "reason": reason,
    }))
}

/// Item id carried by `name`, accepting integral numbers and numeric strings.
fn item_id(record: &TrialRecord, name: &str) -> Option<ItemId> {
    let value = record.param_f64(name)?;
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(ItemId::MAX) {
        Some(value as ItemId)
    } else {
        None
    }
}
