//! Staircase block replay and next-trial directive.

use serde_json::json;

use perceptio_core::staircase::{StaircaseConfig, StaircaseState};

use crate::config::SessionConfig;
use crate::directive::{CorrectAnswer, Directive};
use crate::history::BlockTrial;
use crate::scoring::{score, score_sides};

/// State of a staircase block recovered from its history.
#[derive(Debug, Clone, PartialEq)]
pub struct StaircaseProgress {
    /// Staircase after every scored response.
    pub state: StaircaseState,
    /// Correctness of the latest scored response.
    pub last_correct: Option<bool>,
}

/// Replay the block's trials from the start.
pub fn replay(trials: &[BlockTrial], config: &SessionConfig, staircase: &StaircaseConfig) -> StaircaseProgress {
    let initial = StaircaseProgress {
        state: StaircaseState::start(staircase, config.seed),
        last_correct: None,
    };
    let progress = trials.iter().fold(initial, |progress, trial| {
        let record = &trial.record;
        let Some(correct) =
            score(record, &config.response_id).or_else(|| score_sides(record, &config.response_id))
        else {
            tracing::warn!(index = trial.key.index, "skipping unscorable response");
            return progress;
        };
        let outcome = progress.state.step(staircase, config.seed, correct);
        if outcome.ignored {
            tracing::debug!(index = trial.key.index, "ignoring response after termination");
            return progress;
        }
        StaircaseProgress {
            state: outcome.state,
            last_correct: Some(outcome.correct),
        }
    });
    tracing::debug!(
        trials = progress.state.trial_count,
        anchor = progress.state.anchor_value,
        adaptive = progress.state.adaptive_value,
        "replayed staircase history"
    );
    progress
}

/// Directive following `progress`.
pub fn next_directive(progress: &StaircaseProgress, config: &SessionConfig, staircase: &StaircaseConfig) -> Directive {
    let state = &progress.state;
    if let Some(report) = state.report() {
        tracing::debug!(
            reason = ?report.reason,
            jnd = report.observed_jnd,
            trials = report.trials,
            "staircase finished"
        );
        return Directive::end(json!(report));
    }

    let presentation = state.presentation(staircase, config.seed);
    let (anchor, adaptive) = state.current_pair(staircase);
    Directive::show(
        config.component.clone(),
        json!({
            "left": presentation.left,
            "right": presentation.right,
            "anchor": anchor,
            "adaptive": adaptive,
            "trial": state.trial_count,
            "feedback": progress.last_correct,
        }),
        vec![CorrectAnswer::new(
            config.response_id.clone(),
            presentation.correct_answer(),
        )],
    )
}
