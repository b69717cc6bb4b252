//! Staircase state and the per-trial update rule.

use alloc::vec::Vec;

use super::config::{Direction, StaircaseConfig, StaircasePolicy, StartValues};
use crate::constants::VALUE_TOLERANCE;
use crate::math::{abs, round_to};
use crate::rng::{coin_flip, pick, presentation_side, Stream};
use crate::types::Side;

/// Why a staircase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Termination {
    /// The trial limit was reached.
    TrialLimit,
    /// The gap stayed within epsilon for the convergence window.
    Converged,
    /// Every practice pair has been shown.
    PracticeComplete,
}

/// Which value a step moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Moved {
    /// The anchor moved (dual-converging only).
    Anchor,
    /// The adaptive value moved.
    Adaptive,
}

/// How one trial's pair is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    /// Value on the left.
    pub left: f64,
    /// Value on the right.
    pub right: f64,
    /// Side holding the larger value, `None` when they are equal.
    pub higher_side: Option<Side>,
}

impl Presentation {
    /// Lay out `(first, second)` for `trial`.
    ///
    /// The side of `first` is drawn from the presentation stream, so it is
    /// reproducible and independent of every other random decision.
    pub fn for_trial(first: f64, second: f64, seed: u64, trial: usize) -> Self {
        match presentation_side(seed, trial) {
            Side::Left => Self::new(first, second),
            Side::Right => Self::new(second, first),
        }
    }

    /// Pair already laid out as `(left, right)`.
    pub fn new(left: f64, right: f64) -> Self {
        let higher_side = if abs(left - right) <= VALUE_TOLERANCE {
            None
        } else if left > right {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        };
        Self {
            left,
            right,
            higher_side,
        }
    }

    /// Expected answer: "left", "right" or "same".
    pub fn correct_answer(&self) -> &'static str {
        match self.higher_side {
            Some(side) => side.as_str(),
            None => "same",
        }
    }

    /// Score a raw answer. `None` when the answer names no side.
    pub fn score(&self, answer: &str) -> Option<bool> {
        if answer.trim().eq_ignore_ascii_case("same") {
            return Some(self.higher_side.is_none());
        }
        Side::parse(answer).map(|side| self.higher_side == Some(side))
    }
}

/// One row of the selection log.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TrialSelection {
    /// Zero-based trial index.
    pub trial: usize,
    /// Anchor value shown.
    pub anchor: f64,
    /// Adaptive value shown.
    pub adaptive: f64,
    /// Side that held the higher value.
    pub higher_side: Option<Side>,
    /// Whether the response was correct.
    pub correct: bool,
}

/// Summary emitted once a staircase stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StaircaseReport {
    /// Final `|anchor - adaptive|`, the just-noticeable difference.
    pub observed_jnd: f64,
    /// Why the staircase stopped.
    pub reason: Termination,
    /// Trials completed.
    pub trials: usize,
    /// Final anchor value.
    pub final_anchor: f64,
    /// Final adaptive value.
    pub final_adaptive: f64,
    /// Every trial in order.
    pub selections: Vec<TrialSelection>,
}

/// Current values of a staircase.
///
/// Invariant: both values lie within `[domain_min, domain_max]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct StaircaseState {
    /// Reference value.
    pub anchor_value: f64,
    /// Value being adapted.
    pub adaptive_value: f64,
    /// Adaptation rule.
    pub mode: StaircasePolicy,
    /// Side of the anchor the adaptive value approaches from.
    pub direction: Direction,
    /// Trials completed so far.
    pub trial_count: usize,
    /// Gap decrease after a correct response.
    pub step_small: f64,
    /// Gap increase after an incorrect response.
    pub step_large: f64,
    /// Lowest allowed value.
    pub domain_min: f64,
    /// Highest allowed value.
    pub domain_max: f64,
    /// Consecutive trials that ended within epsilon.
    pub converged_streak: usize,
    /// Set once the staircase has stopped.
    pub termination: Option<Termination>,
    /// Selection log.
    pub selections: Vec<TrialSelection>,
}

/// Result of feeding one response to a staircase.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// State after the step.
    pub state: StaircaseState,
    /// Feedback for the participant.
    pub correct: bool,
    /// Value that moved, if any.
    pub moved: Option<Moved>,
    /// Signed gap after the step but before rounding and clamping.
    pub unclamped_gap: Option<f64>,
    /// Set when the staircase is stopped after this step.
    pub termination: Option<Termination>,
    /// The staircase had already stopped and the response was discarded.
    pub ignored: bool,
}

impl StaircaseState {
    /// Initial state for `config`, drawing sampled start values from `seed`.
    ///
    /// Assumes `config` has been validated.
    pub fn start(config: &StaircaseConfig, seed: u64) -> Self {
        let (anchor, adaptive) = match &config.start {
            StartValues::Fixed { anchor, adaptive } => (*anchor, *adaptive),
            StartValues::Sampled { anchors, adaptives } => (
                pick(seed, Stream::Start, 0, anchors).unwrap_or(config.domain_min),
                pick(seed, Stream::Start, 1, adaptives).unwrap_or(config.domain_max),
            ),
        };
        let (anchor_value, adaptive_value) = if config.policy == StaircasePolicy::PracticeOnly {
            config
                .practice_pairs
                .first()
                .copied()
                .unwrap_or((anchor, adaptive))
        } else {
            (anchor, adaptive)
        };

        Self {
            anchor_value: settle(anchor_value, config),
            adaptive_value: settle(adaptive_value, config),
            mode: config.policy,
            direction: config.direction,
            trial_count: 0,
            step_small: config.step_small,
            step_large: config.step_large,
            domain_min: config.domain_min,
            domain_max: config.domain_max,
            converged_streak: 0,
            termination: None,
            selections: Vec::new(),
        }
    }

    /// Gap signed so that it shrinks on correct responses.
    pub fn signed_gap(&self) -> f64 {
        self.direction.sign() * (self.adaptive_value - self.anchor_value)
    }

    /// Absolute difference between the two values.
    pub fn observed_gap(&self) -> f64 {
        abs(self.anchor_value - self.adaptive_value)
    }

    /// Whether the staircase has stopped.
    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    /// Pair shown on the next trial as `(anchor, adaptive)`.
    pub fn current_pair(&self, config: &StaircaseConfig) -> (f64, f64) {
        match self.mode {
            StaircasePolicy::PracticeOnly => config
                .practice_pairs
                .get(self.trial_count)
                .copied()
                .unwrap_or((self.anchor_value, self.adaptive_value)),
            _ => (self.anchor_value, self.adaptive_value),
        }
    }

    /// Layout of the next trial.
    pub fn presentation(&self, config: &StaircaseConfig, seed: u64) -> Presentation {
        let (anchor, adaptive) = self.current_pair(config);
        Presentation::for_trial(anchor, adaptive, seed, self.trial_count)
    }

    /// Apply one response.
    ///
    /// A correct response shrinks the signed gap by `step_small`, an
    /// incorrect one grows it by `step_large`. The moved value is rounded,
    /// then clamped into the domain. A correct response with the gap already
    /// within `step_small` of zero is clamped at that floor: the unclamped gap
    /// still shrinks but neither value moves, so the adaptive value never
    /// steps through the anchor. Responses after termination are ignored.
    pub fn step(&self, config: &StaircaseConfig, seed: u64, correct: bool) -> StepOutcome {
        if let Some(reason) = self.termination {
            return StepOutcome {
                state: self.clone(),
                correct,
                moved: None,
                unclamped_gap: None,
                termination: Some(reason),
                ignored: true,
            };
        }

        let trial = self.trial_count;
        let presentation = self.presentation(config, seed);
        let (shown_anchor, shown_adaptive) = self.current_pair(config);

        let mut next = self.clone();
        next.selections.push(TrialSelection {
            trial,
            anchor: shown_anchor,
            adaptive: shown_adaptive,
            higher_side: presentation.higher_side,
            correct,
        });
        next.trial_count += 1;

        if self.mode == StaircasePolicy::PracticeOnly {
            if next.trial_count >= config.practice_pairs.len() {
                next.termination = Some(Termination::PracticeComplete);
            }
            return StepOutcome {
                termination: next.termination,
                state: next,
                correct,
                moved: None,
                unclamped_gap: None,
                ignored: false,
            };
        }

        let gap = self.signed_gap();
        // A correct answer at the resolution floor is clamped to no movement
        let at_floor = correct && gap >= -VALUE_TOLERANCE && gap <= self.step_small + VALUE_TOLERANCE;

        let (moved, unclamped_gap) = if at_floor {
            (None, gap - self.step_small)
        } else {
            let moved = match self.mode {
                StaircasePolicy::DualConverging if coin_flip(seed, Stream::Movement, trial) => Moved::Anchor,
                _ => Moved::Adaptive,
            };
            let gap_delta = if correct {
                -self.step_small
            } else {
                self.step_large
            };
            let sign = self.direction.sign();
            let (mut anchor, mut adaptive) = (self.anchor_value, self.adaptive_value);
            match moved {
                Moved::Adaptive => adaptive += sign * gap_delta,
                Moved::Anchor => anchor -= sign * gap_delta,
            }
            next.anchor_value = settle(anchor, config);
            next.adaptive_value = settle(adaptive, config);
            (Some(moved), sign * (adaptive - anchor))
        };

        if next.observed_gap() <= config.convergence_epsilon + VALUE_TOLERANCE {
            next.converged_streak += 1;
        } else {
            next.converged_streak = 0;
        }

        // Convergence wins when both conditions hold on the same trial
        if config.convergence_window > 0 && next.converged_streak >= config.convergence_window {
            next.termination = Some(Termination::Converged);
        } else if next.trial_count >= config.trial_limit {
            next.termination = Some(Termination::TrialLimit);
        }

        StepOutcome {
            termination: next.termination,
            state: next,
            correct,
            moved,
            unclamped_gap: Some(unclamped_gap),
            ignored: false,
        }
    }

    /// Final report, available once the staircase has stopped.
    pub fn report(&self) -> Option<StaircaseReport> {
        self.termination.map(|reason| StaircaseReport {
            observed_jnd: self.observed_gap(),
            reason,
            trials: self.trial_count,
            final_anchor: self.anchor_value,
            final_adaptive: self.adaptive_value,
            selections: self.selections.clone(),
        })
    }
}

/// Round to the configured precision, then clamp into the domain.
fn settle(value: f64, config: &StaircaseConfig) -> f64 {
    let rounded = match config.decimals {
        Some(decimals) => round_to(value, decimals),
        None => value,
    };
    rounded.clamp(config.domain_min, config.domain_max)
}
