//! Configuration types for staircase procedures.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::constants::{
    DEFAULT_CONVERGENCE_EPSILON, DEFAULT_CONVERGENCE_WINDOW, DEFAULT_DECIMALS, DEFAULT_DOMAIN_MAX,
    DEFAULT_DOMAIN_MIN, DEFAULT_STEP_LARGE, DEFAULT_STEP_SMALL, DEFAULT_TRIAL_LIMIT,
};

/// Adaptation rule.
///
/// The experiments share one update rule parameterized by this tag instead of
/// each carrying its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StaircasePolicy {
    /// The anchor stays put; only the adaptive value moves.
    #[default]
    FixedAnchor,

    /// Either value may move; a seeded coin picks which one each trial.
    DualConverging,

    /// No adaptation. Responses are scored for feedback only.
    PracticeOnly,
}

impl fmt::Display for StaircasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaircasePolicy::FixedAnchor => write!(f, "fixed-anchor"),
            StaircasePolicy::DualConverging => write!(f, "dual-converging"),
            StaircasePolicy::PracticeOnly => write!(f, "practice"),
        }
    }
}

/// Which side of the anchor the adaptive value approaches from.
///
/// The signed gap is `adaptive - anchor` for `Above` and `anchor - adaptive`
/// for `Below`. Correct responses shrink it; incorrect ones grow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Direction {
    /// Adaptive value starts above the anchor.
    #[default]
    Above,
    /// Adaptive value starts below the anchor.
    Below,
}

impl Direction {
    /// +1 for `Above`, -1 for `Below`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Above => 1.0,
            Direction::Below => -1.0,
        }
    }
}

/// Starting values of a staircase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StartValues {
    /// Fixed starting pair.
    Fixed {
        /// Anchor (reference) value.
        anchor: f64,
        /// Adaptive value.
        adaptive: f64,
    },
    /// One value from each list, drawn with the session seed.
    Sampled {
        /// Candidate anchors.
        anchors: Vec<f64>,
        /// Candidate adaptive values.
        adaptives: Vec<f64>,
    },
}

/// Configuration for a staircase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct StaircaseConfig {
    /// Adaptation rule.
    pub policy: StaircasePolicy,

    /// Side of the anchor the adaptive value starts on.
    pub direction: Direction,

    /// Starting values.
    pub start: StartValues,

    /// Step after a correct response (shrinks the gap).
    ///
    /// Default: 0.01
    pub step_small: f64,

    /// Step after an incorrect response (grows the gap).
    ///
    /// Default: 0.03
    pub step_large: f64,

    /// Lowest allowed value. Default: 0.01
    pub domain_min: f64,

    /// Highest allowed value. Default: 1.0
    pub domain_max: f64,

    /// Trials before the staircase stops. Default: 50
    pub trial_limit: usize,

    /// Gap at or below which a trial counts as converged. Default: 0.01
    pub convergence_epsilon: f64,

    /// Consecutive converged trials needed to stop early.
    ///
    /// Default: 2. Zero disables early stopping.
    pub convergence_window: usize,

    /// Decimal places values are rounded to after each step.
    ///
    /// Default: Some(2). `None` keeps full precision.
    pub decimals: Option<u32>,

    /// Value pairs shown in practice mode, in order.
    pub practice_pairs: Vec<(f64, f64)>,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            policy: StaircasePolicy::FixedAnchor,
            direction: Direction::Above,
            start: StartValues::Fixed {
                anchor: 0.3,
                adaptive: 0.7,
            },
            step_small: DEFAULT_STEP_SMALL,
            step_large: DEFAULT_STEP_LARGE,
            domain_min: DEFAULT_DOMAIN_MIN,
            domain_max: DEFAULT_DOMAIN_MAX,
            trial_limit: DEFAULT_TRIAL_LIMIT,
            convergence_epsilon: DEFAULT_CONVERGENCE_EPSILON,
            convergence_window: DEFAULT_CONVERGENCE_WINDOW,
            decimals: Some(DEFAULT_DECIMALS),
            practice_pairs: default_practice_pairs(),
        }
    }
}

fn default_practice_pairs() -> Vec<(f64, f64)> {
    vec![
        (0.3, 0.7),
        (0.9, 0.6),
        (0.6, 0.3),
        (0.6, 0.9),
        (0.3, 0.1),
        (0.5, 0.3),
        (0.9, 0.8),
        (0.6, 0.7),
        (0.99, 0.9),
    ]
}

impl StaircaseConfig {
    /// Fixed-anchor staircase starting from the given pair.
    pub fn fixed_anchor(direction: Direction, anchor: f64, adaptive: f64) -> Self {
        Self {
            policy: StaircasePolicy::FixedAnchor,
            direction,
            start: StartValues::Fixed { anchor, adaptive },
            ..Default::default()
        }
    }

    /// Dual-converging staircase with seeded start values.
    ///
    /// The higher value is drawn from {0.6, 0.7, 0.8} and the lower from
    /// {0.3, 0.4, 0.5}.
    pub fn dual_converging() -> Self {
        Self {
            policy: StaircasePolicy::DualConverging,
            direction: Direction::Below,
            start: StartValues::Sampled {
                anchors: vec![0.6, 0.7, 0.8],
                adaptives: vec![0.3, 0.4, 0.5],
            },
            ..Default::default()
        }
    }

    /// Practice block over the default pairs.
    pub fn practice() -> Self {
        Self {
            policy: StaircasePolicy::PracticeOnly,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set both step sizes.
    pub fn steps(mut self, small: f64, large: f64) -> Self {
        self.step_small = small;
        self.step_large = large;
        self
    }

    /// Set the value domain.
    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Set the trial limit.
    pub fn trial_limit(mut self, limit: usize) -> Self {
        self.trial_limit = limit;
        self
    }

    /// Set the convergence criterion.
    pub fn convergence(mut self, epsilon: f64, window: usize) -> Self {
        self.convergence_epsilon = epsilon;
        self.convergence_window = window;
        self
    }

    /// Set rounding precision.
    pub fn decimals(mut self, decimals: Option<u32>) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the practice pairs.
    pub fn practice_pairs(mut self, pairs: Vec<(f64, f64)>) -> Self {
        self.practice_pairs = pairs;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), StaircaseConfigError> {
        if !(self.domain_min.is_finite() && self.domain_max.is_finite())
            || self.domain_min >= self.domain_max
        {
            return Err(StaircaseConfigError::InvalidDomain {
                min: self.domain_min,
                max: self.domain_max,
            });
        }
        if !(self.step_small.is_finite() && self.step_small > 0.0) {
            return Err(StaircaseConfigError::NonPositiveStep {
                which: "step_small",
                value: self.step_small,
            });
        }
        if !(self.step_large.is_finite() && self.step_large > 0.0) {
            return Err(StaircaseConfigError::NonPositiveStep {
                which: "step_large",
                value: self.step_large,
            });
        }
        if self.trial_limit == 0 {
            return Err(StaircaseConfigError::ZeroTrialLimit);
        }
        if !(self.convergence_epsilon.is_finite() && self.convergence_epsilon >= 0.0) {
            return Err(StaircaseConfigError::InvalidEpsilon(self.convergence_epsilon));
        }

        match &self.start {
            StartValues::Fixed { anchor, adaptive } => {
                self.check_in_domain(*anchor)?;
                self.check_in_domain(*adaptive)?;
            }
            StartValues::Sampled { anchors, adaptives } => {
                if anchors.is_empty() || adaptives.is_empty() {
                    return Err(StaircaseConfigError::EmptyStartChoices);
                }
                for &value in anchors.iter().chain(adaptives) {
                    self.check_in_domain(value)?;
                }
            }
        }

        if self.policy == StaircasePolicy::PracticeOnly && self.practice_pairs.is_empty() {
            return Err(StaircaseConfigError::EmptyPracticePairs);
        }
        Ok(())
    }

    fn check_in_domain(&self, value: f64) -> Result<(), StaircaseConfigError> {
        if value.is_finite() && value >= self.domain_min && value <= self.domain_max {
            Ok(())
        } else {
            Err(StaircaseConfigError::StartOutsideDomain { value })
        }
    }
}

/// Error returned when a staircase configuration is unusable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaircaseConfigError {
    /// `domain_min` must be finite and below `domain_max`.
    InvalidDomain {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A step size is zero, negative or non-finite.
    NonPositiveStep {
        /// Which step.
        which: &'static str,
        /// Configured value.
        value: f64,
    },
    /// `trial_limit` is zero.
    ZeroTrialLimit,
    /// Convergence epsilon is negative or non-finite.
    InvalidEpsilon(f64),
    /// A start value lies outside the domain.
    StartOutsideDomain {
        /// Offending value.
        value: f64,
    },
    /// A sampled start list is empty.
    EmptyStartChoices,
    /// Practice mode without practice pairs.
    EmptyPracticePairs,
}

impl fmt::Display for StaircaseConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { min, max } => {
                write!(f, "invalid staircase domain [{}, {}]", min, max)
            }
            Self::NonPositiveStep { which, value } => {
                write!(f, "{} must be finite and > 0 (got {})", which, value)
            }
            Self::ZeroTrialLimit => write!(f, "trial_limit must be positive"),
            Self::InvalidEpsilon(value) => {
                write!(f, "convergence_epsilon must be finite and >= 0 (got {})", value)
            }
            Self::StartOutsideDomain { value } => {
                write!(f, "start value {} lies outside the staircase domain", value)
            }
            Self::EmptyStartChoices => write!(f, "sampled start values need at least one choice each"),
            Self::EmptyPracticePairs => write!(f, "practice mode needs at least one value pair"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StaircaseConfigError {}
