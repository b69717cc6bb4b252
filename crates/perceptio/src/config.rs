//! Session configuration.
//!
//! Everything the controller needs besides the history lives here: block
//! naming, the stimulus component, the seed and the algorithm settings. The
//! presets cover the studies this engine was built for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use perceptio_core::constants::{
    DEFAULT_ITEM_BUDGET, DEFAULT_SEED, GRID_MAX, GRID_MIN, GRID_POINTS,
};
use perceptio_core::irt::{AbilityGrid, CoveragePolicy, NormalPrior};
use perceptio_core::staircase::{Direction, StaircaseConfig};
use perceptio_core::ItemId;

use crate::error::{ConfigError, Result};

/// Configuration of an adaptive block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Trial-key prefix identifying records of this block.
    ///
    /// Default: "dynamicBlock"
    pub block_prefix: String,

    /// Stimulus component named in emitted directives.
    pub component: String,

    /// Response field that carries the participant's answer.
    pub response_id: String,

    /// Seed for every random decision in the block.
    pub seed: u64,

    /// Algorithm driving the block.
    pub mode: SessionMode,
}

/// Which adaptive algorithm a block runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionMode {
    /// IRT ability test.
    Irt(IrtConfig),
    /// JND staircase.
    Staircase(StaircaseConfig),
}

/// Settings for an IRT block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrtConfig {
    /// Items administered before the block ends. Default: 27
    pub item_budget: usize,

    /// Ability grid.
    pub grid: GridConfig,

    /// Ability prior.
    pub prior: PriorConfig,

    /// Category coverage rule.
    pub coverage: CoveragePolicy,

    /// Parameter carrying the administered item id.
    ///
    /// Default: "activeQuestionIdx"
    pub item_parameter: String,

    /// Expected answers keyed by item id, copied into directives when
    /// present. Keys are decimal strings, as in a JSON object.
    pub answer_keys: BTreeMap<String, String>,
}

impl IrtConfig {
    /// Expected answer for `item`, if one is configured.
    pub fn answer_key(&self, item: ItemId) -> Option<&str> {
        self.answer_keys.get(&item.to_string()).map(String::as_str)
    }
}

impl Default for IrtConfig {
    fn default() -> Self {
        Self {
            item_budget: DEFAULT_ITEM_BUDGET,
            grid: GridConfig::default(),
            prior: PriorConfig::default(),
            coverage: CoveragePolicy::default(),
            item_parameter: "activeQuestionIdx".to_string(),
            answer_keys: BTreeMap::new(),
        }
    }
}

/// Evenly spaced ability grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Lowest ability on the grid.
    pub min: f64,
    /// Highest ability on the grid.
    pub max: f64,
    /// Number of grid points, at least 2.
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min: GRID_MIN,
            max: GRID_MAX,
            points: GRID_POINTS,
        }
    }
}

impl GridConfig {
    /// Build the grid.
    pub fn build(&self) -> AbilityGrid {
        AbilityGrid::new(self.min, self.max, self.points)
    }
}

/// Source of the ability prior.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorConfig {
    /// Normal fit to the built-in calibration sample.
    #[default]
    Reference,
    /// Explicit normal prior.
    Normal { mean: f64, std_dev: f64 },
}

impl PriorConfig {
    /// Resolve to concrete parameters.
    pub fn resolve(&self) -> NormalPrior {
        match *self {
            PriorConfig::Reference => NormalPrior::reference(),
            PriorConfig::Normal { mean, std_dev } => NormalPrior::new(mean, std_dev),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::vlat()
    }
}

impl SessionConfig {
    /// Adaptive visualization-literacy test over the built-in bank.
    pub fn vlat() -> Self {
        Self {
            block_prefix: "dynamicBlock".to_string(),
            component: "VlatTrial".to_string(),
            response_id: "vlatResp".to_string(),
            seed: DEFAULT_SEED,
            mode: SessionMode::Irt(IrtConfig::default()),
        }
    }

    /// Fixed-anchor JND staircase approaching from `direction`.
    ///
    /// Above starts at (0.3, 0.7), below at (0.7, 0.3).
    pub fn jnd(direction: Direction) -> Self {
        let staircase = match direction {
            Direction::Above => StaircaseConfig::fixed_anchor(direction, 0.3, 0.7),
            Direction::Below => StaircaseConfig::fixed_anchor(direction, 0.7, 0.3),
        };
        Self::staircase(staircase)
    }

    /// Dual-converging JND staircase with sampled start values.
    pub fn jnd_dual() -> Self {
        Self::staircase(StaircaseConfig::dual_converging())
    }

    /// Practice block with feedback only.
    pub fn practice() -> Self {
        Self {
            block_prefix: "practiceBlock".to_string(),
            component: "JndPractice".to_string(),
            ..Self::staircase(StaircaseConfig::practice())
        }
    }

    fn staircase(config: StaircaseConfig) -> Self {
        Self {
            block_prefix: "dynamicBlock".to_string(),
            component: "JndTrial".to_string(),
            response_id: "buttonResponse".to_string(),
            seed: DEFAULT_SEED,
            mode: SessionMode::Staircase(config),
        }
    }

    /// Parse from JSON; missing fields take the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the trial-key prefix.
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.block_prefix = prefix.into();
        self
    }

    /// Set the stimulus component.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Set the scored response field.
    pub fn response_id(mut self, id: impl Into<String>) -> Self {
        self.response_id = id.into();
        self
    }

    /// Set the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the item budget. No effect on staircase blocks.
    ///
    /// # Panics
    ///
    /// Panics if `budget` is zero.
    pub fn item_budget(mut self, budget: usize) -> Self {
        assert!(budget > 0, "item_budget must be positive");
        if let SessionMode::Irt(irt) = &mut self.mode {
            irt.item_budget = budget;
        }
        self
    }

    /// Set the coverage policy. No effect on staircase blocks.
    pub fn coverage(mut self, policy: CoveragePolicy) -> Self {
        if let SessionMode::Irt(irt) = &mut self.mode {
            irt.coverage = policy;
        }
        self
    }

    /// Replace the staircase settings, switching to staircase mode.
    pub fn with_staircase(mut self, config: StaircaseConfig) -> Self {
        self.mode = SessionMode::Staircase(config);
        self
    }

    /// Replace the IRT settings, switching to IRT mode.
    pub fn with_irt(mut self, config: IrtConfig) -> Self {
        self.mode = SessionMode::Irt(config);
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.block_prefix.is_empty() {
            return Err(ConfigError::EmptyBlockPrefix);
        }
        if self.component.is_empty() {
            return Err(ConfigError::EmptyComponent);
        }
        if self.response_id.is_empty() {
            return Err(ConfigError::EmptyResponseId);
        }

        match &self.mode {
            SessionMode::Irt(irt) => {
                if irt.item_budget == 0 {
                    return Err(ConfigError::ZeroItemBudget);
                }
                if irt.item_parameter.is_empty() {
                    return Err(ConfigError::EmptyItemParameter);
                }
                let grid = irt.grid;
                if grid.points < 2
                    || !(grid.min.is_finite() && grid.max.is_finite())
                    || grid.min >= grid.max
                {
                    return Err(ConfigError::InvalidGrid {
                        min: grid.min,
                        max: grid.max,
                        points: grid.points,
                    });
                }
                let prior = irt.prior.resolve();
                if !prior.is_valid() {
                    return Err(ConfigError::InvalidPrior {
                        mean: prior.mean,
                        std_dev: prior.std_dev,
                    });
                }
            }
            SessionMode::Staircase(staircase) => staircase.validate()?,
        }
        Ok(())
    }
}
