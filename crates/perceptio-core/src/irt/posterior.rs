//! Grid-based Bayesian ability posterior.
//!
//! The posterior over theta is a discretized density on a fixed grid:
//!
//! posterior(theta_i) ∝ prior(theta_i) × Π_k P(response_k | theta_i)
//!
//! renormalized after every response so it always sums to 1.

use alloc::vec::Vec;

use crate::bank::Item;
use crate::constants::{GRID_MAX, GRID_MIN, GRID_POINTS, POSTERIOR_FLOOR, REFERENCE_ABILITY_SAMPLE};
use crate::math::{linspace, normal_pdf, sq, sqrt};

/// Fixed grid of ability values the posterior is evaluated on.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityGrid {
    points: Vec<f64>,
}

impl AbilityGrid {
    /// `points` evenly spaced abilities over `[min, max]`.
    pub fn new(min: f64, max: f64, points: usize) -> Self {
        Self {
            points: linspace(min, max, points),
        }
    }

    /// Grid values in increasing order.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for AbilityGrid {
    /// 200 points over [-5, 5].
    fn default() -> Self {
        Self::new(GRID_MIN, GRID_MAX, GRID_POINTS)
    }
}

/// Normal prior on ability.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalPrior {
    /// Prior mean.
    pub mean: f64,
    /// Prior standard deviation (> 0).
    pub std_dev: f64,
}

impl NormalPrior {
    /// Create a prior with the given mean and standard deviation.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Fit mean and population standard deviation to a sample.
    ///
    /// Returns `None` for an empty sample or one with zero spread.
    pub fn fit(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }
        let n = sample.len() as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let variance = sample.iter().map(|x| sq(x - mean)).sum::<f64>() / n;
        let std_dev = sqrt(variance);
        if std_dev > 0.0 && std_dev.is_finite() {
            Some(Self { mean, std_dev })
        } else {
            None
        }
    }

    /// Prior fit to the calibration tryout of the built-in bank.
    pub fn reference() -> Self {
        match Self::fit(&REFERENCE_ABILITY_SAMPLE) {
            Some(prior) => prior,
            None => Self::standard(),
        }
    }

    /// Standard normal N(0, 1).
    pub fn standard() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Whether both parameters are usable.
    pub fn is_valid(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite() && self.std_dev > 0.0
    }
}

impl Default for NormalPrior {
    fn default() -> Self {
        Self::reference()
    }
}

/// Discretized posterior density over ability.
///
/// Invariant: every density value is non-negative and the values sum to 1
/// (within floating tolerance) after construction and after every update.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityPosterior {
    thetas: Vec<f64>,
    density: Vec<f64>,
    n_responses: usize,
}

impl AbilityPosterior {
    /// Start from the prior density evaluated on the grid.
    pub fn from_prior(grid: &AbilityGrid, prior: NormalPrior) -> Self {
        let thetas = grid.points().to_vec();
        let mut density: Vec<f64> = thetas
            .iter()
            .map(|&theta| normal_pdf(theta, prior.mean, prior.std_dev))
            .collect();
        normalize(&mut density);
        Self {
            thetas,
            density,
            n_responses: 0,
        }
    }

    /// Fold one response into the posterior.
    pub fn update(&mut self, item: &Item, correct: bool) {
        for (p, &theta) in self.density.iter_mut().zip(&self.thetas) {
            *p *= item.likelihood(theta, correct);
        }
        normalize(&mut self.density);
        self.n_responses += 1;
    }

    /// By-value variant of [`update`](Self::update) for folds.
    pub fn updated(mut self, item: &Item, correct: bool) -> Self {
        self.update(item, correct);
        self
    }

    /// Posterior mean, the point estimate of ability.
    pub fn mean(&self) -> f64 {
        self.thetas
            .iter()
            .zip(&self.density)
            .map(|(theta, p)| theta * p)
            .sum()
    }

    /// Posterior standard deviation (standard error of the estimate).
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let variance: f64 = self
            .thetas
            .iter()
            .zip(&self.density)
            .map(|(theta, p)| sq(theta - mean) * p)
            .sum();
        sqrt(variance.max(0.0))
    }

    /// Grid values the density is defined on.
    pub fn thetas(&self) -> &[f64] {
        &self.thetas
    }

    /// Normalized density values.
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Sum of the density (1 within tolerance).
    pub fn total_mass(&self) -> f64 {
        self.density.iter().sum()
    }

    /// Number of responses folded in.
    pub fn n_responses(&self) -> usize {
        self.n_responses
    }
}

/// Renormalize in place, guarding against an all-zero vector.
fn normalize(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    for v in values.iter_mut() {
        if !v.is_finite() || *v < 0.0 {
            *v = 0.0;
        }
        *v += POSTERIOR_FLOOR;
    }
    let total: f64 = values.iter().sum();
    if total.is_finite() && total > 0.0 {
        for v in values.iter_mut() {
            *v /= total;
        }
    } else {
        let uniform = 1.0 / values.len() as f64;
        values.iter_mut().for_each(|v| *v = uniform);
    }
}

/// Point estimate plus the posterior it came from.
#[derive(Debug, Clone)]
pub struct AbilityEstimate {
    /// Posterior mean.
    pub ability: f64,
    /// Posterior standard deviation.
    pub standard_error: f64,
    /// Full posterior, consumed by the next selection step.
    pub posterior: AbilityPosterior,
}

/// Estimate ability from an ordered sequence of `(item, correct)` pairs.
pub fn estimate_ability<'a, I>(grid: &AbilityGrid, prior: NormalPrior, responses: I) -> AbilityEstimate
where
    I: IntoIterator<Item = (&'a Item, bool)>,
{
    let posterior = responses
        .into_iter()
        .fold(AbilityPosterior::from_prior(grid, prior), |post, (item, correct)| {
            post.updated(item, correct)
        });
    AbilityEstimate {
        ability: posterior.mean(),
        standard_error: posterior.std_dev(),
        posterior,
    }
}
