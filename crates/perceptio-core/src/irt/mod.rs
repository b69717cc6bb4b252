//! Item-response-theory adaptive testing.
//!
//! The test alternates two steps after every response:
//!
//! 1. **Ability estimation** ([`AbilityPosterior`]): a discretized Bayesian
//!    posterior over the latent ability theta, starting from a normal prior
//!    fit to a reference calibration sample and updated with the 2PL
//!    likelihood of each response. The point estimate is the posterior mean.
//!
//! 2. **Item selection** ([`select_next_item`]): the unadministered item with
//!    the largest Fisher information at the current estimate, restricted by a
//!    [`CoveragePolicy`] so that every chart and task category shows up before
//!    the item budget runs out.
//!
//! Both steps are deterministic. Rebuilding the posterior from the same
//! response sequence gives bit-identical densities.

pub mod model;

mod coverage;
mod posterior;
mod selector;

pub use coverage::{CoveragePolicy, CoverageState};
pub use posterior::{estimate_ability, AbilityEstimate, AbilityGrid, AbilityPosterior, NormalPrior};
pub use selector::{select_next_item, ExhaustionReason, Selection};
