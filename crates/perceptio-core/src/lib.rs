//! Core adaptive-testing algorithms for perception studies.
//!
//! This crate holds the numerical parts of the adaptive engine and is
//! designed to work in `no_std` environments with only an allocator:
//!
//! - [`bank`]: the calibrated item table (2PL discrimination/difficulty plus
//!   chart and task tags)
//! - [`irt`]: grid-based Bayesian ability estimation, Fisher-information item
//!   selection and category coverage tracking
//! - [`staircase`]: step-based threshold tracking for just-noticeable-difference
//!   (JND) experiments
//! - [`rng`]: seeded, per-trial random streams
//!
//! Everything here is a pure function of its inputs. Callers rebuild state by
//! folding over the response history on every call; nothing in this crate
//! keeps state between calls.
//!
//! # Features
//!
//! - `std` (default): `serde` derives and `std::error::Error` impls
//!
//! ```ignore
//! use perceptio_core::{
//!     bank::ItemBank,
//!     irt::{AbilityGrid, AbilityPosterior, NormalPrior},
//! };
//!
//! let bank = ItemBank::vlat();
//! let grid = AbilityGrid::default();
//! let mut posterior = AbilityPosterior::from_prior(&grid, NormalPrior::reference());
//! posterior.update(bank.get(10).unwrap(), true);
//! println!("ability = {:.3}", posterior.mean());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bank;
pub mod constants;
pub mod irt;
pub mod math;
pub mod rng;
pub mod staircase;
pub mod types;

pub use bank::{BankError, Item, ItemBank};
pub use irt::{
    AbilityEstimate, AbilityGrid, AbilityPosterior, CoveragePolicy, CoverageState, NormalPrior,
    Selection,
};
pub use staircase::{
    Direction, StaircaseConfig, StaircaseConfigError, StaircasePolicy, StaircaseState,
    StartValues, StepOutcome, Termination,
};
pub use types::{Category, CategoryTags, ItemId, Side};
