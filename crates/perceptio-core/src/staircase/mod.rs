//! Step-based staircases for just-noticeable-difference experiments.
//!
//! A staircase shows two values per trial and asks which one is higher. A
//! correct answer brings the values closer by a small step; an incorrect one
//! pushes them apart by a larger step, so the gap settles near the
//! participant's discrimination threshold.
//!
//! All three experiment variants share [`StaircaseState::step`]; the
//! [`StaircasePolicy`] tag selects which value moves (or none in practice
//! mode).

mod config;
mod state;

pub use config::{Direction, StaircaseConfig, StaircaseConfigError, StaircasePolicy, StartValues};
pub use state::{
    Moved, Presentation, StaircaseReport, StaircaseState, StepOutcome, Termination, TrialSelection,
};
