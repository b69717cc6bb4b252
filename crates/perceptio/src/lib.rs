//! # perceptio
//!
//! Adaptive controller for perception studies. After each participant
//! response the host passes the full response history and gets back what to
//! show next:
//!
//! - **IRT blocks** estimate a latent ability with a grid posterior under the
//!   2PL model and pick the most informative remaining item, making sure
//!   every chart type and task type appears before the item budget runs out.
//! - **Staircase blocks** move a stimulus value toward the participant's
//!   just-noticeable difference, one forced-choice trial at a time.
//!
//! ## Quick Start
//!
//! ```ignore
//! use perceptio::{AdaptiveSession, ResponseHistory, SessionConfig};
//!
//! let session = AdaptiveSession::with_builtin_bank(SessionConfig::vlat())?;
//! let history = ResponseHistory::from_json(stored_answers)?;
//!
//! let directive = session.compute_next(&history);
//! match directive.component {
//!     Some(component) => println!("show {} with {}", component, directive.parameters),
//!     None => println!("block finished: {}", directive.parameters),
//! }
//! ```
//!
//! The controller keeps no state between calls. Every call replays the
//! block's history from the start, so the same history always yields the
//! same directive.
//!
//! Algorithms live in [`perceptio_core`]; this crate adds history parsing,
//! scoring, configuration and the directive format.

#![warn(clippy::all)]

pub mod config;
pub mod directive;
pub mod error;
pub mod history;
pub mod output;
pub mod scoring;
pub mod session;

pub use config::{GridConfig, IrtConfig, PriorConfig, SessionConfig, SessionMode};
pub use directive::{CorrectAnswer, Directive};
pub use error::{ConfigError, Error, Result};
pub use history::{BlockTrial, ResponseHistory, TrialKey, TrialRecord};
pub use session::{compute_next, AdaptiveSession};

pub use perceptio_core::irt::CoveragePolicy;
pub use perceptio_core::staircase::{
    Direction, StaircaseConfig, StaircasePolicy, StaircaseReport, StartValues, Termination,
};
pub use perceptio_core::{Item, ItemBank, ItemId};
