//! Output formatting for directives.

mod json;

pub use json::{to_json, to_json_pretty};
