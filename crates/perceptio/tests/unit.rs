//! Integration tests for the session controller
//!
//! These drive full adaptive blocks through `compute_next`, feeding each
//! directive back as a stored history record the way the host does.

#[path = "unit/support.rs"]
mod support;
#[path = "unit/irt_session.rs"]
mod irt_session;
#[path = "unit/staircase_session.rs"]
mod staircase_session;
#[path = "unit/history.rs"]
mod history;
