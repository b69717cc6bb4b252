//! Host simulation shared by the session tests.

#![allow(dead_code)]

use perceptio::{AdaptiveSession, Directive, ResponseHistory};
use serde_json::{json, Value};

/// Stored record for a trial shown with `directive`.
pub fn record(directive: &Directive, answer: Value, end_time: f64) -> Value {
    json!({
        "componentName": directive.component,
        "parameters": directive.parameters,
        "answer": answer,
        "correctAnswer": directive.correct_answer,
        "endTime": end_time,
    })
}

/// Trial key for the `index`-th trial of a block.
pub fn trial_key(prefix: &str, component: &str, index: usize) -> String {
    format!("{}_0_{}_{}", prefix, component, index)
}

/// Drive a block until it ends or `max_trials` records are stored.
///
/// Returns the history and the directive that followed it.
pub fn run_block<F>(session: &AdaptiveSession, max_trials: usize, mut respond: F) -> (ResponseHistory, Directive)
where
    F: FnMut(usize, &Directive) -> Value,
{
    let mut history = ResponseHistory::new();
    for index in 0..max_trials {
        let directive = session.compute_next(&history);
        if directive.is_end() {
            return (history, directive);
        }
        let answer = respond(index, &directive);
        let component = directive.component.clone().unwrap_or_default();
        history.insert(
            trial_key(&session.config().block_prefix, &component, index),
            record(&directive, answer, 1_000.0 + index as f64),
        );
    }
    let last = session.compute_next(&history);
    (history, last)
}
