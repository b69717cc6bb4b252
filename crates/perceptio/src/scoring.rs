//! Answer scoring.

use serde_json::Value;

use perceptio_core::constants::VALUE_TOLERANCE;
use perceptio_core::staircase::Presentation;

use crate::history::TrialRecord;

/// Score a record against its stored correct answer.
///
/// Compares `answer[response_id]` with the `correctAnswer` entry of the same
/// id. Without a stored answer, a boolean `answer.correct` is used. Returns
/// `None` when neither is available.
pub fn score(record: &TrialRecord, response_id: &str) -> Option<bool> {
    if let (Some(given), Some(expected)) = (
        record.answer_for(response_id),
        record.correct_answer_for(response_id),
    ) {
        return answers_match(given, expected);
    }
    record.answer_for("correct").and_then(Value::as_bool)
}

/// Score a two-alternative trial from its `left`/`right` parameters.
///
/// Returns `None` when either value or the answer is missing, or the answer
/// names no side.
pub fn score_sides(record: &TrialRecord, response_id: &str) -> Option<bool> {
    let left = record.param_f64("left")?;
    let right = record.param_f64("right")?;
    let answer = record.answer_for(response_id)?;
    let answer = match answer {
        Value::String(s) => s.as_str(),
        _ => return None,
    };
    Presentation::new(left, right).score(answer)
}

/// Compare two answers after normalization.
///
/// Strings compare trimmed and case-insensitively; values that both read as
/// numbers compare numerically. `None` when either side is null.
pub fn answers_match(given: &Value, expected: &Value) -> Option<bool> {
    let given = normalize(given)?;
    let expected = normalize(expected)?;
    match (given.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => Some((a - b).abs() <= VALUE_TOLERANCE),
        _ => Some(given == expected),
    }
}

fn normalize(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_lowercase()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // Structured answers compare by their JSON text
        other => Some(other.to_string()),
    }
}
