//! Staircase blocks driven end to end.

use perceptio::{
    AdaptiveSession, Direction, Directive, ResponseHistory, SessionConfig, StaircaseConfig,
};
use serde_json::{json, Value};

use crate::support::{record, run_block, trial_key};

fn session(config: SessionConfig) -> AdaptiveSession {
    AdaptiveSession::with_builtin_bank(config).unwrap()
}

fn expected(directive: &Directive) -> String {
    directive.correct_answer[0].answer.clone()
}

fn right_answer(_: usize, directive: &Directive) -> Value {
    json!({"buttonResponse": expected(directive)})
}

fn wrong_answer(_: usize, directive: &Directive) -> Value {
    let wrong = match expected(directive).as_str() {
        "left" => "right",
        _ => "left",
    };
    json!({"buttonResponse": wrong})
}

fn param(directive: &Directive, name: &str) -> f64 {
    directive.parameters[name].as_f64().unwrap()
}

// =============================================================================
// FIXED ANCHOR
// =============================================================================

#[test]
fn first_correct_response_moves_adaptive_to_exact_value() {
    let config = SessionConfig::jnd(Direction::Above)
        .with_staircase(StaircaseConfig::fixed_anchor(Direction::Above, 0.9, 0.1));
    let session = session(config);

    let first = session.compute_next(&ResponseHistory::new());
    assert_eq!(param(&first, "anchor"), 0.9);
    assert_eq!(param(&first, "adaptive"), 0.1);
    assert_eq!(first.parameters["feedback"], Value::Null);

    let mut history = ResponseHistory::new();
    history.insert(
        trial_key("dynamicBlock", "JndTrial", 0),
        record(&first, right_answer(0, &first), 1.0),
    );
    let second = session.compute_next(&history);
    assert_eq!(param(&second, "adaptive"), 0.09);
    assert_eq!(param(&second, "anchor"), 0.9);
    assert_eq!(second.parameters["feedback"], true);
    assert_eq!(second.parameters["trial"], 1);
}

#[test]
fn always_correct_converges() {
    let session = session(SessionConfig::jnd(Direction::Above));
    let (history, end) = run_block(&session, 100, right_answer);

    assert!(end.is_end());
    assert_eq!(history.len(), 40);
    assert_eq!(end.parameters["reason"], "converged");
    assert_eq!(end.parameters["trials"], 40);
    assert!(param(&end, "observedJnd") < 0.011);

    let selections = end.parameters["selections"].as_array().unwrap();
    assert_eq!(selections.len(), 40);
    assert_eq!(selections[0]["trial"], 0);
    assert_eq!(selections[0]["anchor"], 0.3);
    assert_eq!(selections[0]["adaptive"], 0.7);
    assert_eq!(selections[0]["correct"], true);
    assert!(selections[0]["higherSide"].is_string());
}

#[test]
fn terminates_after_50_trials() {
    let session = session(SessionConfig::jnd(Direction::Below));
    let (mut history, end) = run_block(&session, 100, wrong_answer);

    assert!(end.is_end());
    assert_eq!(history.len(), 50);
    assert_eq!(end.parameters["reason"], "trial_limit");
    assert_eq!(end.parameters["trials"], 50);

    // Later responses, right or wrong, do not reopen the block
    for (index, answer) in [(50, "left"), (51, "right")] {
        history.insert(
            trial_key("dynamicBlock", "JndTrial", index),
            json!({
                "parameters": {"left": 0.5, "right": 0.4},
                "answer": {"buttonResponse": answer},
                "endTime": 99.0
            }),
        );
        assert_eq!(session.compute_next(&history), end);
    }
}

#[test]
fn presentation_sides_vary_and_score_consistently() {
    let session = session(SessionConfig::jnd(Direction::Above));
    let (_, end) = run_block(&session, 100, right_answer);
    let selections = end.parameters["selections"].as_array().unwrap();

    let lefts = selections.iter().filter(|s| s["higherSide"] == "left").count();
    let rights = selections.iter().filter(|s| s["higherSide"] == "right").count();
    assert!(lefts > 0 && rights > 0);
    assert!(selections.iter().all(|s| s["correct"] == true));
}

#[test]
fn directive_matches_higher_side() {
    let session = session(SessionConfig::jnd(Direction::Above));
    let directive = session.compute_next(&ResponseHistory::new());
    let left = param(&directive, "left");
    let right = param(&directive, "right");
    let want = if left > right { "left" } else { "right" };
    assert_eq!(expected(&directive), want);
    assert_eq!(directive.correct_answer[0].id, "buttonResponse");
    assert_eq!(directive.component.as_deref(), Some("JndTrial"));
}

// =============================================================================
// DUAL CONVERGING
// =============================================================================

#[test]
fn dual_converging_replays_deterministically() {
    let respond = |i: usize, d: &Directive| {
        if i % 3 == 2 {
            wrong_answer(i, d)
        } else {
            right_answer(i, d)
        }
    };
    let (first, end_a) = run_block(&session(SessionConfig::jnd_dual()), 30, respond);
    let (second, end_b) = run_block(&session(SessionConfig::jnd_dual()), 30, respond);
    assert_eq!(first, second);
    assert_eq!(end_a, end_b);
}

#[test]
fn dual_converging_moves_one_value_per_trial() {
    let session = session(SessionConfig::jnd_dual().seed(99));
    let mut history = ResponseHistory::new();
    let mut previous = session.compute_next(&history);
    assert!([0.6, 0.7, 0.8].contains(&param(&previous, "anchor")));
    assert!([0.3, 0.4, 0.5].contains(&param(&previous, "adaptive")));

    for index in 0..20 {
        // At the resolution floor a correct answer holds both values
        if (param(&previous, "anchor") - param(&previous, "adaptive")).abs() <= 0.011 {
            break;
        }
        history.insert(
            trial_key("dynamicBlock", "JndTrial", index),
            record(&previous, right_answer(index, &previous), index as f64),
        );
        let next = session.compute_next(&history);
        if next.is_end() {
            break;
        }
        let anchor_moved = param(&next, "anchor") != param(&previous, "anchor");
        let adaptive_moved = param(&next, "adaptive") != param(&previous, "adaptive");
        assert!(anchor_moved != adaptive_moved, "trial {}", index);
        previous = next;
    }
}

// =============================================================================
// PRACTICE AND SCORING
// =============================================================================

#[test]
fn practice_walks_pairs_and_reports_feedback() {
    let session = session(SessionConfig::practice());
    let pairs = StaircaseConfig::practice().practice_pairs;

    let mut history = ResponseHistory::new();
    for (index, &(anchor, adaptive)) in pairs.iter().enumerate() {
        let directive = session.compute_next(&history);
        assert_eq!(directive.component.as_deref(), Some("JndPractice"));
        assert_eq!(param(&directive, "anchor"), anchor);
        assert_eq!(param(&directive, "adaptive"), adaptive);
        if index > 0 {
            // Odd indices were answered wrong
            assert_eq!(directive.parameters["feedback"], (index - 1) % 2 == 0);
        }
        let answer = if index % 2 == 0 {
            right_answer(index, &directive)
        } else {
            wrong_answer(index, &directive)
        };
        history.insert(
            trial_key("practiceBlock", "JndPractice", index),
            record(&directive, answer, 1.0),
        );
    }

    let end = session.compute_next(&history);
    assert!(end.is_end());
    assert_eq!(end.parameters["reason"], "practice_complete");
    assert_eq!(end.parameters["trials"], 9);
}

#[test]
fn scores_from_sides_without_stored_answer() {
    let session = session(SessionConfig::jnd(Direction::Above));
    let first = session.compute_next(&ResponseHistory::new());
    let answer = if param(&first, "left") > param(&first, "right") {
        "Left"
    } else {
        "Right"
    };

    let mut history = ResponseHistory::new();
    history.insert(
        trial_key("dynamicBlock", "JndTrial", 0),
        json!({"parameters": first.parameters, "answer": {"buttonResponse": answer}, "endTime": 1}),
    );
    let next = session.compute_next(&history);
    assert_eq!(next.parameters["feedback"], true);
    assert_eq!(param(&next, "adaptive"), 0.69);
}

#[test]
fn unscorable_responses_are_skipped() {
    let session = session(SessionConfig::jnd(Direction::Above));
    let first = session.compute_next(&ResponseHistory::new());

    let mut history = ResponseHistory::new();
    history.insert(
        trial_key("dynamicBlock", "JndTrial", 0),
        json!({"parameters": first.parameters, "answer": {"buttonResponse": "maybe"}, "endTime": 1}),
    );
    assert_eq!(session.compute_next(&history), first);
}
