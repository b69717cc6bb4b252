//! IRT blocks driven end to end.

use std::collections::BTreeSet;
use std::sync::Arc;

use perceptio::{
    AdaptiveSession, CoveragePolicy, Directive, IrtConfig, ItemBank, ItemId, PriorConfig,
    ResponseHistory, SessionConfig,
};
use proptest::prelude::*;
use serde_json::{json, Value};

use crate::support::{record, run_block, trial_key};

fn vlat_session() -> AdaptiveSession {
    AdaptiveSession::with_builtin_bank(SessionConfig::vlat()).unwrap()
}

fn item_of(directive: &Directive) -> ItemId {
    directive.parameters["activeQuestionIdx"].as_u64().unwrap() as ItemId
}

/// Participant who answers correctly whenever the item is easier than even odds.
fn simulated(bank: &ItemBank, theta: f64) -> impl FnMut(usize, &Directive) -> Value + '_ {
    move |_, directive| {
        let item = bank.get(item_of(directive)).unwrap();
        json!({"vlatResp": "x", "correct": item.p_correct(theta) >= 0.5})
    }
}

fn administered(end: &Directive) -> Vec<ItemId> {
    end.parameters["administered"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap() as ItemId)
        .collect()
}

// =============================================================================
// BUDGET AND TERMINATION
// =============================================================================

#[test]
fn block_ends_after_27_items() {
    let session = vlat_session();
    let bank = ItemBank::vlat();
    let (history, end) = run_block(&session, 100, simulated(&bank, 0.8));

    assert_eq!(history.len(), 27);
    assert!(end.is_end());
    assert_eq!(end.component, None);
    assert!(end.correct_answer.is_empty());
    assert_eq!(end.parameters["reason"], "budget_reached");

    let items = administered(&end);
    assert_eq!(items.len(), 27);
    let unique: BTreeSet<ItemId> = items.iter().copied().collect();
    assert_eq!(unique.len(), 27);
    assert!(end.parameters["ability"].as_f64().unwrap().is_finite());
    assert!(end.parameters["standardError"].as_f64().unwrap() > 0.0);
}

#[test]
fn smaller_budget_is_respected() {
    let session = AdaptiveSession::with_builtin_bank(SessionConfig::vlat().item_budget(5)).unwrap();
    let bank = ItemBank::vlat();
    let (history, end) = run_block(&session, 100, simulated(&bank, 0.0));
    assert_eq!(history.len(), 5);
    assert!(end.is_end());
}

#[test]
fn exhausted_bank_ends_block() {
    let bank = ItemBank::from_rows(&[
        (1, 1.0, 0.0, "Line", "RV"),
        (2, 1.5, 0.5, "Bar", "FE"),
    ])
    .unwrap();
    let session = AdaptiveSession::new(SessionConfig::vlat(), Arc::new(bank.clone())).unwrap();
    let (history, end) = run_block(&session, 10, simulated(&bank, 0.0));
    assert_eq!(history.len(), 2);
    assert!(end.is_end());
    assert_eq!(end.parameters["reason"], "no_eligible_item");
}

// =============================================================================
// SELECTION
// =============================================================================

#[test]
fn empty_history_reports_exact_prior_mean() {
    let config = SessionConfig::vlat().with_irt(IrtConfig {
        prior: PriorConfig::Normal {
            mean: 0.123_456,
            std_dev: 0.9,
        },
        ..IrtConfig::default()
    });
    let session = AdaptiveSession::with_builtin_bank(config).unwrap();
    let first = session.compute_next(&ResponseHistory::new());
    assert_eq!(first.parameters["score"].as_f64().unwrap(), 0.123_456);

    let mut history = ResponseHistory::new();
    history.insert(
        trial_key("dynamicBlock", "VlatTrial", 0),
        record(&first, json!({"correct": true}), 1.0),
    );
    let second = session.compute_next(&history);
    assert!(second.parameters["score"].as_f64().unwrap() > 0.123_456);
}

#[test]
fn first_item_maximizes_information_at_prior_mean() {
    let session = vlat_session();
    let directive = session.compute_next(&ResponseHistory::new());

    assert_eq!(directive.component.as_deref(), Some("VlatTrial"));
    assert_eq!(directive.parameters["qidx"], 0);
    let ability = directive.parameters["score"].as_f64().unwrap();
    assert!((ability - 0.696_494_359).abs() < 1e-3);

    let mut best: Option<(ItemId, f64)> = None;
    for item in session.bank().iter() {
        let info = item.information(ability);
        if best.map_or(true, |(_, b)| info > b) {
            best = Some((item.id, info));
        }
    }
    assert_eq!(item_of(&directive), best.unwrap().0);
}

#[test]
fn every_category_is_covered() {
    let bank = ItemBank::vlat();
    for theta in [-2.0, 0.0, 0.7, 2.5] {
        let session = vlat_session();
        let (_, end) = run_block(&session, 100, simulated(&bank, theta));

        let mut seen = BTreeSet::new();
        for id in administered(&end) {
            seen.extend(bank.get(id).unwrap().tags.categories());
        }
        assert_eq!(seen, bank.categories(), "theta = {}", theta);
    }
}

#[test]
fn uncovered_first_policy_also_covers() {
    let bank = ItemBank::vlat();
    let config = SessionConfig::vlat().coverage(CoveragePolicy::UncoveredFirst);
    let session = AdaptiveSession::with_builtin_bank(config).unwrap();
    let (_, end) = run_block(&session, 100, simulated(&bank, 0.3));

    let mut seen = BTreeSet::new();
    for id in administered(&end) {
        seen.extend(bank.get(id).unwrap().tags.categories());
    }
    assert_eq!(seen, bank.categories());
}

#[test]
fn default_policy_prefers_unused_chart_task_pairs() {
    let bank = ItemBank::vlat();
    let session = vlat_session();
    let (_, end) = run_block(&session, 100, |i, _| json!({"correct": i % 2 == 0}));
    let items = administered(&end);
    assert_eq!(items.len(), 27);

    let mut uncovered = bank.categories();
    let mut used_pairs = BTreeSet::new();
    for (position, id) in items.iter().enumerate() {
        let item = bank.get(*id).unwrap();
        let pair = (item.tags.chart_type.clone(), item.tags.task_type.clone());
        let remaining = 27 - position;
        if !uncovered.is_empty() {
            if remaining > uncovered.len() {
                assert!(!used_pairs.contains(&pair), "item {} repeats {:?}", id, pair);
            } else {
                let touches = item.tags.categories().iter().any(|c| uncovered.contains(c));
                assert!(touches, "item {} covers nothing new", id);
            }
        }
        for category in item.tags.categories() {
            uncovered.remove(&category);
        }
        used_pairs.insert(pair);
    }
    assert!(uncovered.is_empty());
}

#[test]
fn correct_answers_raise_the_estimate() {
    let session = vlat_session();
    let (_, strong) = run_block(&session, 100, |_, _| json!({"correct": true}));
    let (_, weak) = run_block(&session, 100, |_, _| json!({"correct": false}));
    let strong = strong.parameters["ability"].as_f64().unwrap();
    let weak = weak.parameters["ability"].as_f64().unwrap();
    assert!(strong > weak + 1.0, "strong {} weak {}", strong, weak);
}

#[test]
fn answer_keys_flow_into_directives_and_scoring() {
    let bank = ItemBank::vlat();
    let keys = bank.iter().map(|item| (item.id.to_string(), "A".to_string())).collect();
    let config = SessionConfig::vlat().with_irt(IrtConfig {
        answer_keys: keys,
        ..IrtConfig::default()
    });
    let session = AdaptiveSession::with_builtin_bank(config).unwrap();

    let first = session.compute_next(&ResponseHistory::new());
    assert_eq!(first.correct_answer.len(), 1);
    assert_eq!(first.correct_answer[0].id, "vlatResp");
    assert_eq!(first.correct_answer[0].answer, "A");

    let (_, right) = run_block(&session, 100, |_, _| json!({"vlatResp": "a"}));
    let (_, wrong) = run_block(&session, 100, |_, _| json!({"vlatResp": "B"}));
    assert!(
        right.parameters["ability"].as_f64().unwrap() > wrong.parameters["ability"].as_f64().unwrap()
    );
}

// =============================================================================
// ROBUSTNESS AND DETERMINISM
// =============================================================================

#[test]
fn malformed_records_are_skipped() {
    let session = vlat_session();
    let bank = ItemBank::vlat();
    let (history, _) = run_block(&session, 5, simulated(&bank, 0.5));
    let expected = session.compute_next(&history);

    let mut noisy = history.clone();
    noisy.insert(
        trial_key("dynamicBlock", "VlatTrial", 5),
        json!({"parameters": {"activeQuestionIdx": 1}, "answer": {"correct": true}, "endTime": -1}),
    );
    noisy.insert(
        trial_key("dynamicBlock", "VlatTrial", 6),
        json!({"answer": {"correct": true}, "endTime": 10}),
    );
    noisy.insert(
        trial_key("dynamicBlock", "VlatTrial", 7),
        json!({"parameters": {"activeQuestionIdx": 999}, "answer": {"correct": true}, "endTime": 10}),
    );
    noisy.insert(
        trial_key("dynamicBlock", "VlatTrial", 8),
        json!({"parameters": {"activeQuestionIdx": 1}, "answer": {}, "endTime": 10}),
    );
    noisy.insert("dynamicBlock_0_VlatTrial_last", json!({"parameters": {}, "endTime": 1}));
    noisy.insert("consent_0", json!({"answer": {"agree": true}, "endTime": 1}));

    assert_eq!(session.compute_next(&noisy), expected);
}

#[test]
fn repeated_item_counts_once() {
    let session = vlat_session();
    let first = session.compute_next(&ResponseHistory::new());

    let mut history = ResponseHistory::new();
    history.insert(
        trial_key("dynamicBlock", "VlatTrial", 0),
        record(&first, json!({"correct": true}), 1.0),
    );
    let once = session.compute_next(&history);

    history.insert(
        trial_key("dynamicBlock", "VlatTrial", 1),
        record(&first, json!({"correct": true}), 2.0),
    );
    assert_eq!(session.compute_next(&history), once);
}

#[test]
fn json_round_trip_through_session() {
    let session = vlat_session();
    let out = session.compute_next_json("{}").unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["component"], "VlatTrial");
    assert!(value["parameters"]["activeQuestionIdx"].is_u64());
    assert!(session.compute_next_json("not json").is_err());
}

#[test]
fn invalid_config_is_rejected() {
    let config = SessionConfig::vlat().component("");
    assert!(AdaptiveSession::with_builtin_bank(config).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The same history always gives the same directive
    #[test]
    fn compute_next_is_idempotent(pattern in prop::collection::vec(any::<bool>(), 0..27)) {
        let session = vlat_session();
        let (history, _) = run_block(&session, pattern.len(), |i, _| json!({"correct": pattern[i]}));

        let first = session.compute_next(&history);
        let second = session.compute_next(&history);
        prop_assert_eq!(&first, &second);

        let other = AdaptiveSession::with_builtin_bank(SessionConfig::vlat()).unwrap();
        prop_assert_eq!(first, other.compute_next(&history));
    }
}
