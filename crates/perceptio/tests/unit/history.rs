//! History parsing as seen from the public API.

use perceptio::{compute_next, ItemBank, ResponseHistory, SessionConfig, TrialKey};

const STORED: &str = r#"{
    "introduction_0": {"componentName": "intro", "parameters": {}, "answer": {}, "endTime": 5},
    "dynamicBlock_0_VlatTrial_10": {
        "componentName": "VlatTrial",
        "parameters": {"activeQuestionIdx": 33},
        "answer": {"vlatResp": "x", "correct": true},
        "endTime": 1700000000010
    },
    "dynamicBlock_0_VlatTrial_9": {
        "componentName": "VlatTrial",
        "parameters": {"activeQuestionIdx": 21},
        "answer": {"vlatResp": "x", "correct": false},
        "endTime": 1700000000009
    },
    "dynamicBlock_0_VlatTrial_11": {
        "componentName": "VlatTrial",
        "parameters": {"activeQuestionIdx": 45},
        "answer": {},
        "endTime": -1
    },
    "dynamicBlockExtra_0_VlatTrial_0": {
        "parameters": {"activeQuestionIdx": 1},
        "answer": {"correct": true},
        "endTime": 1
    }
}"#;

#[test]
fn stored_history_parses_and_orders() {
    let history = ResponseHistory::from_json(STORED).unwrap();
    assert_eq!(history.len(), 5);

    let trials = history.block_trials("dynamicBlock");
    let indices: Vec<usize> = trials.iter().map(|t| t.key.index).collect();
    assert_eq!(indices, vec![9, 10]);
    assert_eq!(trials[0].record.param_f64("activeQuestionIdx"), Some(21.0));
    assert_eq!(trials[0].key.component.as_deref(), Some("VlatTrial"));
}

#[test]
fn stored_history_drives_the_controller() {
    let history = ResponseHistory::from_json(STORED).unwrap();
    let bank = ItemBank::vlat();
    let directive = compute_next(&history, &bank, &SessionConfig::vlat());

    assert_eq!(directive.parameters["qidx"], 2);
    let next = directive.parameters["activeQuestionIdx"].as_u64().unwrap();
    assert!(next != 21 && next != 33);
}

#[test]
fn other_prefix_selects_other_block() {
    let history = ResponseHistory::from_json(STORED).unwrap();
    let trials = history.block_trials("dynamicBlockExtra");
    assert_eq!(trials.len(), 1);
    assert_eq!(trials[0].key.block.as_deref(), Some("0"));
}

#[test]
fn trial_key_round_trip_shapes() {
    let key = TrialKey::parse("jnd_block_2_ScatterJnd_41", "jnd_block").unwrap();
    assert_eq!(key.block.as_deref(), Some("2"));
    assert_eq!(key.component.as_deref(), Some("ScatterJnd"));
    assert_eq!(key.index, 41);
}

#[test]
fn empty_history_is_a_fresh_block() {
    let history = ResponseHistory::from_json("{}").unwrap();
    assert!(history.is_empty());
    assert!(history.block_trials("dynamicBlock").is_empty());
}
