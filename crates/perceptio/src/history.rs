//! Response history as handed over by the hosting framework.
//!
//! The history maps trial keys to records. Keys of an adaptive block look
//! like `<prefix>_<block>_<component>_<index>`; the trailing integer orders
//! the trials. Records are kept as raw JSON so that one malformed entry
//! cannot poison the rest of the history.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Ordered mapping from trial key to raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseHistory {
    entries: BTreeMap<String, Value>,
}

impl ResponseHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of trial key to record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace the record stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, record: Value) {
        self.entries.insert(key.into(), record);
    }

    /// Number of records, across all blocks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw records keyed by trial key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Completed records of the block named by `prefix`, in trial order.
    ///
    /// Keys of other blocks are ignored silently. Keys of this block that
    /// carry no trial index, and records that did not complete, are skipped
    /// with a warning.
    pub fn block_trials(&self, prefix: &str) -> Vec<BlockTrial> {
        let mut trials = Vec::new();
        for (key, raw) in &self.entries {
            if !TrialKey::belongs_to(key, prefix) {
                continue;
            }
            let Some(trial_key) = TrialKey::parse(key, prefix) else {
                tracing::warn!(key = %key, "skipping record: trial key has no index");
                continue;
            };
            let record: TrialRecord = match serde_json::from_value(raw.clone()) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping malformed record");
                    continue;
                }
            };
            if let Err(reason) = record.check_complete() {
                tracing::warn!(key = %key, %reason, "skipping incomplete record");
                continue;
            }
            trials.push(BlockTrial {
                key: trial_key,
                record,
            });
        }
        // Stable sort keeps key order for duplicate indices
        trials.sort_by(|a, b| a.key.index.cmp(&b.key.index));
        trials
    }
}

/// Parsed trial key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialKey {
    /// Block segment, if present.
    pub block: Option<String>,
    /// Component segment, if present.
    pub component: Option<String>,
    /// Trailing order index.
    pub index: usize,
}

impl TrialKey {
    /// Whether `key` is under `prefix`: equal to it or followed by `_`.
    pub fn belongs_to(key: &str, prefix: &str) -> bool {
        match key.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('_'),
            None => false,
        }
    }

    /// Parse `key` relative to `prefix`.
    ///
    /// Returns `None` when the key is outside the block or has no trailing
    /// integer.
    pub fn parse(key: &str, prefix: &str) -> Option<Self> {
        let rest = key.strip_prefix(prefix)?.strip_prefix('_')?;
        let (middle, index) = match rest.rsplit_once('_') {
            Some((middle, index)) => (middle, index),
            None => ("", rest),
        };
        let index = index.parse().ok()?;
        let (block, component) = match middle.split_once('_') {
            Some((block, component)) => (non_empty(block), non_empty(component)),
            None => (non_empty(middle), None),
        };
        Some(Self {
            block,
            component,
            index,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// One stored trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrialRecord {
    /// Component that rendered the trial.
    pub component_name: Option<String>,
    /// Parameters the trial was shown with.
    pub parameters: Option<Value>,
    /// Participant answers keyed by response id.
    pub answer: Option<Value>,
    /// `[{id, answer}]` entries stored with the trial.
    pub correct_answer: Option<Value>,
    /// Completion timestamp; negative or absent while unfinished.
    pub end_time: Option<f64>,
}

/// Why a record is not a finished trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    MissingEndTime,
    NegativeEndTime,
    MissingParameters,
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incomplete::MissingEndTime => write!(f, "no endTime"),
            Incomplete::NegativeEndTime => write!(f, "endTime is negative"),
            Incomplete::MissingParameters => write!(f, "no parameters object"),
        }
    }
}

impl TrialRecord {
    /// Check that the trial finished and recorded its parameters.
    pub fn check_complete(&self) -> std::result::Result<(), Incomplete> {
        match self.end_time {
            None => return Err(Incomplete::MissingEndTime),
            Some(t) if t.is_nan() || t < 0.0 => return Err(Incomplete::NegativeEndTime),
            Some(_) => {}
        }
        match self.parameters {
            Some(Value::Object(_)) => Ok(()),
            _ => Err(Incomplete::MissingParameters),
        }
    }

    /// Parameters object, when present.
    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.parameters.as_ref().and_then(Value::as_object)
    }

    /// Single parameter by name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params().and_then(|p| p.get(name))
    }

    /// Numeric parameter, accepting numbers and numeric strings.
    pub fn param_f64(&self, name: &str) -> Option<f64> {
        match self.param(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Answer given for `response_id`.
    pub fn answer_for(&self, response_id: &str) -> Option<&Value> {
        self.answer.as_ref()?.get(response_id)
    }

    /// Stored correct answer for `response_id`.
    pub fn correct_answer_for(&self, response_id: &str) -> Option<&Value> {
        self.correct_answer
            .as_ref()?
            .as_array()?
            .iter()
            .find(|entry| entry.get("id").and_then(Value::as_str) == Some(response_id))?
            .get("answer")
    }
}

/// A record of the current block with its parsed key.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTrial {
    pub key: TrialKey,
    pub record: TrialRecord,
}
