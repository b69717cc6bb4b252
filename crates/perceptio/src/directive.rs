//! What the host should show next.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Expected answer for one response field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectAnswer {
    /// Response field the answer belongs to.
    pub id: String,
    /// Expected answer text.
    pub answer: String,
}

impl CorrectAnswer {
    /// Expect `answer` in the field `id`.
    pub fn new(id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answer: answer.into(),
        }
    }
}

/// Next stimulus, or the end of the adaptive block.
///
/// `component: None` (serialized as `null`) ends the block. The final
/// directive carries a summary of the block in `parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    /// Component to render, `None` once the block is over.
    pub component: Option<String>,
    /// Parameters for the component, or the block summary.
    pub parameters: Value,
    /// Answers the host should store with the trial.
    pub correct_answer: Vec<CorrectAnswer>,
}

impl Directive {
    /// Show `component` with `parameters`.
    pub fn show(
        component: impl Into<String>,
        parameters: Value,
        correct_answer: Vec<CorrectAnswer>,
    ) -> Self {
        Self {
            component: Some(component.into()),
            parameters,
            correct_answer,
        }
    }

    /// End the block, reporting `summary`.
    pub fn end(summary: Value) -> Self {
        Self {
            component: None,
            parameters: summary,
            correct_answer: Vec::new(),
        }
    }

    /// Whether this directive ends the block.
    pub fn is_end(&self) -> bool {
        self.component.is_none()
    }
}
