//! Type aliases and common types.

use alloc::string::String;
use core::fmt;

/// Identifier of a calibrated item in the bank.
pub type ItemId = u32;

/// Chart and task labels attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryTags {
    /// Visualization type the item is drawn with (e.g. "Line", "Pie").
    pub chart_type: String,
    /// Task the item asks for (e.g. "RV" = retrieve value, "FE" = find extremum).
    pub task_type: String,
}

impl CategoryTags {
    /// Create tags from chart and task labels.
    pub fn new(chart_type: impl Into<String>, task_type: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            task_type: task_type.into(),
        }
    }

    /// The two coverage categories this item counts toward.
    pub fn categories(&self) -> [Category; 2] {
        [
            Category::Chart(self.chart_type.clone()),
            Category::Task(self.task_type.clone()),
        ]
    }
}

/// A coverage category.
///
/// Chart and task labels live in separate namespaces, so a chart called "MC"
/// never satisfies the task "MC".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// A chart type.
    Chart(String),
    /// A task type.
    Task(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Chart(name) => write!(f, "chart:{}", name),
            Category::Task(name) => write!(f, "task:{}", name),
        }
    }
}

/// Screen side in a two-alternative forced choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// Left stimulus.
    Left,
    /// Right stimulus.
    Right,
}

impl Side {
    /// The opposite side.
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Answer string recorded for this side.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Parse a recorded answer.
    ///
    /// Accepts "left"/"right" in any case, and the "1"/"2" button indices the
    /// forced-choice stimuli report.
    pub fn parse(answer: &str) -> Option<Self> {
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("left") || answer == "1" {
            Some(Side::Left)
        } else if answer.eq_ignore_ascii_case("right") || answer == "2" {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
