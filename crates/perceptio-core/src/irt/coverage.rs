//! Category coverage tracking for item selection.
//!
//! A full adaptive test must show every chart type and every task type at
//! least once. [`CoverageState`] records what is still missing;
//! [`CoveragePolicy`] decides which candidates stay eligible while categories
//! remain uncovered.

use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::bank::{Item, ItemBank};
use crate::types::Category;

/// How coverage restricts the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CoveragePolicy {
    /// While any category is uncovered, only items touching an uncovered
    /// category are eligible.
    UncoveredFirst,

    /// While trials remaining exceed uncovered categories, only items forming
    /// a not-yet-used chart × task pair are eligible; once the budget is
    /// tight, only items touching an uncovered category are.
    #[default]
    NovelCombination,

    /// Pure information maximization.
    Unconstrained,
}

/// Categories not yet represented among administered items.
///
/// The uncovered set only ever shrinks as items are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageState {
    uncovered: BTreeSet<Category>,
    used_pairs: BTreeSet<(String, String)>,
}

impl CoverageState {
    /// Every category in the bank starts uncovered.
    pub fn new(bank: &ItemBank) -> Self {
        Self {
            uncovered: bank.categories(),
            used_pairs: BTreeSet::new(),
        }
    }

    /// Mark an administered item's categories as covered.
    pub fn record(&mut self, item: &Item) {
        for category in item.tags.categories() {
            self.uncovered.remove(&category);
        }
        self.used_pairs
            .insert((item.tags.chart_type.clone(), item.tags.task_type.clone()));
    }

    /// Categories still missing.
    pub fn uncovered(&self) -> &BTreeSet<Category> {
        &self.uncovered
    }

    /// Number of categories still missing.
    pub fn remaining(&self) -> usize {
        self.uncovered.len()
    }

    /// Whether every category has been seen.
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }

    /// Whether `item` would cover a missing category.
    pub fn touches_uncovered(&self, item: &Item) -> bool {
        item.tags
            .categories()
            .iter()
            .any(|category| self.uncovered.contains(category))
    }

    /// Whether `item`'s chart × task pair has already been administered.
    pub fn pair_used(&self, item: &Item) -> bool {
        self.used_pairs
            .iter()
            .any(|(chart, task)| *chart == item.tags.chart_type && *task == item.tags.task_type)
    }

    /// Whether `item` may be selected with `trials_remaining` left.
    pub fn is_eligible(&self, item: &Item, trials_remaining: usize, policy: CoveragePolicy) -> bool {
        if self.is_complete() {
            return true;
        }
        match policy {
            CoveragePolicy::Unconstrained => true,
            CoveragePolicy::UncoveredFirst => self.touches_uncovered(item),
            CoveragePolicy::NovelCombination => {
                if trials_remaining > self.remaining() {
                    !self.pair_used(item)
                } else {
                    self.touches_uncovered(item)
                }
            }
        }
    }
}
