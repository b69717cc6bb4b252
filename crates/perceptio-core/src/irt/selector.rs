//! Fisher-information item selection.

use alloc::collections::BTreeSet;

use super::coverage::{CoveragePolicy, CoverageState};
use crate::bank::ItemBank;
use crate::types::ItemId;

/// Why no further item will be administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ExhaustionReason {
    /// The item budget has been administered.
    BudgetReached,
    /// Every item is either administered or excluded by coverage.
    NoEligibleItem,
}

/// Result of one selection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Administer this item next.
    Next {
        /// Selected item.
        item_id: ItemId,
        /// Its Fisher information at the current ability estimate.
        information: f64,
    },
    /// The test is over. Both reasons are normal terminal conditions.
    Exhausted(ExhaustionReason),
}

impl Selection {
    /// The selected item, if any.
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Selection::Next { item_id, .. } => Some(*item_id),
            Selection::Exhausted(_) => None,
        }
    }
}

/// Pick the most informative eligible item at `ability`.
///
/// Candidates are the unadministered items that the coverage policy allows
/// with `trials_remaining` left. Ties go to the item that comes first in bank
/// order.
pub fn select_next_item(
    bank: &ItemBank,
    administered: &BTreeSet<ItemId>,
    coverage: &CoverageState,
    ability: f64,
    trials_remaining: usize,
    policy: CoveragePolicy,
) -> Selection {
    if trials_remaining == 0 {
        return Selection::Exhausted(ExhaustionReason::BudgetReached);
    }

    let mut best: Option<(ItemId, f64)> = None;
    for item in bank.iter() {
        if administered.contains(&item.id) {
            continue;
        }
        if !coverage.is_eligible(item, trials_remaining, policy) {
            continue;
        }
        let information = item.information(ability);
        if information.is_nan() {
            continue;
        }
        // Strict comparison keeps the earliest item on ties
        match best {
            Some((_, best_info)) if information <= best_info => {}
            _ => best = Some((item.id, information)),
        }
    }

    match best {
        Some((item_id, information)) => Selection::Next {
            item_id,
            information,
        },
        None => Selection::Exhausted(ExhaustionReason::NoEligibleItem),
    }
}
