//! Calibrated item bank.
//!
//! Each item carries 2PL parameters and the chart/task it exercises. The bank
//! is read-only after construction and can be shared across sessions.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use crate::irt::model;
use crate::types::{Category, CategoryTags, ItemId};

/// A raw bank row: `(id, a, b, chart_type, task_type)`.
pub type BankRow<'a> = (ItemId, f64, f64, &'a str, &'a str);

/// A calibrated test item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Item identifier, also the question index shown to the stimulus.
    pub id: ItemId,
    /// Discrimination `a` (> 0).
    pub discrimination: f64,
    /// Difficulty `b`, entering the logit as `a * (theta + b)`.
    pub difficulty: f64,
    /// Chart and task labels.
    pub tags: CategoryTags,
}

impl Item {
    /// Build an item from a raw row without validation.
    pub fn from_row(row: &BankRow<'_>) -> Self {
        let (id, a, b, chart, task) = *row;
        Self {
            id,
            discrimination: a,
            difficulty: b,
            tags: CategoryTags::new(chart, task),
        }
    }

    /// P(correct | theta).
    #[inline]
    pub fn p_correct(&self, theta: f64) -> f64 {
        model::p_correct(self.discrimination, self.difficulty, theta)
    }

    /// Likelihood of the observed response at `theta`.
    #[inline]
    pub fn likelihood(&self, theta: f64, correct: bool) -> f64 {
        model::likelihood(self.discrimination, self.difficulty, theta, correct)
    }

    /// Fisher information at `theta`.
    #[inline]
    pub fn information(&self, theta: f64) -> f64 {
        model::fisher_information(self.discrimination, self.difficulty, theta)
    }

    fn validate(&self) -> Result<(), BankError> {
        if !self.discrimination.is_finite() || self.discrimination <= 0.0 {
            return Err(BankError::InvalidDiscrimination {
                id: self.id,
                value: self.discrimination,
            });
        }
        if !self.difficulty.is_finite() {
            return Err(BankError::InvalidDifficulty {
                id: self.id,
                value: self.difficulty,
            });
        }
        Ok(())
    }
}

/// Error returned when a bank fails validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BankError {
    /// The bank has no items.
    Empty,
    /// Two rows share an id.
    DuplicateId(ItemId),
    /// Discrimination is not a positive finite number.
    InvalidDiscrimination {
        /// Offending item.
        id: ItemId,
        /// Offending value.
        value: f64,
    },
    /// Difficulty is not finite.
    InvalidDifficulty {
        /// Offending item.
        id: ItemId,
        /// Offending value.
        value: f64,
    },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "item bank is empty"),
            Self::DuplicateId(id) => write!(f, "item id {} appears more than once", id),
            Self::InvalidDiscrimination { id, value } => write!(
                f,
                "item {} has discrimination {} (must be finite and > 0)",
                id, value
            ),
            Self::InvalidDifficulty { id, value } => {
                write!(f, "item {} has non-finite difficulty {}", id, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BankError {}

/// Ordered, read-only table of calibrated items.
///
/// Bank order is significant: it breaks ties during item selection.
#[derive(Debug, Clone)]
pub struct ItemBank {
    items: Vec<Item>,
    index: BTreeMap<ItemId, usize>,
}

impl ItemBank {
    /// The built-in visualization literacy bank (53 items).
    pub fn vlat() -> Self {
        Self::build(VLAT_ROWS.iter().map(Item::from_row).collect())
    }

    /// Build a bank from raw rows, validating every item.
    pub fn from_rows(rows: &[BankRow<'_>]) -> Result<Self, BankError> {
        Self::from_items(rows.iter().map(Item::from_row).collect())
    }

    /// Build a bank from items, validating every item.
    pub fn from_items(items: Vec<Item>) -> Result<Self, BankError> {
        if items.is_empty() {
            return Err(BankError::Empty);
        }
        let mut seen = BTreeSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id) {
                return Err(BankError::DuplicateId(item.id));
            }
        }
        Ok(Self::build(items))
    }

    fn build(items: Vec<Item>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
        Self { items, index }
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    /// Whether the bank holds `id`.
    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Items in bank order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bank is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every chart and task category present in the bank.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.items
            .iter()
            .flat_map(|item| item.tags.categories())
            .collect()
    }
}

impl Default for ItemBank {
    fn default() -> Self {
        Self::vlat()
    }
}

/// Calibrated rows of the adaptive visualization literacy test.
///
/// Columns: id, discrimination `a`, difficulty `b`, chart type, task type.
pub const VLAT_ROWS: [BankRow<'static>; 53] = [
    (1, 1.27221185, 2.8483115, "Line", "RV"),
    (2, 1.499349129, 3.040871, "Line", "FE"),
    (3, 1.374537045, 0.25584395, "Line", "DR"),
    (4, 1.468088919, 3.4258115, "Line", "FCT"),
    (5, 1.137137131, 1.3189766, "Line", "MC"),
    (6, 1.087065104, 2.2163635, "Bar", "RV"),
    (7, 1.370983684, 3.3441315, "Bar", "FE"),
    (8, 1.072558537, 0.1907385, "Bar", "DR"),
    (9, 0.565435838, -0.766119, "Bar", "MC"),
    (10, 1.308078217, -0.483896, "Stacked", "RV"),
    (11, 0.748876272, -0.878004, "Stacked", "RV"),
    (12, 0.892274374, 1.011948, "Stacked", "FE"),
    (14, 0.864483077, 0.498654, "Stacked", "MC"),
    (15, 0.63115109, -0.2163795, "Stacked", "MC"),
    (16, 1.061661146, -0.021748, "100%", "RV"),
    (17, 1.260906618, 2.1735685, "100%", "FE"),
    (18, 1.006552927, 0.1964695, "100%", "MC"),
    (19, 0.952170323, 1.1781005, "Pie", "RV"),
    (20, 1.266495326, 3.4990835, "Pie", "FE"),
    (21, 1.955349598, 4.577599, "Pie", "MC"),
    (22, 1.103396903, 1.8068275, "Histogram", "RV"),
    (23, 1.162700946, 2.825006, "Histogram", "FE"),
    (25, 0.945254699, 2.1723395, "Histogram", "MC"),
    (27, 1.128140859, 1.85473395, "Scatterplot", "RV"),
    (28, 1.183203925, 1.226966, "Scatterplot", "FE"),
    (29, 0.910403565, 0.184373, "Scatterplot", "DR"),
    (31, 0.598194995, -0.568358, "Scatterplot", "FA"),
    (32, 1.293432284, 2.1477415, "Scatterplot", "FC"),
    (33, 1.159459154, 0.093807, "Scatterplot", "FCT"),
    (34, 0.805688047, 1.818106, "Scatterplot", "MC"),
    (35, 0.964108248, 1.3666385, "Area", "RV"),
    (36, 0.596634966, -0.4578085, "Area", "FE"),
    (37, 0.576156905, -0.945452, "Area", "DR"),
    (38, 1.352297435, 2.5183945, "Area", "FCT"),
    (40, 0.727247878, -2.567331, "Stacked Area", "RV"),
    (41, 0.721289353, -1.6333105, "Stacked Area", "RV"),
    (42, 1.39970206, 3.0243125, "Stacked Area", "FE"),
    (44, 1.391714903, 2.808996, "Stacked Area", "FCT"),
    (45, 0.485882721, -2.898462, "Stacked Area", "MC"),
    (46, 0.564928587, -2.1752885, "Stacked Area", "MC"),
    (47, 0.741666943, -0.5241995, "Bubble", "RV"),
    (48, 0.89755236, 1.0380654, "Bubble", "FE"),
    (49, 0.851390316, -1.1506875, "Bubble", "DR"),
    (51, 0.576817469, 0.210506, "Bubble", "FA"),
    (52, 0.993160348, 0.455853, "Bubble", "FC"),
    (53, 0.431845454, -2.5113305, "Bubble", "FCT"),
    (54, 1.154025598, 1.4998025, "Bubble", "MC"),
    (55, 0.367490725, -3.2260095, "Map", "RV"),
    (56, 1.401881342, 3.1477645, "Map", "FE"),
    (57, 1.101469613, 2.6187185, "Map", "MC"),
    (59, 0.949041643, 0.9082805, "Tree", "FE"),
    (60, 0.671887408, -0.5345505, "Tree", "MC"),
    (61, 1.109762274, 2.5394745, "Tree", "ID"),
];
