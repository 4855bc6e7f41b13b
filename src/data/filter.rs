use std::collections::BTreeSet;

use super::model::{Category, PortfolioDataset, SnapshotRecord};

// ---------------------------------------------------------------------------
// Filter state: which categories and owners are selected
// ---------------------------------------------------------------------------

/// The state of the two filter checklists.
///
/// A record passes when both its category and its owner are selected. An
/// empty set selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub categories: BTreeSet<Category>,
    pub owners: BTreeSet<String>,
}

impl Selection {
    /// Everything present in the dataset selected (the initial UI state).
    pub fn all(dataset: &PortfolioDataset) -> Self {
        Self {
            categories: dataset.categories.clone(),
            owners: dataset.owners.clone(),
        }
    }

    pub fn new(
        categories: impl IntoIterator<Item = Category>,
        owners: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            owners: owners.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, record: &SnapshotRecord) -> bool {
        self.categories.contains(&record.category) && self.owners.contains(&record.owner)
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_owner(&mut self, owner: &str) {
        if !self.owners.remove(owner) {
            self.owners.insert(owner.to_string());
        }
    }
}

/// Iterate over the records passing `selection`.
pub fn filtered_records<'a>(
    dataset: &'a PortfolioDataset,
    selection: &'a Selection,
) -> impl Iterator<Item = &'a SnapshotRecord> + 'a {
    dataset.records.iter().filter(move |r| selection.matches(r))
}
