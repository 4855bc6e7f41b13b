use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::aggregate::{build_view, DashboardView};
use crate::data::filter::Selection;
use crate::data::model::{Category, PortfolioDataset, SummaryRow};
use crate::data::normalize::{load_portfolio, AccountCategories};

/// One of the two filter checklists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Category,
    Owner,
}

/// Summary table column a user can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Owner,
    Type,
    Account,
    UsdValue,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Owner,
        SortColumn::Type,
        SortColumn::Account,
        SortColumn::UsdValue,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SortColumn::Owner => "Owner",
            SortColumn::Type => "Type",
            SortColumn::Account => "Account",
            SortColumn::UsdValue => "USD Value",
        }
    }
}

/// Header-click sort of the summary table. Only one column sorts at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub column: SortColumn,
    pub ascending: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded snapshot set. Replaced wholesale on reload, never mutated.
    pub dataset: Arc<PortfolioDataset>,

    /// Directory the dataset was loaded from.
    pub data_dir: PathBuf,

    accounts: AccountCategories,

    /// Current checklist selections.
    pub selection: Selection,

    /// View model for `selection` (cached until the next filter change).
    pub view: DashboardView,

    pub category_colors: CategoryColors,

    /// `None` shows the summary in its computed order.
    pub table_sort: Option<TableSort>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        dataset: Arc<PortfolioDataset>,
        selection: Selection,
        data_dir: PathBuf,
        accounts: AccountCategories,
    ) -> Self {
        let view = build_view(&dataset, &selection);
        let category_colors = CategoryColors::new(&dataset.categories);
        Self {
            dataset,
            data_dir,
            accounts,
            selection,
            view,
            category_colors,
            table_sort: None,
            status_message: None,
        }
    }

    /// Swap in a freshly loaded dataset with everything selected.
    pub fn set_dataset(&mut self, dataset: PortfolioDataset, data_dir: PathBuf) {
        self.selection = Selection::all(&dataset);
        self.category_colors = CategoryColors::new(&dataset.categories);
        self.dataset = Arc::new(dataset);
        self.data_dir = data_dir;
        self.status_message = None;
        self.refresh();
    }

    /// Load `dir`. On failure the current dataset stays and the error is
    /// shown in the status bar.
    pub fn load_dir(&mut self, dir: &Path) {
        match load_portfolio(dir, &self.accounts) {
            Ok(dataset) => self.set_dataset(dataset, dir.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load {}: {e}", dir.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn reload(&mut self) {
        let dir = self.data_dir.clone();
        self.load_dir(&dir);
    }

    /// Recompute the view after a selection change.
    pub fn refresh(&mut self) {
        self.view = build_view(&self.dataset, &self.selection);
    }

    /// First click on a column sorts ascending, the next one flips it.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.table_sort = match self.table_sort {
            Some(sort) if sort.column == column => Some(TableSort {
                column,
                ascending: !sort.ascending,
            }),
            _ => Some(TableSort {
                column,
                ascending: true,
            }),
        };
    }

    /// Summary rows in display order. Holdings follow `table_sort`; the
    /// total row stays last.
    pub fn sorted_summary(&self) -> Vec<&SummaryRow> {
        let (mut holdings, totals): (Vec<&SummaryRow>, Vec<&SummaryRow>) =
            self.view.summary.iter().partition(|row| !row.is_total());

        if let Some(sort) = self.table_sort {
            holdings.sort_by(|a, b| {
                let ord = match sort.column {
                    SortColumn::Owner => a.owner().cmp(b.owner()),
                    SortColumn::Type => a.category_label().cmp(b.category_label()),
                    SortColumn::Account => a.account().cmp(b.account()),
                    SortColumn::UsdValue => a.usd_value().total_cmp(&b.usd_value()),
                };
                if sort.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        holdings.extend(totals);
        holdings
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.selection.toggle_category(category);
        self.refresh();
    }

    pub fn toggle_owner(&mut self, owner: &str) {
        self.selection.toggle_owner(owner);
        self.refresh();
    }

    pub fn select_all(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Category => self.selection.categories = self.dataset.categories.clone(),
            FilterKind::Owner => self.selection.owners = self.dataset.owners.clone(),
        }
        self.refresh();
    }

    pub fn select_none(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Category => self.selection.categories.clear(),
            FilterKind::Owner => self.selection.owners.clear(),
        }
        self.refresh();
    }
}
