use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account name used by the snapshot exporter for its own summary rows, and
/// the label of the synthetic row appended to every summary.
pub const TOTAL_MARKER: &str = "Total";

// ---------------------------------------------------------------------------
// Category – derived classification of an account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Cash,
    Property,
    Risk,
}

/// Built-in account → category table. Anything not listed is `Risk`.
pub const DEFAULT_ACCOUNT_CATEGORIES: &[(&str, Category)] = &[
    ("HSBC Credit", Category::Cash),
    ("NatWest", Category::Cash),
    ("Monzo", Category::Cash),
    ("HSBC USD", Category::Cash),
    ("HSBC HKD", Category::Cash),
    ("HSBC Savings", Category::Cash),
    ("HSBC GBP", Category::Cash),
    ("BA Amex", Category::Cash),
    ("John Lewis", Category::Cash),
    ("35B Lancaster Rd", Category::Property),
    ("Tesla Model Y", Category::Property),
];

impl Category {
    pub const ALL: [Category; 3] = [Category::Cash, Category::Property, Category::Risk];

    /// Classify an account using the built-in table.
    pub fn for_account(account: &str) -> Category {
        DEFAULT_ACCOUNT_CATEGORIES
            .iter()
            .find(|(name, _)| *name == account)
            .map(|(_, category)| *category)
            .unwrap_or(Category::Risk)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cash => "Cash",
            Category::Property => "Property",
            Category::Risk => "Risk",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}' (expected Cash, Property or Risk)"))
    }
}

// ---------------------------------------------------------------------------
// SnapshotRecord – one normalized row
// ---------------------------------------------------------------------------

/// A single holding observed in one snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRecord {
    pub owner: String,
    pub account: String,
    pub usd_value: f64,
    /// Parsed from the source file name, not from row content.
    pub timestamp: NaiveDateTime,
    /// `timestamp` truncated to the hour, formatted `%Y%m%d%H00`.
    pub timestamp_bucket: String,
    pub category: Category,
}

/// Sortable hour-level key for a snapshot timestamp.
pub fn hour_bucket(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y%m%d%H00").to_string()
}

// ---------------------------------------------------------------------------
// PortfolioDataset – the complete loaded snapshot set
// ---------------------------------------------------------------------------

/// Every normalized record from every snapshot file, plus the distinct
/// values the filter controls are built from.
///
/// Built once and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PortfolioDataset {
    pub records: Vec<SnapshotRecord>,
    pub owners: BTreeSet<String>,
    pub categories: BTreeSet<Category>,
    /// Number of snapshot files the records came from.
    pub snapshot_count: usize,
}

impl PortfolioDataset {
    pub fn from_records(records: Vec<SnapshotRecord>, snapshot_count: usize) -> Self {
        let owners = records.iter().map(|r| r.owner.clone()).collect();
        let categories = records.iter().map(|r| r.category).collect();
        PortfolioDataset {
            records,
            owners,
            categories,
            snapshot_count,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent snapshot timestamp across all records, ignoring filters.
    pub fn latest_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).max()
    }
}

// ---------------------------------------------------------------------------
// Aggregator outputs
// ---------------------------------------------------------------------------

/// Summed value of the selected holdings at one snapshot timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: NaiveDateTime,
    pub usd_value: f64,
}

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SummaryRecord")]
pub enum SummaryRow {
    Holding {
        owner: String,
        category: Category,
        account: String,
        usd_value: f64,
    },
    /// Synthetic grand total, always the last row.
    Total { usd_value: f64 },
}

impl SummaryRow {
    pub fn owner(&self) -> &str {
        match self {
            SummaryRow::Holding { owner, .. } => owner,
            SummaryRow::Total { .. } => TOTAL_MARKER,
        }
    }

    pub fn category_label(&self) -> &str {
        match self {
            SummaryRow::Holding { category, .. } => category.as_str(),
            SummaryRow::Total { .. } => TOTAL_MARKER,
        }
    }

    pub fn account(&self) -> &str {
        match self {
            SummaryRow::Holding { account, .. } => account,
            SummaryRow::Total { .. } => TOTAL_MARKER,
        }
    }

    pub fn usd_value(&self) -> f64 {
        match self {
            SummaryRow::Holding { usd_value, .. } | SummaryRow::Total { usd_value } => *usd_value,
        }
    }

    pub fn is_total(&self) -> bool {
        matches!(self, SummaryRow::Total { .. })
    }
}

/// Flat serialized form, keyed by the dashboard's column names.
#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "Owner")]
    owner: String,
    #[serde(rename = "Type")]
    category: String,
    #[serde(rename = "Account")]
    account: String,
    #[serde(rename = "USD Value")]
    usd_value: f64,
}

impl From<SummaryRow> for SummaryRecord {
    fn from(row: SummaryRow) -> Self {
        SummaryRecord {
            owner: row.owner().to_string(),
            category: row.category_label().to_string(),
            account: row.account().to_string(),
            usd_value: row.usd_value(),
        }
    }
}
