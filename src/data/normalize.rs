use std::collections::BTreeMap;
use std::path::Path;

use super::error::{LoadError, Result};
use super::loader::{self, SnapshotBatch};
use super::model::{Category, PortfolioDataset, SnapshotRecord, TOTAL_MARKER};

// ---------------------------------------------------------------------------
// Account → category lookup
// ---------------------------------------------------------------------------

/// Account → category lookup: optional overrides on top of the built-in
/// table in [`Category::for_account`]. Unknown accounts are `Risk`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountCategories {
    overrides: BTreeMap<String, Category>,
}

impl AccountCategories {
    /// Built-in table extended with the entries of a JSON object file,
    /// e.g. `{"Starling": "Cash", "Monzo": "Risk"}`. File entries win.
    pub fn with_overrides_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: BTreeMap<String, Category> =
            serde_json::from_str(&text).map_err(|source| LoadError::AccountFile {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!(
            "Loaded {} account category overrides from {}",
            overrides.len(),
            path.display()
        );

        Ok(Self { overrides })
    }

    pub fn category_for(&self, account: &str) -> Category {
        self.overrides
            .get(account)
            .copied()
            .unwrap_or_else(|| Category::for_account(account))
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Merge per-file batches into one dataset.
///
/// Rows whose account is the exporter's `Total` marker are dropped so they
/// are not counted twice; every remaining row is tagged with its category.
pub fn normalize(batches: Vec<SnapshotBatch>, accounts: &AccountCategories) -> PortfolioDataset {
    let snapshot_count = batches.len();
    let mut dropped = 0usize;

    let records: Vec<SnapshotRecord> = batches
        .into_iter()
        .flat_map(|batch| {
            log::debug!(
                "{}: {} rows at {}",
                batch.source.display(),
                batch.records.len(),
                batch.timestamp
            );
            batch.records
        })
        .filter(|raw| {
            let is_total = raw.account == TOTAL_MARKER;
            dropped += usize::from(is_total);
            !is_total
        })
        .map(|raw| SnapshotRecord {
            category: accounts.category_for(&raw.account),
            owner: raw.owner,
            account: raw.account,
            usd_value: raw.usd_value,
            timestamp: raw.timestamp,
            timestamp_bucket: raw.timestamp_bucket,
        })
        .collect();

    log::debug!("Dropped {dropped} pre-existing total rows");
    PortfolioDataset::from_records(records, snapshot_count)
}

/// Load and normalize a snapshot directory in one step.
pub fn load_portfolio(dir: &Path, accounts: &AccountCategories) -> Result<PortfolioDataset> {
    let batches = loader::load_snapshot_dir(dir)?;
    let dataset = normalize(batches, accounts);

    log::info!(
        "Loaded {} records from {} snapshots in {} ({} owners)",
        dataset.len(),
        dataset.snapshot_count,
        dir.display(),
        dataset.owners.len()
    );
    Ok(dataset)
}
