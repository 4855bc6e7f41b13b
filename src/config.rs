use std::path::PathBuf;

use clap::Parser;

use crate::data::error;
use crate::data::filter::Selection;
use crate::data::model::{Category, PortfolioDataset};
use crate::data::normalize::AccountCategories;

/// Portfolio Dashboard - charts and summarises portfolio snapshot files
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the `YYYYMMDD.HHMMSS*.csv` snapshot files
    #[arg(short, long, env = "PORTFOLIO_DATA_DIR", default_value = "summary")]
    pub data_dir: PathBuf,

    /// JSON file mapping account names to Cash / Property / Risk
    #[arg(short, long, env = "PORTFOLIO_ACCOUNTS")]
    pub accounts: Option<PathBuf>,

    /// Print the dashboard view as JSON instead of opening a window
    #[arg(long)]
    pub json: bool,

    /// Initially selected category (repeatable, default: all)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,

    /// Initially selected owner (repeatable, default: all)
    #[arg(long = "owner", value_name = "OWNER")]
    pub owners: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Built-in account table, plus the `--accounts` overrides if given.
    pub fn account_categories(&self) -> error::Result<AccountCategories> {
        match &self.accounts {
            Some(path) => AccountCategories::with_overrides_from(path),
            None => Ok(AccountCategories::default()),
        }
    }

    /// Selection requested on the command line. A dimension with no flags
    /// selects everything the dataset contains.
    pub fn selection(&self, dataset: &PortfolioDataset) -> Selection {
        let categories: Vec<Category> = if self.categories.is_empty() {
            dataset.categories.iter().copied().collect()
        } else {
            self.categories.clone()
        };
        let owners: Vec<String> = if self.owners.is_empty() {
            dataset.owners.iter().cloned().collect()
        } else {
            self.owners.clone()
        };
        Selection::new(categories, owners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{hour_bucket, SnapshotRecord};
    use chrono::NaiveDate;

    fn dataset() -> PortfolioDataset {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let records = [("Alice", "Monzo"), ("Bob", "Stocks")]
            .iter()
            .map(|(owner, account)| SnapshotRecord {
                owner: owner.to_string(),
                account: account.to_string(),
                usd_value: 1.0,
                timestamp: ts,
                timestamp_bucket: hour_bucket(&ts),
                category: Category::for_account(account),
            })
            .collect();
        PortfolioDataset::from_records(records, 1)
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["portfolio-dashboard", "--data-dir", "snapshots"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("snapshots"));
        assert!(cli.accounts.is_none());
        assert!(!cli.json);
        assert_eq!(cli.log_level(), "info");
        assert_eq!(cli.selection(&dataset()), Selection::all(&dataset()));
    }

    #[test]
    fn test_repeated_filters() {
        let cli = Cli::try_parse_from([
            "portfolio-dashboard",
            "-d",
            "snapshots",
            "--json",
            "--category",
            "cash",
            "--category",
            "Property",
            "--owner",
            "Bob",
            "-v",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.log_level(), "debug");
        let selection = cli.selection(&dataset());
        assert_eq!(
            selection,
            Selection::new([Category::Cash, Category::Property], ["Bob"])
        );
    }

    #[test]
    fn test_rejects_unknown_category() {
        let result = Cli::try_parse_from(["portfolio-dashboard", "-d", "x", "--category", "Bonds"]);
        assert!(result.is_err());
    }
}
