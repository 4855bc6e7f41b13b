use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::filter::{filtered_records, Selection};
use super::model::{Category, PortfolioDataset, SeriesPoint, SummaryRow};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub series: Vec<SeriesPoint>,
    pub summary: Vec<SummaryRow>,
    /// Latest snapshot across the whole dataset, independent of the filter.
    pub latest_timestamp: Option<NaiveDateTime>,
}

/// Recompute the whole view for a selection. Called on every filter change.
pub fn build_view(dataset: &PortfolioDataset, selection: &Selection) -> DashboardView {
    DashboardView {
        series: compute_series(dataset, selection),
        summary: compute_summary(dataset, selection),
        latest_timestamp: dataset.latest_timestamp(),
    }
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// Sum of the selected holdings per snapshot timestamp, oldest first.
pub fn compute_series(dataset: &PortfolioDataset, selection: &Selection) -> Vec<SeriesPoint> {
    let mut by_timestamp: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();
    for record in filtered_records(dataset, selection) {
        *by_timestamp.entry(record.timestamp).or_default() += record.usd_value;
    }

    by_timestamp
        .into_iter()
        .map(|(timestamp, usd_value)| SeriesPoint {
            timestamp,
            usd_value,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Latest-snapshot summary
// ---------------------------------------------------------------------------

/// Per-holding values at the latest selected hour bucket, smallest first,
/// followed by a single `Total` row.
///
/// With nothing selected the result is just a zero `Total` row.
pub fn compute_summary(dataset: &PortfolioDataset, selection: &Selection) -> Vec<SummaryRow> {
    let latest_bucket = filtered_records(dataset, selection)
        .map(|r| r.timestamp_bucket.as_str())
        .max();

    let mut groups: BTreeMap<(&str, Category, &str), f64> = BTreeMap::new();
    if let Some(latest_bucket) = latest_bucket {
        for record in filtered_records(dataset, selection)
            .filter(|r| r.timestamp_bucket == latest_bucket)
        {
            *groups
                .entry((record.owner.as_str(), record.category, record.account.as_str()))
                .or_default() += record.usd_value;
        }
    }

    let mut rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|((owner, category, account), usd_value)| SummaryRow::Holding {
            owner: owner.to_string(),
            category,
            account: account.to_string(),
            usd_value,
        })
        .collect();

    // Stable, so equal values keep (owner, category, account) order.
    rows.sort_by(|a, b| a.usd_value().total_cmp(&b.usd_value()));

    let total = rows.iter().map(SummaryRow::usd_value).sum();
    rows.push(SummaryRow::Total { usd_value: total });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_snapshot_dir;
    use crate::data::model::{hour_bucket, SnapshotRecord};
    use crate::data::normalize::{normalize, AccountCategories};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(owner: &str, account: &str, usd_value: f64, timestamp: NaiveDateTime) -> SnapshotRecord {
        SnapshotRecord {
            owner: owner.to_string(),
            account: account.to_string(),
            usd_value,
            timestamp,
            timestamp_bucket: hour_bucket(&timestamp),
            category: Category::for_account(account),
        }
    }

    fn holding(owner: &str, category: Category, account: &str, usd_value: f64) -> SummaryRow {
        SummaryRow::Holding {
            owner: owner.to_string(),
            category,
            account: account.to_string(),
            usd_value,
        }
    }

    fn sample() -> PortfolioDataset {
        PortfolioDataset::from_records(
            vec![
                record("Alice", "Monzo", 100.0, at(1, 9, 0)),
                record("Alice", "Stocks", 900.0, at(1, 9, 0)),
                record("Bob", "Stocks", 50.0, at(1, 9, 0)),
                record("Alice", "Monzo", 120.0, at(2, 9, 0)),
                record("Alice", "Stocks", -300.0, at(2, 9, 0)),
                record("Bob", "Stocks", 75.0, at(2, 9, 0)),
                // A second export inside the same hour folds into the bucket.
                record("Bob", "Stocks", 25.0, at(2, 9, 30)),
            ],
            3,
        )
    }

    #[test]
    fn test_scenario_two_snapshots_with_total_rows() {
        let dir = TempDir::new().unwrap();
        let contents = "Owner,Account,USD Value\n\
                        Alice,Monzo,100\n\
                        Alice,Tesla Model Y,50000\n\
                        Total,Total,50100\n";
        fs::write(dir.path().join("20240101.090000.csv"), contents).unwrap();
        fs::write(dir.path().join("20240101.100000.csv"), contents).unwrap();

        let ds = normalize(
            load_snapshot_dir(dir.path()).unwrap(),
            &AccountCategories::default(),
        );
        let summary = compute_summary(&ds, &Selection::all(&ds));

        assert_eq!(
            summary,
            vec![
                holding("Alice", Category::Cash, "Monzo", 100.0),
                holding("Alice", Category::Property, "Tesla Model Y", 50000.0),
                SummaryRow::Total { usd_value: 50100.0 },
            ]
        );

        let series = compute_series(&ds, &Selection::all(&ds));
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|p| p.usd_value == 50100.0));
    }

    #[test]
    fn test_series_sums_per_timestamp_in_order() {
        let ds = sample();
        let series = compute_series(&ds, &Selection::all(&ds));

        assert_eq!(
            series,
            vec![
                SeriesPoint { timestamp: at(1, 9, 0), usd_value: 1050.0 },
                SeriesPoint { timestamp: at(2, 9, 0), usd_value: -105.0 },
                SeriesPoint { timestamp: at(2, 9, 30), usd_value: 25.0 },
            ]
        );
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_summary_uses_latest_bucket_and_puts_total_last() {
        let ds = sample();
        let summary = compute_summary(&ds, &Selection::all(&ds));

        assert_eq!(
            summary,
            vec![
                holding("Alice", Category::Risk, "Stocks", -300.0),
                holding("Bob", Category::Risk, "Stocks", 100.0),
                holding("Alice", Category::Cash, "Monzo", 120.0),
                SummaryRow::Total { usd_value: -80.0 },
            ]
        );
    }

    #[test]
    fn test_total_row_last_even_when_smallest() {
        let ds = PortfolioDataset::from_records(
            vec![
                record("Alice", "BA Amex", -500.0, at(1, 9, 0)),
                record("Alice", "HSBC Credit", -200.0, at(1, 9, 0)),
            ],
            1,
        );
        let summary = compute_summary(&ds, &Selection::all(&ds));

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].account(), "BA Amex");
        let last = summary.last().unwrap();
        assert!(last.is_total());
        assert_eq!(last.usd_value(), -700.0);
    }

    #[test]
    fn test_summary_latest_bucket_follows_filter() {
        let ds = PortfolioDataset::from_records(
            vec![
                record("Alice", "Monzo", 10.0, at(1, 9, 0)),
                record("Bob", "Monzo", 20.0, at(2, 9, 0)),
            ],
            2,
        );
        let summary = compute_summary(&ds, &Selection::new(Category::ALL, ["Alice"]));
        assert_eq!(
            summary,
            vec![
                holding("Alice", Category::Cash, "Monzo", 10.0),
                SummaryRow::Total { usd_value: 10.0 },
            ]
        );
    }

    #[test]
    fn test_total_equals_sum_for_every_selection() {
        let ds = sample();
        let owner_sets: [&[&str]; 4] = [&[], &["Alice"], &["Bob"], &["Alice", "Bob"]];
        for mask in 0..8u8 {
            let categories = Category::ALL
                .into_iter()
                .enumerate()
                .filter(|&(i, _)| mask & (1u8 << i) != 0)
                .map(|(_, c)| c);
            for owners in owner_sets {
                let selection = Selection::new(categories.clone(), owners.iter().copied());
                let summary = compute_summary(&ds, &selection);
                let (total, holdings) = summary.split_last().unwrap();
                assert!(total.is_total());
                assert!(holdings.iter().all(|r| !r.is_total()));
                let sum: f64 = holdings.iter().map(SummaryRow::usd_value).sum();
                assert!((total.usd_value() - sum).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_empty_selection_degrades_gracefully() {
        let ds = sample();
        let mut selection = Selection::all(&ds);
        selection.categories.clear();

        assert!(compute_series(&ds, &selection).is_empty());
        assert_eq!(
            compute_summary(&ds, &selection),
            vec![SummaryRow::Total { usd_value: 0.0 }]
        );
    }

    #[test]
    fn test_build_view_latest_timestamp_ignores_filter() {
        let ds = sample();
        let view = build_view(&ds, &Selection::new([Category::Cash], ["Alice"]));

        assert_eq!(view.latest_timestamp, Some(at(2, 9, 30)));
        assert_eq!(view.series.len(), 2);
        assert_eq!(view.summary.len(), 2);
    }
}
