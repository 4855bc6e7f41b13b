/// Data layer: core types, loading, normalization, filtering and aggregation.
///
/// Architecture:
/// ```text
///  <dir>/YYYYMMDD.HHMMSS*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file name + rows → SnapshotBatch per file
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  concat, drop "Total" rows, tag Category
///   └───────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ PortfolioDataset  │  immutable, shared via Arc
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌────────────┐
///   │  filter   │ ──▶ │ aggregate   │  Selection → DashboardView
///   └──────────┘     └────────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
