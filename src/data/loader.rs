use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::error::{LoadError, Result};
use super::model::hour_bucket;

/// Length of the `YYYYMMDD.HHMMSS` prefix every snapshot file name carries.
const TIMESTAMP_PREFIX_LEN: usize = 15;
const TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S";

pub const OWNER_COLUMN: &str = "Owner";
pub const ACCOUNT_COLUMN: &str = "Account";
pub const USD_VALUE_COLUMN: &str = "USD Value";

// ---------------------------------------------------------------------------
// Loader output
// ---------------------------------------------------------------------------

/// A row as read from a snapshot file, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub owner: String,
    pub account: String,
    pub usd_value: f64,
    pub timestamp: NaiveDateTime,
    pub timestamp_bucket: String,
}

/// Every row of one snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotBatch {
    pub source: PathBuf,
    pub timestamp: NaiveDateTime,
    pub records: Vec<RawRecord>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// List the snapshot files in `dir`, sorted by file name.
///
/// A snapshot is any regular file whose name ends in `.csv`.
pub fn find_snapshot_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "csv");
        if is_csv && entry.file_type().map_err(io_err)?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Load every snapshot file in `dir`.
///
/// Fails on the first bad file: a skipped snapshot would silently leave a
/// gap in the history.
pub fn load_snapshot_dir(dir: &Path) -> Result<Vec<SnapshotBatch>> {
    let files = find_snapshot_files(dir)?;
    if files.is_empty() {
        return Err(LoadError::NoSnapshots(dir.to_path_buf()));
    }

    files
        .iter()
        .map(|file| {
            log::debug!("Loading snapshot {}", file.display());
            load_snapshot_file(file)
        })
        .collect()
}

/// Parse the timestamp encoded in the first 15 characters of a file name.
pub fn parse_snapshot_timestamp(path: &Path) -> Result<NaiveDateTime> {
    let malformed = || LoadError::MalformedFilename {
        file: path.to_path_buf(),
    };

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(malformed)?;
    let prefix = name.get(..TIMESTAMP_PREFIX_LEN).ok_or_else(malformed)?;

    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).map_err(|_| malformed())
}

/// Load a single snapshot file.
///
/// The file name is validated before the file is opened.
pub fn load_snapshot_file(path: &Path) -> Result<SnapshotBatch> {
    let timestamp = parse_snapshot_timestamp(path)?;
    let timestamp_bucket = hour_bucket(&timestamp);

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Exporters leave trailing empty cells off short rows such as `Total`.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                file: path.to_path_buf(),
                column: name,
            })
    };
    let owner_idx = column(OWNER_COLUMN)?;
    let account_idx = column(ACCOUNT_COLUMN)?;
    let value_idx = column(USD_VALUE_COLUMN)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let raw_value = record.get(value_idx).unwrap_or("");

        records.push(RawRecord {
            owner: record.get(owner_idx).unwrap_or("").to_string(),
            account: record.get(account_idx).unwrap_or("").to_string(),
            usd_value: parse_usd_value(raw_value).ok_or_else(|| LoadError::InvalidValue {
                file: path.to_path_buf(),
                row: row_no + 1,
                value: raw_value.to_string(),
            })?,
            timestamp,
            timestamp_bucket: timestamp_bucket.clone(),
        });
    }

    Ok(SnapshotBatch {
        source: path.to_path_buf(),
        timestamp,
        records,
    })
}

/// Empty cells count as zero; anything else must be a plain number.
fn parse_usd_value(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const SNAPSHOT: &str = "Owner,Account,USD Value\n\
                            Alice,Monzo,100\n\
                            Alice,Tesla Model Y,50000\n\
                            ,Total,50100\n";

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_snapshot_timestamp() {
        let ts = parse_snapshot_timestamp(Path::new("/data/20240101.093015_summary.csv")).unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 30, 15)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_snapshot_timestamp_rejects_bad_names() {
        for name in ["badname.csv", "2024.csv", "20241301.090000.csv", "20240101-090000.csv"] {
            let err = parse_snapshot_timestamp(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, LoadError::MalformedFilename { .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn test_load_snapshot_file_attaches_timestamp_and_bucket() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "20240101.093000.csv", SNAPSHOT);

        let batch = load_snapshot_file(&path).unwrap();
        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.records[0].owner, "Alice");
        assert_eq!(batch.records[1].account, "Tesla Model Y");
        assert_eq!(batch.records[1].usd_value, 50000.0);
        assert_eq!(batch.records[2].account, "Total");
        assert!(batch.records.iter().all(|r| r.timestamp == batch.timestamp));
        assert!(batch
            .records
            .iter()
            .all(|r| r.timestamp_bucket == "202401010900"));
    }

    #[test]
    fn test_load_snapshot_file_ignores_extra_columns_and_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "20240101.090000.csv",
            "Broker, Owner , Account ,USD Value,Currency\nIBKR, Bob , Stocks , 12.5 ,GBP\nIBKR,Bob,Bonds,,GBP\n",
        );

        let batch = load_snapshot_file(&path).unwrap();
        assert_eq!(batch.records[0].owner, "Bob");
        assert_eq!(batch.records[0].account, "Stocks");
        assert_eq!(batch.records[0].usd_value, 12.5);
        assert_eq!(batch.records[1].usd_value, 0.0);
    }

    #[test]
    fn test_short_rows_read_missing_cells_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "20240101.090000.csv",
            "Owner,Account,USD Value,Note\nAlice,Monzo,100,current\nBob,Stocks\n,Total,100\n",
        );

        let batch = load_snapshot_file(&path).unwrap();
        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.records[0].usd_value, 100.0);
        assert_eq!(batch.records[1].owner, "Bob");
        assert_eq!(batch.records[1].usd_value, 0.0);
        assert_eq!(batch.records[2].account, "Total");
        assert_eq!(batch.records[2].usd_value, 100.0);
    }

    #[test]
    fn test_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "20240101.090000.csv", "Owner,Account\nAlice,Monzo\n");

        match load_snapshot_file(&path).unwrap_err() {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "USD Value"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "20240101.090000.csv",
            "Owner,Account,USD Value\nAlice,Monzo,100\nAlice,Stocks,lots\n",
        );

        match load_snapshot_file(&path).unwrap_err() {
            LoadError::InvalidValue { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_snapshot_dir_sorted_and_csv_only() {
        let dir = TempDir::new().unwrap();
        write(&dir, "20240101.100000.csv", SNAPSHOT);
        write(&dir, "20240101.090000.csv", SNAPSHOT);
        write(&dir, "20240101.080000.CSV", SNAPSHOT);
        write(&dir, "notes.txt", "not a snapshot");
        fs::create_dir(dir.path().join("archive.csv")).unwrap();

        let batches = load_snapshot_dir(dir.path()).unwrap();
        assert_eq!(batches.len(), 2);
        assert!(batches[0].timestamp < batches[1].timestamp);
    }

    #[test]
    fn test_load_snapshot_dir_rejects_bad_name() {
        let dir = TempDir::new().unwrap();
        write(&dir, "20240101.090000.csv", SNAPSHOT);
        write(&dir, "badname.csv", SNAPSHOT);

        let err = load_snapshot_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::MalformedFilename { ref file } if file.ends_with("badname.csv")));
    }

    #[test]
    fn test_load_snapshot_dir_empty_and_missing() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_snapshot_dir(dir.path()).unwrap_err(),
            LoadError::NoSnapshots(_)
        ));
        assert!(matches!(
            load_snapshot_dir(&dir.path().join("nope")).unwrap_err(),
            LoadError::Io { .. }
        ));
    }
}
