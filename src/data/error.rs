use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a snapshot directory into a dataset.
///
/// All of them are fatal at startup. During an interactive reload they are
/// shown in the status bar and the previous dataset stays in place.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file name does not start with a `YYYYMMDD.HHMMSS` timestamp.
    #[error("Malformed snapshot file name {file:?}: expected a 'YYYYMMDD.HHMMSS' prefix")]
    MalformedFilename { file: PathBuf },

    /// A required header is absent from a snapshot file.
    #[error("{}: missing required column '{column}'", file.display())]
    MissingColumn { file: PathBuf, column: &'static str },

    /// A `USD Value` cell could not be parsed as a number.
    #[error("{}, row {row}: '{value}' is not a valid USD value", file.display())]
    InvalidValue {
        file: PathBuf,
        row: usize,
        value: String,
    },

    /// The directory holds no `.csv` snapshot files.
    #[error("No snapshot files found in {}", .0.display())]
    NoSnapshots(PathBuf),

    /// A directory or file could not be listed or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file is not well-formed delimited text.
    #[error("Failed to parse CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The account category override file is unreadable or not valid JSON.
    #[error("Invalid account category file {}: {source}", path.display())]
    AccountFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
