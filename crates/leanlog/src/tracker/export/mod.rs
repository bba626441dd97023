//! File formats for moving the tracker's state in and out: a flat CSV of
//! the saved days and a versioned JSON backup of everything.

pub mod backup;
pub mod tabular;

pub use backup::{BackupDocument, RestorePlan, BACKUP_VERSION};
pub use tabular::{read_entries, write_entries, CSV_HEADER};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid file: {0}")]
    InvalidBackup(String),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode backup: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
