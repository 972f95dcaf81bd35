//! Data-source ports and the adapters that satisfy them.
//!
//! Each capability is a single-method trait so real integrations (POS exports, review
//! platforms) can replace the mock data without touching the handlers or the brief compiler.

mod inbox;
mod mock;
mod registry;

use chrono::{DateTime, Utc};

use super::domain::{InventoryItem, Review};

pub use inbox::CsvInventoryAdapter;
pub use mock::{MockInventoryAdapter, MockReviewsAdapter};
pub use registry::{AdapterFlag, AdapterRegistry};

/// Supplies the current inventory snapshot.
pub trait InventorySource: Send + Sync {
    fn fetch_current(&self) -> Result<Vec<InventoryItem>, SourceError>;
}

/// Supplies reviews created at or after `cutoff`.
pub trait ReviewSource: Send + Sync {
    fn fetch_recent(&self, cutoff: DateTime<Utc>) -> Result<Vec<Review>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read inventory inbox: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid inventory CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid inventory row {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}
