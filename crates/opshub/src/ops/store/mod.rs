//! In-memory system of record for menus, inventory, reviews, changes, and staff.

mod memory;
mod seed;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Acknowledgement, Change, MenuItem, Review, StockStatus, User, UserRole,
};

pub use memory::InMemoryStore;
pub use seed::SeedSummary;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} '{id}' referenced but does not exist")]
    UnknownReference { entity: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Raw inventory row as stored; joined against the menu when read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: u64,
    pub item_id: String,
    pub status: StockStatus,
    #[serde(default)]
    pub notes: String,
    pub expected_back: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryUpdate {
    pub status: Option<StockStatus>,
    pub notes: Option<String>,
    pub expected_back: Option<NaiveDate>,
    #[serde(default)]
    pub clear_expected_back: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub source: String,
    pub rating: i32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewChange {
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub effective_from: Option<DateTime<Utc>>,
    pub created_by: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Full dump of the store, used by the admin export endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreExport {
    pub menus: Vec<MenuItem>,
    pub inventory: Vec<InventoryRecord>,
    pub reviews: Vec<Review>,
    pub changes: Vec<Change>,
    pub users: Vec<User>,
    pub acknowledgements: Vec<Acknowledgement>,
}
