use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown wherever an inventory row points at a menu entry that no longer exists.
pub const UNKNOWN_ITEM_LABEL: &str = "Unknown Item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    Ok,
    Low,
    EightySix,
}

impl StockStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::EightySix, Self::Low, Self::Ok]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Low => "low",
            Self::EightySix => "86",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "In Stock",
            Self::Low => "Low Stock",
            Self::EightySix => "86'd",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stock status '{0}' (expected ok, low, or 86)")]
pub struct UnknownStockStatus(pub String);

impl FromStr for StockStatus {
    type Err = UnknownStockStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "low" => Ok(Self::Low),
            "86" | "86'd" | "eighty_six" | "eighty-six" => Ok(Self::EightySix),
            _ => Err(UnknownStockStatus(value.to_string())),
        }
    }
}

impl Serialize for StockStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StockStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Manager,
    Staff,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub price_cents: Option<u32>,
    #[serde(default)]
    pub allergy_flags: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Inventory row joined against the menu. `name` is `None` when the menu reference is dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u64,
    pub item_id: String,
    pub name: Option<String>,
    pub status: StockStatus,
    pub expected_back: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_ITEM_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    pub source: String,
    pub rating: i32,
    #[serde(default)]
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub change_id: String,
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub effective_from: DateTime<Utc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub ack_id: String,
    pub user_id: String,
    pub change_id: String,
    pub acknowledged_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_status_uses_wire_values() {
        assert_eq!(
            serde_json::to_string(&StockStatus::EightySix).expect("serialize"),
            "\"86\""
        );
        let parsed: StockStatus = serde_json::from_str("\"eighty-six\"").expect("deserialize");
        assert_eq!(parsed, StockStatus::EightySix);
        assert!(serde_json::from_str::<StockStatus>("\"plenty\"").is_err());
    }

    #[test]
    fn missing_menu_reference_falls_back_to_placeholder() {
        let item = InventoryItem {
            id: 1,
            item_id: "ghost".to_string(),
            name: None,
            status: StockStatus::EightySix,
            expected_back: None,
            notes: String::new(),
            updated_at: Utc::now(),
        };

        assert_eq!(item.display_name(), UNKNOWN_ITEM_LABEL);
    }
}
