use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::compiler::Brief;
use crate::ops::domain::{Change, InventoryItem, Review, StockStatus};

pub const NO_NOTES: &str = "No notes";
pub const NO_TEXT: &str = "No text";
pub const NO_DETAILS: &str = "No details";
pub const STAR_SCALE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntryView {
    pub id: u64,
    pub item_id: String,
    pub name: String,
    pub menu_item_missing: bool,
    pub status: StockStatus,
    pub status_label: String,
    pub notes: String,
    pub expected_back: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntryView {
    pub review_id: String,
    pub source: String,
    pub rating: i32,
    pub stars: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub theme: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntryView {
    pub change_id: String,
    pub title: String,
    pub detail: String,
    pub effective_from: DateTime<Utc>,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Serializable form of a [`Brief`], with placeholders already substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefView {
    pub date: NaiveDate,
    pub eighty_six_items: Vec<InventoryEntryView>,
    pub low_stock_items: Vec<InventoryEntryView>,
    pub recent_reviews: Vec<ReviewEntryView>,
    pub changes: Vec<ChangeEntryView>,
    pub generated_at: DateTime<Utc>,
}

impl Brief {
    pub fn view(&self) -> BriefView {
        BriefView {
            date: self.date,
            eighty_six_items: self.eighty_sixed.iter().map(InventoryEntryView::from).collect(),
            low_stock_items: self.low_stock.iter().map(InventoryEntryView::from).collect(),
            recent_reviews: self.recent_reviews.iter().map(ReviewEntryView::from).collect(),
            changes: self.changes.iter().map(ChangeEntryView::from).collect(),
            generated_at: self.generated_at,
        }
    }
}

impl From<&InventoryItem> for InventoryEntryView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id,
            item_id: item.item_id.clone(),
            name: item.display_name().to_string(),
            menu_item_missing: item.name.is_none(),
            status: item.status,
            status_label: item.status.label().to_string(),
            notes: or_placeholder(&item.notes, NO_NOTES),
            expected_back: item.expected_back,
            updated_at: item.updated_at,
        }
    }
}

impl From<&Review> for ReviewEntryView {
    fn from(review: &Review) -> Self {
        Self {
            review_id: review.review_id.clone(),
            source: review.source.clone(),
            rating: review.rating,
            stars: star_scale(review.rating),
            text: or_placeholder(&review.text, NO_TEXT),
            created_at: review.created_at,
            theme: review.theme.clone(),
            url: review.url.clone(),
        }
    }
}

impl From<&Change> for ChangeEntryView {
    fn from(change: &Change) -> Self {
        Self {
            change_id: change.change_id.clone(),
            title: change.title.clone(),
            detail: or_placeholder(change.detail.as_deref().unwrap_or_default(), NO_DETAILS),
            effective_from: change.effective_from,
            created_by: change.created_by.clone(),
            is_active: change.is_active,
            created_at: change.created_at,
        }
    }
}

/// Five-symbol rating scale; ratings outside 0..=5 are clamped.
pub fn star_scale(rating: i32) -> String {
    let filled = rating.clamp(0, STAR_SCALE as i32) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(STAR_SCALE - filled))
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_scale_clamps_to_five_symbols() {
        assert_eq!(star_scale(3), "★★★☆☆");
        assert_eq!(star_scale(0), "☆☆☆☆☆");
        assert_eq!(star_scale(9), "★★★★★");
        assert_eq!(star_scale(-2), "☆☆☆☆☆");
    }

    #[test]
    fn blank_values_get_placeholders() {
        assert_eq!(or_placeholder("  ", NO_NOTES), NO_NOTES);
        assert_eq!(or_placeholder("86 at 8pm", NO_NOTES), "86 at 8pm");
    }
}
