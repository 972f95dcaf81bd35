use chrono::{DateTime, Duration, Utc};

use super::{InventorySource, ReviewSource, SourceError};
use crate::ops::domain::{InventoryItem, Review, StockStatus};

/// Fixed demo inventory: one 86'd item, one running low, one healthy.
#[derive(Debug, Clone, Default)]
pub struct MockInventoryAdapter {
    anchor: Option<DateTime<Utc>>,
}

impl MockInventoryAdapter {
    /// Pin the generated timestamps instead of reading the clock on every fetch.
    pub fn anchored(now: DateTime<Utc>) -> Self {
        Self { anchor: Some(now) }
    }
}

impl InventorySource for MockInventoryAdapter {
    fn fetch_current(&self) -> Result<Vec<InventoryItem>, SourceError> {
        let now = self.anchor.unwrap_or_else(Utc::now);
        let today = now.date_naive();

        Ok(vec![
            InventoryItem {
                id: 1,
                item_id: "i1".to_string(),
                name: Some("Branzino".to_string()),
                status: StockStatus::EightySix,
                expected_back: Some(today + Duration::days(2)),
                notes: "Supplier delay".to_string(),
                updated_at: now,
            },
            InventoryItem {
                id: 2,
                item_id: "i2".to_string(),
                name: Some("Assyrtiko".to_string()),
                status: StockStatus::Low,
                expected_back: Some(today + Duration::days(1)),
                notes: "8 bottles left".to_string(),
                updated_at: now,
            },
            InventoryItem {
                id: 3,
                item_id: "i3".to_string(),
                name: Some("Hummus".to_string()),
                status: StockStatus::Ok,
                expected_back: None,
                notes: String::new(),
                updated_at: now,
            },
        ])
    }
}

/// Fixed demo reviews spread over the last two days.
#[derive(Debug, Clone, Default)]
pub struct MockReviewsAdapter {
    anchor: Option<DateTime<Utc>>,
}

impl MockReviewsAdapter {
    pub fn anchored(now: DateTime<Utc>) -> Self {
        Self { anchor: Some(now) }
    }

    fn reviews(now: DateTime<Utc>) -> Vec<Review> {
        vec![
            Review {
                review_id: "r1".to_string(),
                source: "google".to_string(),
                rating: 2,
                text: "Service was slow on patio; drinks took 20 minutes.".to_string(),
                created_at: now - Duration::days(1),
                theme: None,
                url: None,
            },
            Review {
                review_id: "r2".to_string(),
                source: "google".to_string(),
                rating: 5,
                text: "Steak perfect; server was attentive.".to_string(),
                created_at: now - Duration::days(2),
                theme: None,
                url: None,
            },
            Review {
                review_id: "r3".to_string(),
                source: "internal".to_string(),
                rating: 3,
                text: "Expo backed up at 7:30; ticket times 20+ minutes.".to_string(),
                created_at: now,
                theme: None,
                url: None,
            },
        ]
    }
}

impl ReviewSource for MockReviewsAdapter {
    fn fetch_recent(&self, cutoff: DateTime<Utc>) -> Result<Vec<Review>, SourceError> {
        let now = self.anchor.unwrap_or_else(Utc::now);
        Ok(Self::reviews(now)
            .into_iter()
            .filter(|review| review.created_at >= cutoff)
            .collect())
    }
}
