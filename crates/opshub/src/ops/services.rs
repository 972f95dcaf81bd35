use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::adapters::{InventorySource, ReviewSource, SourceError};
use super::brief::{Brief, BriefCompiler};
use super::domain::{InventoryItem, Review};
use super::store::{InMemoryStore, StoreError};
use super::themes::{ThemeCount, ThemeExtractor};
use super::window::ReviewWindow;

#[derive(Clone)]
pub struct InventoryService {
    source: Arc<dyn InventorySource>,
}

impl InventoryService {
    pub fn new(source: Arc<dyn InventorySource>) -> Self {
        Self { source }
    }

    pub fn snapshot(&self) -> Result<Vec<InventoryItem>, SourceError> {
        self.source.fetch_current()
    }
}

#[derive(Clone)]
pub struct ReviewService {
    source: Arc<dyn ReviewSource>,
    extractor: ThemeExtractor,
}

impl ReviewService {
    pub fn new(source: Arc<dyn ReviewSource>) -> Self {
        Self {
            source,
            extractor: ThemeExtractor::standard(),
        }
    }

    /// Complaint vocabulary the themes are drawn from.
    pub fn keywords(&self) -> &[&'static str] {
        self.extractor.keywords()
    }

    pub fn recent(
        &self,
        window: ReviewWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<Review>, SourceError> {
        self.source.fetch_recent(window.cutoff(now))
    }

    pub fn themes(
        &self,
        window: ReviewWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<ThemeCount>, SourceError> {
        let reviews = self.recent(window, now)?;
        Ok(self
            .extractor
            .extract(reviews.iter().map(|review| review.text.as_str())))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BriefError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fetches the four brief inputs and hands them to [`BriefCompiler`].
#[derive(Clone)]
pub struct BriefService {
    inventory: InventoryService,
    reviews: ReviewService,
    store: Arc<InMemoryStore>,
}

impl BriefService {
    pub fn new(
        inventory: InventoryService,
        reviews: ReviewService,
        store: Arc<InMemoryStore>,
    ) -> Self {
        Self {
            inventory,
            reviews,
            store,
        }
    }

    pub fn today(&self, window: ReviewWindow, now: DateTime<Utc>) -> Result<Brief, BriefError> {
        let inventory = self.inventory.snapshot()?;
        let reviews = self.reviews.recent(window, now)?;
        let changes = self.store.active_changes()?;

        let brief = BriefCompiler::compile(inventory, reviews, changes, now.date_naive(), now);
        tracing::info!(
            date = %brief.date,
            window_days = window.days(),
            eighty_sixed = brief.eighty_sixed.len(),
            low_stock = brief.low_stock.len(),
            reviews = brief.recent_reviews.len(),
            changes = brief.changes.len(),
            "compiled pre-shift brief"
        );
        Ok(brief)
    }
}
