use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    CsvInventoryAdapter, InventorySource, MockInventoryAdapter, MockReviewsAdapter, ReviewSource,
};
use crate::ops::store::InMemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AdapterFlag {
    Mock,
    Csv,
    Store,
}

impl AdapterFlag {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "csv" => Some(Self::Csv),
            "store" | "db" | "database" => Some(Self::Store),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Csv => "csv",
            Self::Store => "store",
        }
    }
}

/// Picks concrete data sources from the configured adapter flags.
///
/// Inventory prefers the CSV inbox, then the store, then mock data. Reviews come from the
/// store when `store` is enabled and from mock data otherwise. Unknown flags are ignored.
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    flags: BTreeSet<AdapterFlag>,
    inventory_csv: PathBuf,
    store: Arc<InMemoryStore>,
    anchor: Option<DateTime<Utc>>,
}

impl AdapterRegistry {
    pub fn new<I, S>(flags: I, inventory_csv: PathBuf, store: Arc<InMemoryStore>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let flags = flags
            .into_iter()
            .filter_map(|flag| {
                let parsed = AdapterFlag::parse(flag.as_ref());
                if parsed.is_none() {
                    tracing::warn!(flag = flag.as_ref(), "ignoring unknown adapter flag");
                }
                parsed
            })
            .collect();

        Self {
            flags,
            inventory_csv,
            store,
            anchor: None,
        }
    }

    /// Pins mock data to `now` instead of the wall clock.
    pub fn anchored(mut self, now: DateTime<Utc>) -> Self {
        self.anchor = Some(now);
        self
    }

    pub fn has(&self, flag: AdapterFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn flag_names(&self) -> Vec<&'static str> {
        self.flags.iter().map(|flag| flag.as_str()).collect()
    }

    pub fn store(&self) -> Arc<InMemoryStore> {
        self.store.clone()
    }

    pub fn inventory(&self) -> Arc<dyn InventorySource> {
        if self.has(AdapterFlag::Csv) {
            Arc::new(CsvInventoryAdapter::new(self.inventory_csv.clone()))
        } else if self.has(AdapterFlag::Store) {
            self.store.clone()
        } else {
            Arc::new(self.mock_inventory())
        }
    }

    pub fn reviews(&self) -> Arc<dyn ReviewSource> {
        if self.has(AdapterFlag::Store) {
            self.store.clone()
        } else {
            Arc::new(self.mock_reviews())
        }
    }

    fn mock_inventory(&self) -> MockInventoryAdapter {
        self.anchor
            .map(MockInventoryAdapter::anchored)
            .unwrap_or_default()
    }

    fn mock_reviews(&self) -> MockReviewsAdapter {
        self.anchor
            .map(MockReviewsAdapter::anchored)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn registry(flags: &[&str]) -> AdapterRegistry {
        AdapterRegistry::new(
            flags.iter().copied(),
            PathBuf::from("./does-not-exist.csv"),
            Arc::new(InMemoryStore::default()),
        )
    }

    #[test]
    fn defaults_to_mock_sources() {
        let registry = registry(&["mock"]);
        let items = registry.inventory().fetch_current().expect("mock inventory");
        assert_eq!(items.len(), 3);
        let reviews = registry
            .reviews()
            .fetch_recent(Utc::now() - Duration::days(7))
            .expect("mock reviews");
        assert_eq!(reviews.len(), 3);
    }

    #[test]
    fn store_flag_routes_to_empty_store() {
        let registry = registry(&["store", "bogus"]);
        assert!(registry.has(AdapterFlag::Store));
        assert_eq!(registry.flag_names(), vec!["store"]);
        assert!(registry
            .inventory()
            .fetch_current()
            .expect("store inventory")
            .is_empty());
    }

    #[test]
    fn anchored_registry_pins_mock_reviews() {
        let anchor = Utc::now() - Duration::days(90);
        let registry = registry(&["mock"]).anchored(anchor);

        let reviews = registry
            .reviews()
            .fetch_recent(anchor - Duration::days(7))
            .expect("mock reviews");
        assert_eq!(reviews.len(), 3);
        assert!(reviews.iter().all(|review| review.created_at <= anchor));
    }

    #[test]
    fn csv_flag_reads_inbox_path() {
        let registry = registry(&[" CSV ", "store"]);
        assert!(registry.inventory().fetch_current().is_err());
    }
}
