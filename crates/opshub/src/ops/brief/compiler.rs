use chrono::{DateTime, NaiveDate, Utc};

use crate::ops::domain::{Change, InventoryItem, Review, StockStatus};

/// Pre-shift brief for one day. Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brief {
    pub date: NaiveDate,
    pub eighty_sixed: Vec<InventoryItem>,
    pub low_stock: Vec<InventoryItem>,
    pub recent_reviews: Vec<Review>,
    pub changes: Vec<Change>,
    pub generated_at: DateTime<Utc>,
}

pub struct BriefCompiler;

impl BriefCompiler {
    /// Assembles the brief from already-fetched collections.
    ///
    /// Reviews are taken as given; the caller has already narrowed them to the review window.
    /// Items in `Ok` status and inactive changes are left out. Input order is preserved.
    pub fn compile(
        inventory: Vec<InventoryItem>,
        reviews: Vec<Review>,
        changes: Vec<Change>,
        today: NaiveDate,
        generated_at: DateTime<Utc>,
    ) -> Brief {
        let mut eighty_sixed = Vec::new();
        let mut low_stock = Vec::new();

        for item in inventory {
            match item.status {
                StockStatus::EightySix => eighty_sixed.push(item),
                StockStatus::Low => low_stock.push(item),
                StockStatus::Ok => {}
            }
        }

        let changes = changes.into_iter().filter(|change| change.is_active).collect();

        Brief {
            date: today,
            eighty_sixed,
            low_stock,
            recent_reviews: reviews,
            changes,
            generated_at,
        }
    }
}

impl Brief {
    pub fn is_all_clear(&self) -> bool {
        self.eighty_sixed.is_empty()
            && self.low_stock.is_empty()
            && self.recent_reviews.is_empty()
            && self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 15, 30, 0).unwrap()
    }

    fn item(id: u64, status: StockStatus) -> InventoryItem {
        InventoryItem {
            id,
            item_id: format!("i{id}"),
            name: Some(format!("Item {id}")),
            status,
            expected_back: None,
            notes: String::new(),
            updated_at: generated_at(),
        }
    }

    fn change(id: &str, is_active: bool) -> Change {
        Change {
            change_id: id.to_string(),
            title: format!("Change {id}"),
            detail: None,
            effective_from: generated_at(),
            created_by: "usr-000001".to_string(),
            created_at: generated_at(),
            is_active,
        }
    }

    #[test]
    fn partitions_one_of_each_status() {
        let inventory = vec![
            item(1, StockStatus::EightySix),
            item(2, StockStatus::Low),
            item(3, StockStatus::Ok),
        ];
        let today = generated_at().date_naive();

        let brief = BriefCompiler::compile(inventory, Vec::new(), Vec::new(), today, generated_at());

        assert_eq!(brief.eighty_sixed.len(), 1);
        assert_eq!(brief.low_stock.len(), 1);
        assert_eq!(brief.eighty_sixed[0].id, 1);
        assert_eq!(brief.low_stock[0].id, 2);
        assert_eq!(brief.date, today);
        assert_eq!(brief.generated_at, generated_at());
    }

    #[test]
    fn drops_inactive_changes() {
        let changes = vec![change("a", true), change("b", false), change("c", true)];
        let brief = BriefCompiler::compile(
            Vec::new(),
            Vec::new(),
            changes,
            generated_at().date_naive(),
            generated_at(),
        );

        let ids: Vec<&str> = brief.changes.iter().map(|c| c.change_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(brief.changes.iter().all(|c| c.is_active));
    }

    #[test]
    fn empty_inputs_produce_all_clear_brief() {
        let brief = BriefCompiler::compile(
            Vec::new(),
            Vec::new(),
            vec![change("old", false)],
            generated_at().date_naive(),
            generated_at(),
        );
        assert!(brief.is_all_clear());
    }
}
