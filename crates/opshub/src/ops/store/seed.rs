use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{InMemoryStore, NewChange, NewReview, NewUser, StoreError};
use crate::ops::domain::{MenuItem, StockStatus, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub menu_count: usize,
    pub inventory_count: usize,
    pub reviews_count: usize,
    pub changes_count: usize,
    pub users_count: usize,
}

const MENU: [(&str, &str, u32, Option<&str>); 6] = [
    ("branzino", "Grilled Branzino", 3400, Some("fish")),
    ("assyrtiko", "Assyrtiko (glass)", 1400, Some("sulfites")),
    ("hummus", "Hummus & Pita", 1100, Some("sesame,gluten")),
    ("lamb-chops", "Lamb Chops", 3800, None),
    ("octopus", "Charred Octopus", 2200, Some("shellfish")),
    ("baklava", "Pistachio Baklava", 900, Some("tree nuts,gluten")),
];

impl InMemoryStore {
    /// Loads the demo dataset used by the admin inject endpoint and the CLI.
    pub fn seed_demo(&self, now: DateTime<Utc>) -> Result<SeedSummary, StoreError> {
        let today = now.date_naive();

        for (item_id, name, price, allergy_flags) in MENU {
            self.upsert_menu_item(MenuItem {
                item_id: item_id.to_string(),
                name: name.to_string(),
                price_cents: Some(price),
                allergy_flags: allergy_flags.map(str::to_string),
                active: true,
            })?;
        }

        let inventory = [
            ("branzino", StockStatus::EightySix, "Supplier delay", Some(2)),
            ("assyrtiko", StockStatus::Low, "8 bottles left", Some(1)),
            ("hummus", StockStatus::Ok, "", None),
            ("lamb-chops", StockStatus::Ok, "", None),
            ("octopus", StockStatus::Low, "Last case opened at lunch", Some(3)),
            ("baklava", StockStatus::EightySix, "Pastry chef out sick", None),
        ];
        for (item_id, status, notes, back_in_days) in inventory {
            let expected_back = back_in_days.map(|days| today + Duration::days(days));
            self.add_inventory(item_id, status, notes, expected_back, now)?;
        }

        let manager = self.add_user(NewUser {
            name: "Dana Reyes".to_string(),
            email: "dana.reyes@opshub.local".to_string(),
            phone: Some("555-0142".to_string()),
            role: UserRole::Manager,
        })?;
        self.add_user(NewUser {
            name: "Sam Okafor".to_string(),
            email: "sam.okafor@opshub.local".to_string(),
            phone: None,
            role: UserRole::Staff,
        })?;

        let reviews = [
            ("google", 2, "Service was slow on patio; drinks took 20 minutes.", 1),
            ("google", 5, "Steak perfect; server was attentive.", 2),
            ("internal", 3, "Expo backed up at 7:30; ticket times 20+ minutes.", 0),
            ("yelp", 2, "Fries came out cold and the dining room was loud.", 4),
            ("google", 4, "Great octopus, a little slow between courses.", 12),
        ];
        for (source, rating, text, days_ago) in reviews {
            self.insert_review(
                NewReview {
                    source: source.to_string(),
                    rating,
                    text: text.to_string(),
                    created_at: Some(now - Duration::days(days_ago)),
                    theme: None,
                    url: None,
                },
                now,
            )?;
        }

        let changes = [
            (
                "Brunch service starts Saturday",
                Some("Doors at 10:00; brunch menu replaces lunch on weekends."),
                true,
            ),
            ("New POS modifier for gluten-free pita", None, true),
            ("Holiday hours posted", Some("Closed Monday for inventory."), false),
        ];
        for (title, detail, active) in changes {
            let change = self.create_change(
                NewChange {
                    title: title.to_string(),
                    detail: detail.map(str::to_string),
                    effective_from: Some(now),
                    created_by: manager.user_id.clone(),
                },
                now,
            )?;
            if !active {
                self.deactivate_change(&change.change_id)?;
            }
        }

        let export = self.export()?;
        Ok(SeedSummary {
            menu_count: export.menus.len(),
            inventory_count: export.inventory.len(),
            reviews_count: export.reviews.len(),
            changes_count: export.changes.len(),
            users_count: export.users.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn seed_populates_every_table() {
        let store = InMemoryStore::default();
        let now = Utc.with_ymd_and_hms(2025, 5, 2, 15, 30, 0).unwrap();

        let summary = store.seed_demo(now).expect("seed succeeds");

        assert_eq!(summary.menu_count, 6);
        assert_eq!(summary.inventory_count, 6);
        assert_eq!(summary.reviews_count, 5);
        assert_eq!(summary.changes_count, 3);
        assert_eq!(summary.users_count, 2);
        assert_eq!(store.active_changes().expect("active").len(), 2);
    }
}
