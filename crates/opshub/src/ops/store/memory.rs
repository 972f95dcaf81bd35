use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{
    InventoryRecord, InventoryUpdate, NewChange, NewReview, NewUser, StoreError, StoreExport,
};
use crate::ops::adapters::{InventorySource, ReviewSource, SourceError};
use crate::ops::domain::{
    Acknowledgement, Change, InventoryItem, MenuItem, Review, StockStatus, User,
};

#[derive(Debug, Default)]
struct StoreState {
    sequence: u64,
    menus: BTreeMap<String, MenuItem>,
    inventory: Vec<InventoryRecord>,
    reviews: Vec<Review>,
    changes: Vec<Change>,
    users: BTreeMap<String, User>,
    acknowledgements: Vec<Acknowledgement>,
}

impl StoreState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{prefix}-{:06}", self.sequence)
    }

    fn join(&self, record: &InventoryRecord) -> InventoryItem {
        InventoryItem {
            id: record.id,
            item_id: record.item_id.clone(),
            name: self
                .menus
                .get(&record.item_id)
                .map(|menu| menu.name.clone()),
            status: record.status,
            expected_back: record.expected_back,
            notes: record.notes.clone(),
            updated_at: record.updated_at,
        }
    }

    fn change_mut(&mut self, change_id: &str) -> Result<&mut Change, StoreError> {
        self.changes
            .iter_mut()
            .find(|change| change.change_id == change_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "change",
                id: change_id.to_string(),
            })
    }
}

/// Mutex-guarded store. Each call holds the lock only for its own duration and hands back
/// owned snapshots, so no caller ever observes a half-applied write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    pub fn upsert_menu_item(&self, item: MenuItem) -> Result<MenuItem, StoreError> {
        let mut state = self.lock()?;
        state.menus.insert(item.item_id.clone(), item.clone());
        Ok(item)
    }

    pub fn menu_items(&self) -> Result<Vec<MenuItem>, StoreError> {
        let state = self.lock()?;
        Ok(state.menus.values().cloned().collect())
    }

    /// Adds an inventory row. The menu reference is not checked; dangling rows read back
    /// with no display name.
    pub fn add_inventory(
        &self,
        item_id: &str,
        status: StockStatus,
        notes: &str,
        expected_back: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<InventoryItem, StoreError> {
        let mut state = self.lock()?;
        let id = state.inventory.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        let record = InventoryRecord {
            id,
            item_id: item_id.to_string(),
            status,
            notes: notes.to_string(),
            expected_back,
            updated_at: now,
        };
        let item = state.join(&record);
        state.inventory.push(record);
        Ok(item)
    }

    pub fn inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .inventory
            .iter()
            .map(|record| state.join(record))
            .collect())
    }

    pub fn update_inventory(
        &self,
        item_id: &str,
        update: InventoryUpdate,
        now: DateTime<Utc>,
    ) -> Result<InventoryItem, StoreError> {
        let mut state = self.lock()?;
        let index = state
            .inventory
            .iter()
            .position(|record| record.item_id == item_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "inventory item",
                id: item_id.to_string(),
            })?;

        let record = &mut state.inventory[index];
        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(notes) = update.notes {
            record.notes = notes;
        }
        if update.clear_expected_back {
            record.expected_back = None;
        } else if update.expected_back.is_some() {
            record.expected_back = update.expected_back;
        }
        record.updated_at = now;

        let record = record.clone();
        Ok(state.join(&record))
    }

    pub fn insert_review(&self, review: NewReview, now: DateTime<Utc>) -> Result<Review, StoreError> {
        let mut state = self.lock()?;
        let review = Review {
            review_id: state.next_id("rev"),
            source: review.source,
            rating: review.rating,
            text: review.text,
            created_at: review.created_at.unwrap_or(now),
            theme: review.theme,
            url: review.url,
        };
        state.reviews.push(review.clone());
        Ok(review)
    }

    pub fn reviews_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Review>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .reviews
            .iter()
            .filter(|review| review.created_at >= cutoff)
            .cloned()
            .collect())
    }

    pub fn add_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.lock()?;
        if state
            .users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict(format!(
                "a user with email '{}' already exists",
                user.email
            )));
        }

        let user = User {
            user_id: state.next_id("usr"),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            is_active: true,
        };
        state.users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        let state = self.lock()?;
        Ok(state.users.values().cloned().collect())
    }

    pub fn create_change(&self, change: NewChange, now: DateTime<Utc>) -> Result<Change, StoreError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&change.created_by) {
            return Err(StoreError::UnknownReference {
                entity: "user",
                id: change.created_by,
            });
        }

        let change = Change {
            change_id: state.next_id("chg"),
            title: change.title,
            detail: change.detail,
            effective_from: change.effective_from.unwrap_or(now),
            created_by: change.created_by,
            created_at: now,
            is_active: true,
        };
        state.changes.push(change.clone());
        Ok(change)
    }

    pub fn changes(&self) -> Result<Vec<Change>, StoreError> {
        let state = self.lock()?;
        Ok(state.changes.clone())
    }

    pub fn active_changes(&self) -> Result<Vec<Change>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .changes
            .iter()
            .filter(|change| change.is_active)
            .cloned()
            .collect())
    }

    /// Soft delete: the change stays on record but drops out of briefs.
    pub fn deactivate_change(&self, change_id: &str) -> Result<Change, StoreError> {
        let mut state = self.lock()?;
        let change = state.change_mut(change_id)?;
        change.is_active = false;
        Ok(change.clone())
    }

    /// Hard delete, cascading to acknowledgements of the change.
    pub fn delete_change(&self, change_id: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.changes.len();
        state.changes.retain(|change| change.change_id != change_id);
        if state.changes.len() == before {
            return Err(StoreError::NotFound {
                entity: "change",
                id: change_id.to_string(),
            });
        }
        state
            .acknowledgements
            .retain(|ack| ack.change_id != change_id);
        Ok(())
    }

    /// Records that `user_id` has read `change_id`. Repeat acknowledgements return the
    /// original record.
    pub fn acknowledge(
        &self,
        change_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Acknowledgement, StoreError> {
        let mut state = self.lock()?;
        state.change_mut(change_id)?;
        if !state.users.contains_key(user_id) {
            return Err(StoreError::UnknownReference {
                entity: "user",
                id: user_id.to_string(),
            });
        }

        if let Some(existing) = state
            .acknowledgements
            .iter()
            .find(|ack| ack.change_id == change_id && ack.user_id == user_id)
        {
            return Ok(existing.clone());
        }

        let ack = Acknowledgement {
            ack_id: state.next_id("ack"),
            user_id: user_id.to_string(),
            change_id: change_id.to_string(),
            acknowledged_at: now,
        };
        state.acknowledgements.push(ack.clone());
        Ok(ack)
    }

    pub fn acknowledgements(&self, change_id: &str) -> Result<Vec<Acknowledgement>, StoreError> {
        let mut state = self.lock()?;
        state.change_mut(change_id)?;
        Ok(state
            .acknowledgements
            .iter()
            .filter(|ack| ack.change_id == change_id)
            .cloned()
            .collect())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        *state = StoreState::default();
        Ok(())
    }

    pub fn export(&self) -> Result<StoreExport, StoreError> {
        let state = self.lock()?;
        Ok(StoreExport {
            menus: state.menus.values().cloned().collect(),
            inventory: state.inventory.clone(),
            reviews: state.reviews.clone(),
            changes: state.changes.clone(),
            users: state.users.values().cloned().collect(),
            acknowledgements: state.acknowledgements.clone(),
        })
    }
}

impl InventorySource for InMemoryStore {
    fn fetch_current(&self) -> Result<Vec<InventoryItem>, SourceError> {
        self.inventory()
            .map_err(|err| SourceError::Unavailable(err.to_string()))
    }
}

impl ReviewSource for InMemoryStore {
    fn fetch_recent(&self, cutoff: DateTime<Utc>) -> Result<Vec<Review>, SourceError> {
        self.reviews_since(cutoff)
            .map_err(|err| SourceError::Unavailable(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::domain::UserRole;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 15, 30, 0).unwrap()
    }

    fn manager(store: &InMemoryStore) -> User {
        store
            .add_user(NewUser {
                name: "Dana Reyes".to_string(),
                email: "dana@example.com".to_string(),
                phone: None,
                role: UserRole::Manager,
            })
            .expect("user created")
    }

    fn new_change(created_by: &str) -> NewChange {
        NewChange {
            title: "New brunch menu".to_string(),
            detail: Some("Starts Saturday".to_string()),
            effective_from: None,
            created_by: created_by.to_string(),
        }
    }

    #[test]
    fn inventory_joins_menu_names_and_tolerates_missing_entries() {
        let store = InMemoryStore::default();
        store
            .upsert_menu_item(MenuItem {
                item_id: "i1".to_string(),
                name: "Branzino".to_string(),
                price_cents: Some(3200),
                allergy_flags: None,
                active: true,
            })
            .expect("menu saved");
        store
            .add_inventory("i1", StockStatus::EightySix, "Supplier delay", None, now())
            .expect("row saved");
        store
            .add_inventory("ghost", StockStatus::Low, "", None, now())
            .expect("row saved");

        let items = store.inventory().expect("inventory");
        assert_eq!(items[0].display_name(), "Branzino");
        assert_eq!(items[1].display_name(), "Unknown Item");
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn update_inventory_applies_partial_changes() {
        let store = InMemoryStore::default();
        let expected = NaiveDate::from_ymd_opt(2025, 5, 4);
        store
            .add_inventory("i2", StockStatus::Low, "8 bottles left", expected, now())
            .expect("row saved");

        let later = now() + Duration::hours(2);
        let updated = store
            .update_inventory(
                "i2",
                InventoryUpdate {
                    status: Some(StockStatus::EightySix),
                    ..InventoryUpdate::default()
                },
                later,
            )
            .expect("update applies");

        assert_eq!(updated.status, StockStatus::EightySix);
        assert_eq!(updated.notes, "8 bottles left");
        assert_eq!(updated.expected_back, expected);
        assert_eq!(updated.updated_at, later);

        let missing = store.update_inventory("nope", InventoryUpdate::default(), later);
        assert!(matches!(missing, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn change_lifecycle_soft_then_hard_delete() {
        let store = InMemoryStore::default();
        let user = manager(&store);
        let change = store
            .create_change(new_change(&user.user_id), now())
            .expect("change created");
        assert!(change.is_active);
        assert_eq!(change.effective_from, now());

        store
            .deactivate_change(&change.change_id)
            .expect("deactivated");
        assert!(store.active_changes().expect("active").is_empty());
        assert_eq!(store.changes().expect("all").len(), 1);

        store.delete_change(&change.change_id).expect("deleted");
        assert!(store.changes().expect("all").is_empty());
        assert!(matches!(
            store.delete_change(&change.change_id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn change_requires_known_creator() {
        let store = InMemoryStore::default();
        let result = store.create_change(new_change("usr-missing"), now());
        assert!(matches!(result, Err(StoreError::UnknownReference { .. })));
    }

    #[test]
    fn acknowledgements_are_idempotent_and_cascade_on_delete() {
        let store = InMemoryStore::default();
        let user = manager(&store);
        let change = store
            .create_change(new_change(&user.user_id), now())
            .expect("change created");

        let first = store
            .acknowledge(&change.change_id, &user.user_id, now())
            .expect("ack");
        let second = store
            .acknowledge(&change.change_id, &user.user_id, now() + Duration::minutes(5))
            .expect("ack again");
        assert_eq!(first, second);
        assert_eq!(
            store
                .acknowledgements(&change.change_id)
                .expect("acks")
                .len(),
            1
        );

        store.delete_change(&change.change_id).expect("deleted");
        assert!(store.export().expect("export").acknowledgements.is_empty());
    }

    #[test]
    fn duplicate_email_conflicts() {
        let store = InMemoryStore::default();
        manager(&store);
        let duplicate = store.add_user(NewUser {
            name: "Other".to_string(),
            email: "DANA@example.com".to_string(),
            phone: None,
            role: UserRole::Staff,
        });
        assert!(matches!(duplicate, Err(StoreError::Conflict(_))));
    }

    #[test]
    fn reviews_since_filters_by_cutoff() {
        let store = InMemoryStore::default();
        for days_ago in [1, 5, 10] {
            store
                .insert_review(
                    NewReview {
                        source: "google".to_string(),
                        rating: 4,
                        text: format!("visit {days_ago} days ago"),
                        created_at: Some(now() - Duration::days(days_ago)),
                        theme: None,
                        url: None,
                    },
                    now(),
                )
                .expect("review saved");
        }

        let recent = store
            .fetch_recent(now() - Duration::days(7))
            .expect("recent reviews");
        assert_eq!(recent.len(), 2);
    }
}
