use super::compiler::Brief;
use super::document::{NO_CHANGES, NO_EIGHTY_SIXED, NO_LOW_STOCK, NO_REVIEWS};
use super::views::{BriefView, InventoryEntryView};

impl Brief {
    /// Plain-text rendering for terminals, in the same section order as the document.
    pub fn summary_lines(&self) -> Vec<String> {
        let view = self.view();
        let mut lines = vec![
            format!("Pre-shift brief for {}", view.date.format("%Y-%m-%d")),
            format!(
                "Generated {} UTC",
                view.generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
        ];

        push_inventory(&mut lines, "86'd items", &view.eighty_six_items, NO_EIGHTY_SIXED);
        push_inventory(&mut lines, "Low stock", &view.low_stock_items, NO_LOW_STOCK);
        push_reviews(&mut lines, &view);
        push_changes(&mut lines, &view);

        lines
    }
}

fn push_inventory(
    lines: &mut Vec<String>,
    title: &str,
    items: &[InventoryEntryView],
    empty_message: &str,
) {
    lines.push(String::new());
    lines.push(format!("{title} ({})", items.len()));
    if items.is_empty() {
        lines.push(format!("- {empty_message}"));
        return;
    }

    for item in items {
        let back = item
            .expected_back
            .map(|date| format!(", back {}", date.format("%Y-%m-%d")))
            .unwrap_or_default();
        lines.push(format!("- {} [{}]: {}{back}", item.name, item.item_id, item.notes));
    }
}

fn push_reviews(lines: &mut Vec<String>, view: &BriefView) {
    lines.push(String::new());
    lines.push(format!("Recent reviews ({})", view.recent_reviews.len()));
    if view.recent_reviews.is_empty() {
        lines.push(format!("- {NO_REVIEWS}"));
        return;
    }

    for review in &view.recent_reviews {
        lines.push(format!(
            "- {} {} ({}): {}",
            review.stars,
            review.source,
            review.created_at.format("%Y-%m-%d %H:%M"),
            review.text
        ));
    }
}

fn push_changes(lines: &mut Vec<String>, view: &BriefView) {
    lines.push(String::new());
    lines.push(format!("Changes & announcements ({})", view.changes.len()));
    if view.changes.is_empty() {
        lines.push(format!("- {NO_CHANGES}"));
        return;
    }

    for change in &view.changes {
        lines.push(format!("- {}: {}", change.title, change.detail));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::brief::BriefCompiler;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_brief_lists_every_zero_state() {
        let now = Utc.with_ymd_and_hms(2025, 5, 2, 16, 0, 0).unwrap();
        let brief = BriefCompiler::compile(Vec::new(), Vec::new(), Vec::new(), now.date_naive(), now);

        let lines = brief.summary_lines();

        assert_eq!(lines[0], "Pre-shift brief for 2025-05-02");
        for message in [NO_EIGHTY_SIXED, NO_LOW_STOCK, NO_REVIEWS, NO_CHANGES] {
            assert!(lines.contains(&format!("- {message}")), "missing {message}");
        }
    }
}
