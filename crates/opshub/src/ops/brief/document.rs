use std::fmt::{self, Write as _};

use super::views::{BriefView, ChangeEntryView, InventoryEntryView, ReviewEntryView};

pub const NO_EIGHTY_SIXED: &str = "No items are currently 86'd";
pub const NO_LOW_STOCK: &str = "All items are well stocked";
pub const NO_REVIEWS: &str = "No recent reviews";
pub const NO_CHANGES: &str = "No active changes";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const BRIEF_CSS: &str = r#"
@page { size: A4; margin: 1in; }
body { font-family: 'Helvetica', 'Arial', sans-serif; line-height: 1.6; color: #333; margin: 0; }
.header { text-align: center; border-bottom: 3px solid #2563eb; padding-bottom: 20px; margin-bottom: 30px; }
.header h1 { color: #2563eb; margin: 0; font-size: 28px; }
.header h2 { color: #374151; margin: 10px 0; font-size: 24px; }
.generated { color: #6b7280; font-size: 14px; margin: 0; }
.section { margin-bottom: 30px; page-break-inside: avoid; }
.section-title { font-size: 18px; font-weight: bold; margin-bottom: 15px; padding: 10px; border-radius: 5px; background-color: #f3f4f6; color: #374151; border-left: 4px solid #6b7280; }
.section-title.danger { background-color: #fef2f2; color: #dc2626; border-left-color: #dc2626; }
.section-title.warning { background-color: #fffbeb; color: #d97706; border-left-color: #d97706; }
.section-title.success { background-color: #f0fdf4; color: #16a34a; border-left-color: #16a34a; }
.no-items { color: #6b7280; font-style: italic; margin: 10px 0; }
.item-card, .review-card, .change-card { padding: 15px; margin-bottom: 15px; border: 1px solid #e5e7eb; border-radius: 8px; background-color: #f9fafb; }
.item-card.danger { background-color: #fef2f2; border-color: #fecaca; }
.item-card.warning { background-color: #fffbeb; border-color: #fed7aa; }
.item-name, .change-title { font-weight: bold; font-size: 16px; }
.item-id, .source, .date, .change-meta { color: #6b7280; font-size: 14px; }
.stars { color: #fbbf24; font-size: 16px; }
.footer { text-align: center; color: #6b7280; font-size: 12px; border-top: 1px solid #e5e7eb; padding-top: 20px; }
"#;

/// Renders the printable HTML brief.
///
/// Sections always appear in the same order (86'd, low stock, reviews, changes), and an
/// empty section still renders with its zero-state message.
pub fn render_document(view: &BriefView) -> Result<String, fmt::Error> {
    let date = view.date.format("%Y-%m-%d").to_string();
    let mut html = String::new();

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html>")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>Pre-Shift Brief - {date}</title>")?;
    writeln!(html, "<style>{BRIEF_CSS}</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<div class=\"header\">")?;
    writeln!(html, "<h1>Restaurant Ops Hub</h1>")?;
    writeln!(html, "<h2>Pre-Shift Brief - {date}</h2>")?;
    writeln!(
        html,
        "<p class=\"generated\">Generated: {} UTC</p>",
        view.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"content\">")?;
    inventory_section(
        &mut html,
        "86 Items",
        "danger",
        &view.eighty_six_items,
        NO_EIGHTY_SIXED,
    )?;
    inventory_section(
        &mut html,
        "Low Stock Items",
        "warning",
        &view.low_stock_items,
        NO_LOW_STOCK,
    )?;
    reviews_section(&mut html, &view.recent_reviews)?;
    changes_section(&mut html, &view.changes)?;
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"footer\"><p>Restaurant Ops Hub - Pre-Shift Brief</p></div>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;

    Ok(html)
}

fn section_open(html: &mut String, title: &str, tone: &str, count: usize) -> fmt::Result {
    writeln!(html, "<div class=\"section\">")?;
    writeln!(
        html,
        "<h3 class=\"section-title {tone}\">{title} ({count})</h3>"
    )
}

fn zero_state(html: &mut String, message: &str) -> fmt::Result {
    writeln!(html, "<p class=\"no-items\">{message}</p>")?;
    writeln!(html, "</div>")
}

fn inventory_section(
    html: &mut String,
    title: &str,
    tone: &str,
    items: &[InventoryEntryView],
    empty_message: &str,
) -> fmt::Result {
    if items.is_empty() {
        section_open(html, title, "success", 0)?;
        return zero_state(html, empty_message);
    }

    section_open(html, title, tone, items.len())?;
    for item in items {
        writeln!(html, "<div class=\"item-card {tone}\">")?;
        writeln!(html, "<div class=\"item-name\">{}</div>", escape_html(&item.name))?;
        writeln!(html, "<div class=\"item-id\">{}</div>", escape_html(&item.item_id))?;
        writeln!(html, "<div class=\"item-notes\">{}</div>", escape_html(&item.notes))?;
        if let Some(expected_back) = item.expected_back {
            writeln!(
                html,
                "<div class=\"item-id\">Expected back {}</div>",
                expected_back.format("%Y-%m-%d")
            )?;
        }
        writeln!(html, "</div>")?;
    }
    writeln!(html, "</div>")
}

fn reviews_section(html: &mut String, reviews: &[ReviewEntryView]) -> fmt::Result {
    section_open(html, "Recent Reviews", "", reviews.len())?;
    if reviews.is_empty() {
        return zero_state(html, NO_REVIEWS);
    }

    for review in reviews {
        writeln!(html, "<div class=\"review-card\">")?;
        writeln!(html, "<div class=\"review-header\">")?;
        writeln!(html, "<span class=\"stars\">{}</span>", review.stars)?;
        writeln!(html, "<span class=\"source\">{}</span>", escape_html(&review.source))?;
        writeln!(
            html,
            "<span class=\"date\">{}</span>",
            review.created_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(html, "</div>")?;
        writeln!(html, "<div class=\"review-text\">{}</div>", escape_html(&review.text))?;
        writeln!(html, "</div>")?;
    }
    writeln!(html, "</div>")
}

fn changes_section(html: &mut String, changes: &[ChangeEntryView]) -> fmt::Result {
    section_open(html, "Changes &amp; Announcements", "", changes.len())?;
    if changes.is_empty() {
        return zero_state(html, NO_CHANGES);
    }

    for change in changes {
        writeln!(html, "<div class=\"change-card\">")?;
        writeln!(html, "<div class=\"change-title\">{}</div>", escape_html(&change.title))?;
        writeln!(html, "<div class=\"change-detail\">{}</div>", escape_html(&change.detail))?;
        writeln!(
            html,
            "<div class=\"change-meta\">By {} on {}</div>",
            escape_html(&change.created_by),
            change.created_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(html, "</div>")?;
    }
    writeln!(html, "</div>")
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<b>Fish & \"chips\"</b>"),
            "&lt;b&gt;Fish &amp; &quot;chips&quot;&lt;/b&gt;"
        );
    }
}
