use serde::{Deserialize, Serialize};

/// Complaint vocabulary scanned for in review text.
pub const THEME_KEYWORDS: [&str; 5] = ["slow", "cold", "overcooked", "rude", "loud"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCount {
    pub name: String,
    pub count: usize,
}

/// Counts how many reviews mention each keyword, case-insensitively and as a substring.
///
/// A review counts once per keyword no matter how often the keyword repeats. Keywords
/// without a match are dropped. Results are ordered by count descending, then keyword
/// ascending so equal counts come back in a stable order.
#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    keywords: Vec<&'static str>,
}

impl Default for ThemeExtractor {
    fn default() -> Self {
        Self::standard()
    }
}

impl ThemeExtractor {
    pub fn standard() -> Self {
        Self {
            keywords: THEME_KEYWORDS.to_vec(),
        }
    }

    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }

    pub fn extract<'a, I>(&self, texts: I) -> Vec<ThemeCount>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lowered: Vec<String> = texts.into_iter().map(str::to_lowercase).collect();

        let mut themes: Vec<ThemeCount> = self
            .keywords
            .iter()
            .map(|keyword| ThemeCount {
                name: (*keyword).to_string(),
                count: lowered.iter().filter(|text| text.contains(keyword)).count(),
            })
            .filter(|theme| theme.count > 0)
            .collect();

        themes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reviews_surface_slow_only() {
        let reviews = [
            "Service was slow on patio",
            "Steak was perfect",
            "Expo backed up, ticket times 20+ minutes",
        ];

        let themes = ThemeExtractor::standard().extract(reviews);

        assert_eq!(
            themes,
            vec![ThemeCount {
                name: "slow".to_string(),
                count: 1
            }]
        );
        assert!(themes.iter().all(|theme| theme.name != "cold"));
    }

    #[test]
    fn matching_ignores_case_and_counts_once_per_review() {
        let themes = ThemeExtractor::standard().extract(["SLOW slow Slow", "so slowly served"]);
        assert_eq!(themes[0].name, "slow");
        assert_eq!(themes[0].count, 2);
    }

    #[test]
    fn equal_counts_fall_back_to_keyword_order() {
        let themes = ThemeExtractor::standard().extract([
            "Rude host and a loud room",
            "Soup was cold",
            "Cold fries, rude server",
        ]);

        let ranked: Vec<(&str, usize)> = themes
            .iter()
            .map(|theme| (theme.name.as_str(), theme.count))
            .collect();
        assert_eq!(ranked, vec![("cold", 2), ("rude", 2), ("loud", 1)]);
    }

    #[test]
    fn counts_never_zero_and_never_exceed_review_total() {
        let reviews = [
            "slow and cold",
            "overcooked, cold, loud",
            "",
            "Everything was lovely",
        ];
        let themes = ThemeExtractor::standard().extract(reviews);

        assert!(!themes.is_empty());
        for theme in &themes {
            assert!(theme.count > 0);
            assert!(theme.count <= reviews.len());
        }
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let none: [&str; 0] = [];
        assert!(ThemeExtractor::standard().extract(none).is_empty());
    }
}
