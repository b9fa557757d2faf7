//! Content data types
//!
//! The shapes of the two JSON resources the site reads:
//! - `news.json`: `{ articles: [Article] }`
//! - `courses.json`: `{ categories: [CourseCategory] }`
//!
//! Everything here is read-only once fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Contents of `news.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewsFeed {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A single news article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Unique id, compared as text (numeric ids are accepted)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Publication date as `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
}

impl Article {
    /// Parsed publication date, if well-formed
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Date in display form (`2024 年 1 月 5 日`), raw text if unparseable
    pub fn date_label(&self) -> String {
        self.published()
            .map(format_date)
            .unwrap_or_else(|| self.date.clone())
    }

    pub fn style(&self) -> CategoryStyle {
        CategoryStyle::for_label(&self.category)
    }

    /// Listing order: pinned first, then newest first
    ///
    /// Articles with unparseable dates sort after dated ones in their group.
    pub fn listing_order(a: &Article, b: &Article) -> Ordering {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.published().cmp(&a.published()))
    }
}

impl NewsFeed {
    /// Articles in listing order, truncated to `limit`
    pub fn listing(&self, limit: Option<usize>) -> Vec<&Article> {
        let mut sorted: Vec<&Article> = self.articles.iter().collect();
        // Stable: equal keys keep file order
        sorted.sort_by(|a, b| Article::listing_order(a, b));
        if let Some(limit) = limit {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Look up an article by id
    pub fn find(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }
}

/// Contents of `courses.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourseCatalog {
    #[serde(default)]
    pub categories: Vec<CourseCategory>,
}

/// A tab of the course catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseCategory {
    #[serde(default)]
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// A single course offering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub hours: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fee: String,
}

/// Visual style for a news category label
///
/// Unknown labels fall back to [`CategoryStyle::Primary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStyle {
    Announcement,
    Journal,
    Event,
    Primary,
}

impl CategoryStyle {
    /// Known category labels and their styles
    pub const TABLE: [(&'static str, CategoryStyle); 3] = [
        ("公告", CategoryStyle::Announcement),
        ("期刊", CategoryStyle::Journal),
        ("活動", CategoryStyle::Event),
    ];

    pub fn for_label(label: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == label.trim())
            .map(|(_, style)| *style)
            .unwrap_or(CategoryStyle::Primary)
    }

    pub fn is_known(label: &str) -> bool {
        Self::TABLE.iter().any(|(name, _)| *name == label.trim())
    }

    /// CSS modifier used by badges and card accents
    pub fn class_suffix(&self) -> &'static str {
        match self {
            CategoryStyle::Announcement => "announcement",
            CategoryStyle::Journal => "journal",
            CategoryStyle::Event => "event",
            CategoryStyle::Primary => "primary",
        }
    }
}

impl fmt::Display for CategoryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_suffix())
    }
}

/// Format a date as `YYYY 年 M 月 D 日`
pub fn format_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} 年 {} 月 {} 日", date.year(), date.month(), date.day())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Str(s) => s,
        Text::Num(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, date: &str, pinned: bool) -> Article {
        Article {
            id: id.to_string(),
            title: format!("title {}", id),
            category: "公告".to_string(),
            date: date.to_string(),
            summary: String::new(),
            content: String::new(),
            pinned,
        }
    }

    #[test]
    fn test_listing_puts_pinned_first() {
        let feed = NewsFeed {
            articles: vec![
                article("new", "2024-06-01", false),
                article("pinned", "2024-01-01", true),
            ],
        };
        let ids: Vec<&str> = feed.listing(None).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["pinned", "new"]);
    }

    #[test]
    fn test_listing_orders_groups_by_date_descending() {
        let feed = NewsFeed {
            articles: vec![
                article("a", "2023-03-01", false),
                article("b", "2024-02-01", true),
                article("c", "2024-05-01", false),
                article("d", "2022-01-01", true),
                article("e", "not a date", false),
                article("f", "2023-12-31", false),
            ],
        };
        let listing = feed.listing(None);
        let ids: Vec<&str> = listing.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "f", "a", "e"]);

        // every pinned precedes every unpinned, dates non-increasing per group
        let first_unpinned = listing.iter().position(|a| !a.pinned).unwrap();
        assert!(listing[first_unpinned..].iter().all(|a| !a.pinned));
        for group in [&listing[..first_unpinned], &listing[first_unpinned..]] {
            for pair in group.windows(2) {
                assert!(pair[0].published() >= pair[1].published());
            }
        }
    }

    #[test]
    fn test_listing_limit() {
        let feed = NewsFeed {
            articles: (1..=5)
                .map(|i| article(&i.to_string(), &format!("2024-01-0{}", i), false))
                .collect(),
        };
        assert_eq!(feed.listing(Some(3)).len(), 3);
        assert_eq!(feed.listing(Some(0)).len(), 0);
        assert_eq!(feed.listing(Some(99)).len(), 5);
        assert_eq!(feed.listing(Some(3))[0].id, "5");
    }

    #[test]
    fn test_numeric_ids_and_defaults() {
        let feed: NewsFeed = serde_json::from_str(
            r#"{"articles":[{"id":7,"title":"Hello","date":"2024-01-05"}]}"#,
        )
        .unwrap();
        let art = feed.find("7").unwrap();
        assert!(!art.pinned);
        assert_eq!(art.date_label(), "2024 年 1 月 5 日");
        assert!(feed.find("8").is_none());
    }

    #[test]
    fn test_course_numbers_as_text() {
        let catalog: CourseCatalog = serde_json::from_str(
            r#"{"categories":[{"icon":"📚","name":"語言","courses":[
                {"name":"華語","description":"d","hours":36,"audience":"成人","fee":"NT$ 3,000"}
            ]}]}"#,
        )
        .unwrap();
        let course = &catalog.categories[0].courses[0];
        assert_eq!(course.hours, "36");
        assert_eq!(course.fee, "NT$ 3,000");
    }

    #[test]
    fn test_category_style_fallback() {
        assert_eq!(CategoryStyle::for_label("公告"), CategoryStyle::Announcement);
        assert_eq!(CategoryStyle::for_label("期刊").class_suffix(), "journal");
        assert_eq!(CategoryStyle::for_label("活動").to_string(), "event");
        assert_eq!(CategoryStyle::for_label("其他"), CategoryStyle::Primary);
        assert!(!CategoryStyle::is_known("其他"));
    }

    #[test]
    fn test_unparseable_date_label_is_verbatim() {
        let art = article("x", "Spring 2024", false);
        assert_eq!(art.published(), None);
        assert_eq!(art.date_label(), "Spring 2024");
    }
}
