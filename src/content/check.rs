//! Content checks
//!
//! Problems in the data files that the pages would otherwise hide: a
//! duplicate id makes one article unreachable, a malformed date sorts last,
//! an unknown category renders in the fallback style.

use std::collections::HashSet;
use std::fmt;

use super::model::{CategoryStyle, CourseCatalog, NewsFeed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub resource: &'static str,
    pub message: String,
}

impl Issue {
    fn error(resource: &'static str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            resource,
            message,
        }
    }

    fn warning(resource: &'static str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            resource,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", level, self.resource, self.message)
    }
}

/// Check `news.json`
pub fn check_news(feed: &NewsFeed) -> Vec<Issue> {
    const RESOURCE: &str = "news.json";
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for article in &feed.articles {
        if !seen.insert(article.id.as_str()) {
            issues.push(Issue::error(
                RESOURCE,
                format!("duplicate article id {:?}", article.id),
            ));
        }
        if article.id.trim().is_empty() {
            issues.push(Issue::error(
                RESOURCE,
                format!("article {:?} has an empty id", article.title),
            ));
        }
        if article.published().is_none() {
            issues.push(Issue::warning(
                RESOURCE,
                format!(
                    "article {:?} has date {:?}, expected YYYY-MM-DD",
                    article.id, article.date
                ),
            ));
        }
        if !CategoryStyle::is_known(&article.category) {
            issues.push(Issue::warning(
                RESOURCE,
                format!(
                    "article {:?} has category {:?}, shown in the default style",
                    article.id, article.category
                ),
            ));
        }
    }
    issues
}

/// Check `courses.json`
pub fn check_catalog(catalog: &CourseCatalog) -> Vec<Issue> {
    const RESOURCE: &str = "courses.json";
    let mut issues = Vec::new();

    if catalog.categories.is_empty() {
        issues.push(Issue::warning(RESOURCE, "no categories".to_string()));
    }
    for category in &catalog.categories {
        if category.courses.is_empty() {
            issues.push(Issue::warning(
                RESOURCE,
                format!("category {:?} has no courses yet", category.name),
            ));
        }
    }
    issues
}
