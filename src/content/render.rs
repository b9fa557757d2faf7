//! View-models and renderers
//!
//! Each page region has a view-model built from the data model and a
//! `render` method producing [`Html`]. All text coming from JSON is escaped
//! on the way in.

use crate::html::Html;

use super::model::{Article, CategoryStyle, Course, CourseCatalog, CourseCategory};

/// Shown in place of the news list when the feed can't be loaded
pub const EMPTY_LIST_TEXT: &str = "暫無資料";

/// Shown in the article body when the id matches nothing
pub const NOT_FOUND_TEXT: &str = "找不到此文章";

/// Shown in a course panel whose category has no courses yet
pub const EMPTY_CATEGORY_TEXT: &str = "課程規劃中，敬請期待";

/// Placeholder markup for a news list that failed to load
pub fn empty_list() -> Html {
    Html::trusted(format!(
        r#"<p class="text-muted text-center" style="grid-column:1/-1; padding: var(--space-8);">{}</p>"#,
        EMPTY_LIST_TEXT
    ))
}

/// Markup for the article body when the id is unknown
pub fn not_found() -> Html {
    Html::trusted(format!("<p>{}</p>", NOT_FOUND_TEXT))
}

/// Link to an article's detail page
pub fn article_href(root_path: &str, id: &str) -> String {
    format!("{}news/article/?id={}", root_path, urlencoding::encode(id))
}

// ============ News list ============

/// One card in the news list
#[derive(Debug, Clone, PartialEq)]
pub struct NewsCard {
    pub href: String,
    pub style: CategoryStyle,
    pub category: String,
    pub date_label: String,
    pub pinned: bool,
    pub title: String,
    pub summary: String,
}

impl NewsCard {
    pub fn from_article(article: &Article, root_path: &str) -> Self {
        Self {
            href: article_href(root_path, &article.id),
            style: article.style(),
            category: article.category.clone(),
            date_label: article.date_label(),
            pinned: article.pinned,
            title: article.title.clone(),
            summary: article.summary.clone(),
        }
    }

    pub fn render(&self) -> Html {
        let pinned_badge = if self.pinned {
            r#"<span class="badge badge--accent">置頂</span>"#
        } else {
            ""
        };

        Html::trusted(format!(
            r#"
      <a class="card news-card animate-on-scroll" href="{href}">
        <div class="news-card__accent news-card__accent--{style}"></div>
        <div class="news-card__body">
          <div class="news-card__meta">
            <span class="badge badge--{style}">{category}</span>
            <span class="news-card__date">{date}</span>
            {pinned_badge}
          </div>
          <h3 class="news-card__title">{title}</h3>
          <p class="news-card__summary">{summary}</p>
          <span class="news-card__link">閱讀更多 →</span>
        </div>
      </a>
    "#,
            href = Html::text(&self.href),
            style = self.style,
            category = Html::text(&self.category),
            date = Html::text(&self.date_label),
            pinned_badge = pinned_badge,
            title = Html::text(&self.title),
            summary = Html::text(&self.summary),
        ))
    }
}

/// Render a sequence of articles as news cards
pub fn news_list<'a, I>(articles: I, root_path: &str) -> Html
where
    I: IntoIterator<Item = &'a Article>,
{
    Html::join(
        articles
            .into_iter()
            .map(|a| NewsCard::from_article(a, root_path).render()),
    )
}

// ============ Article detail ============

/// Everything the detail page fills in for one article
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    /// Full `document.title`
    pub document_title: String,
    /// Heading and breadcrumb text
    pub title: String,
    /// Category badge and date
    pub meta: Html,
    /// Article body, newlines as `<br>`
    pub body: Html,
}

impl ArticleView {
    pub fn from_article(article: &Article, title_suffix: &str) -> Self {
        let meta = Html::trusted(format!(
            r#"
      <span class="badge badge--{style}">{category}</span>
      <span style="color: var(--color-neutral-500); font-size: var(--text-sm);">{date}</span>
    "#,
            style = article.style(),
            category = Html::text(&article.category),
            date = Html::text(&article.date_label()),
        ));

        Self {
            document_title: document_title(&article.title, title_suffix),
            title: article.title.clone(),
            meta,
            body: Html::multiline(&article.content),
        }
    }
}

/// Page title for an article: `"<title> ｜<suffix>"`
pub fn document_title(title: &str, suffix: &str) -> String {
    format!("{} ｜{}", title, suffix)
}

// ============ Course catalog ============

/// A course card inside a category panel
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard<'a> {
    pub course: &'a Course,
}

impl CourseCard<'_> {
    pub fn render(&self) -> Html {
        let c = self.course;
        Html::trusted(format!(
            r#"
            <div class="card" style="padding: var(--space-6);">
              <h4 style="font-family:var(--font-serif); margin-bottom: var(--space-3);">{name}</h4>
              <p style="font-size: var(--text-sm); color: var(--color-neutral-500); margin-bottom: var(--space-4); line-height: 1.7;">{description}</p>
              <div style="display:flex; gap: var(--space-2); flex-wrap:wrap;">
                <span class="badge badge--primary">🕒 {hours} 小時</span>
                <span class="badge badge--neutral">👥 {audience}</span>
                <span class="badge badge--accent">💰 {fee}</span>
              </div>
            </div>"#,
            name = Html::text(&c.name),
            description = Html::text(&c.description),
            hours = Html::text(&c.hours),
            audience = Html::text(&c.audience),
            fee = Html::text(&c.fee),
        ))
    }
}

/// One tab button plus its panel
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTab {
    /// Button text: icon and name
    pub label: String,
    pub active: bool,
    pub panel: Html,
}

impl CategoryTab {
    pub fn from_category(category: &CourseCategory, active: bool) -> Self {
        let label = if category.icon.is_empty() {
            category.name.clone()
        } else {
            format!("{} {}", category.icon, category.name)
        };

        Self {
            label,
            active,
            panel: category_panel(category),
        }
    }

    pub fn button_class(&self) -> &'static str {
        if self.active {
            "tab-btn active"
        } else {
            "tab-btn"
        }
    }

    pub fn panel_class(&self) -> &'static str {
        if self.active {
            "tab-panel active"
        } else {
            "tab-panel"
        }
    }

    pub fn render_button(&self) -> Html {
        Html::trusted(format!(
            r#"<button class="{}">{}</button>"#,
            self.button_class(),
            Html::text(&self.label)
        ))
    }

    pub fn render_panel(&self) -> Html {
        Html::trusted(format!(
            r#"<div class="{}">{}</div>"#,
            self.panel_class(),
            self.panel
        ))
    }
}

/// Panel contents for a category: a card grid, or the placeholder
pub fn category_panel(category: &CourseCategory) -> Html {
    if category.courses.is_empty() {
        return Html::trusted(format!(
            r#"<p class="text-muted" style="padding: var(--space-8); text-align: center;">{}</p>"#,
            EMPTY_CATEGORY_TEXT
        ));
    }

    let cards = Html::join(
        category
            .courses
            .iter()
            .map(|course| CourseCard { course }.render()),
    );
    Html::trusted(format!(
        r#"<div class="grid grid-3">{}
          </div>"#,
        cards
    ))
}

/// The whole catalog: tabs in data order, first one active
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    pub tabs: Vec<CategoryTab>,
}

impl CatalogView {
    pub fn from_catalog(catalog: &CourseCatalog) -> Self {
        Self {
            tabs: catalog
                .categories
                .iter()
                .enumerate()
                .map(|(i, cat)| CategoryTab::from_category(cat, i == 0))
                .collect(),
        }
    }

    /// Index of the active tab
    pub fn active_index(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            id: "2024-001".to_string(),
            title: "年會<公告>".to_string(),
            category: "活動".to_string(),
            date: "2024-03-09".to_string(),
            summary: "摘要 & 說明".to_string(),
            content: "第一行\n第二行".to_string(),
            pinned: true,
        }
    }

    #[test]
    fn test_news_card_escapes_and_links() {
        let html = NewsCard::from_article(&sample_article(), "/").render();
        let s = html.as_str();
        assert!(s.contains(r#"href="/news/article/?id=2024-001""#));
        assert!(s.contains("news-card__accent--event"));
        assert!(s.contains("年會&lt;公告&gt;"));
        assert!(s.contains("摘要 &amp; 說明"));
        assert!(s.contains("2024 年 3 月 9 日"));
        assert!(s.contains("置頂"));
    }

    #[test]
    fn test_article_href_encodes_id() {
        assert_eq!(article_href("/site/", "a b&c"), "/site/news/article/?id=a%20b%26c");
    }

    #[test]
    fn test_article_view() {
        let view = ArticleView::from_article(&sample_article(), "社團法人中華亞太文化交流協會");
        assert_eq!(view.document_title, "年會<公告> ｜社團法人中華亞太文化交流協會");
        assert_eq!(view.body.as_str(), "第一行<br>第二行");
        assert!(view.meta.as_str().contains("badge--event"));
    }

    #[test]
    fn test_empty_category_renders_placeholder() {
        let catalog = CourseCatalog {
            categories: vec![
                CourseCategory {
                    icon: "🎨".to_string(),
                    name: "藝術".to_string(),
                    courses: vec![],
                },
                CourseCategory {
                    icon: "📚".to_string(),
                    name: "語言".to_string(),
                    courses: vec![Course {
                        name: "華語入門".to_string(),
                        description: "基礎".to_string(),
                        hours: "12".to_string(),
                        audience: "成人".to_string(),
                        fee: "免費".to_string(),
                    }],
                },
            ],
        };

        let view = CatalogView::from_catalog(&catalog);
        assert_eq!(view.tabs.len(), 2);
        assert_eq!(view.active_index(), Some(0));
        assert_eq!(view.tabs[0].label, "🎨 藝術");
        assert!(view.tabs[0].panel.as_str().contains(EMPTY_CATEGORY_TEXT));
        assert!(!view.tabs[0].panel.as_str().contains("grid-3"));
        assert!(view.tabs[1].panel.as_str().contains("grid grid-3"));
        assert!(view.tabs[1].panel.as_str().contains("🕒 12 小時"));
        assert_eq!(view.tabs[1].button_class(), "tab-btn");
        assert_eq!(view.tabs[0].render_button().as_str(), r#"<button class="tab-btn active">🎨 藝術</button>"#);
    }

    #[test]
    fn test_empty_catalog_has_no_active_tab() {
        let view = CatalogView::from_catalog(&CourseCatalog::default());
        assert_eq!(view.active_index(), None);
    }
}
