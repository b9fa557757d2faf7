//! Site content
//!
//! - **model**: `news.json` and `courses.json` data types
//! - **render**: view-models and their markup
//! - **loader**: fetch, sort, render, fall back on failure
//! - **check**: data problems the rendered pages would hide
//!
//! ```rust,no_run
//! use apcea::config::SiteConfig;
//! use apcea::content::ContentLoader;
//! use apcea::fetch::DirFetcher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let loader = ContentLoader::new(DirFetcher::new("./site"), &SiteConfig::default(), "/");
//!     let list = loader.render_list(Some(3)).await;
//!     println!("{}", list.html());
//! }
//! ```

pub mod check;
pub mod loader;
pub mod model;
pub mod render;

pub use check::{check_catalog, check_news, Issue, Severity};
pub use loader::{
    query_param, ContentLoader, DetailOutcome, Rendered, ARTICLE_ID_PARAM, COURSES_RESOURCE,
    NEWS_RESOURCE,
};
pub use model::{Article, CategoryStyle, Course, CourseCatalog, CourseCategory, NewsFeed};
pub use render::{ArticleView, CatalogView, CategoryTab, CourseCard, NewsCard};
