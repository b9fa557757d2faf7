//! Shared page chrome
//!
//! - **paths**: root path derivation and fragment link rewriting
//! - [`TemplateInjector`]: fetches the navbar and footer fragments
//! - [`ChromeLayout`]: scroll thresholds for the navbar, back-to-top
//!   button and anchor jumps
//! - [`MobileMenu`]: open/closed state of the mobile navigation

pub mod paths;

use chrono::Datelike;

use crate::config::{ChromeConfig, SiteConfig};
use crate::fetch::{FetchResult, ResourceFetcher};
use crate::html::Html;

pub use paths::{
    nav_link_is_active, normalize_root, rewrite_relative_paths, root_from_script_url, url_path,
};

/// Attribute set on a placeholder once its fragment is in place
pub const LOADED_ATTRIBUTE: &str = "data-loaded";

/// A shared HTML fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Navbar,
    Footer,
}

impl Fragment {
    pub const ALL: [Fragment; 2] = [Fragment::Navbar, Fragment::Footer];

    pub fn file_name(&self) -> &'static str {
        match self {
            Fragment::Navbar => "navbar.html",
            Fragment::Footer => "footer.html",
        }
    }

    /// Element the fragment is spliced into
    pub fn placeholder_selector(&self) -> &'static str {
        match self {
            Fragment::Navbar => "#navbar-placeholder",
            Fragment::Footer => "#footer-placeholder",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "navbar" => Some(Fragment::Navbar),
            "footer" => Some(Fragment::Footer),
            _ => None,
        }
    }
}

/// Fetches shared fragments and rewrites their links for the current root
pub struct TemplateInjector<F> {
    fetcher: F,
    root_path: String,
    templates_dir: String,
}

impl<F: ResourceFetcher> TemplateInjector<F> {
    pub fn new(fetcher: F, site: &SiteConfig, root_path: &str) -> Self {
        Self {
            fetcher,
            root_path: root_path.to_string(),
            templates_dir: site.templates_dir.trim_matches('/').to_string(),
        }
    }

    pub fn template_url(&self, fragment: Fragment) -> String {
        format!(
            "{}{}/{}",
            self.root_path,
            self.templates_dir,
            fragment.file_name()
        )
    }

    /// Fetch one fragment, links already rewritten
    pub async fn fetch(&self, fragment: Fragment) -> FetchResult<Html> {
        let raw = self.fetcher.fetch_text(&self.template_url(fragment)).await?;
        Ok(Html::trusted(rewrite_relative_paths(&raw, &self.root_path)))
    }

    /// Fetch one fragment, logging and yielding `None` on failure
    pub async fn load(&self, fragment: Fragment) -> Option<Html> {
        match self.fetch(fragment).await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(
                    url = %self.template_url(fragment),
                    error = %e,
                    "模板載入失敗"
                );
                None
            }
        }
    }

    /// Fetch the navbar and footer concurrently
    ///
    /// Resolves once both requests have settled.
    pub async fn load_all(&self) -> (Option<Html>, Option<Html>) {
        futures_util::future::join(self.load(Fragment::Navbar), self.load(Fragment::Footer)).await
    }
}

/// Scroll-driven chrome behaviour
#[derive(Debug, Clone)]
pub struct ChromeLayout {
    config: ChromeConfig,
}

impl ChromeLayout {
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }

    /// Navbar switches to its compact style past the threshold
    pub fn navbar_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.config.navbar_scroll_threshold
    }

    pub fn back_to_top_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.config.back_to_top_threshold
    }

    /// Scroll position that puts an anchor target just below the fixed
    /// navbar
    pub fn anchor_scroll_top(&self, target_top: f64, navbar_height: Option<f64>) -> f64 {
        let navbar = navbar_height
            .filter(|h| *h > 0.0)
            .unwrap_or(self.config.fallback_navbar_height);
        target_top - (navbar + self.config.anchor_offset_px)
    }
}

impl Default for ChromeLayout {
    fn default() -> Self {
        Self::new(ChromeConfig::default())
    }
}

/// Open/closed state of the mobile menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger click
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Overlay click or Escape
    ///
    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Value for `body.style.overflow`: scroll is locked while open
    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }
}

/// Year stamped into `.footer-year`
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    const NAVBAR: &str = r#"<nav class="navbar"><a class="nav-link" href="../news/">最新消息</a></nav>"#;

    #[tokio::test]
    async fn test_load_all_rewrites_and_tolerates_failure() {
        let fetcher = MemoryFetcher::new()
            .with_body("/sub/assets/templates/navbar.html", NAVBAR)
            .with_status("/sub/assets/templates/footer.html", 500);
        let injector = TemplateInjector::new(fetcher, &SiteConfig::default(), "/sub/");

        let (navbar, footer) = injector.load_all().await;
        let navbar = navbar.unwrap();
        assert!(navbar.as_str().contains(r#"href="/sub/news/""#));
        assert!(footer.is_none());
    }

    #[test]
    fn test_template_url() {
        let injector = TemplateInjector::new(MemoryFetcher::new(), &SiteConfig::default(), "/");
        assert_eq!(injector.template_url(Fragment::Footer), "/assets/templates/footer.html");
    }

    #[test]
    fn test_fragment_parse() {
        assert_eq!(Fragment::parse("navbar"), Some(Fragment::Navbar));
        assert_eq!(Fragment::parse("sidebar"), None);
        assert_eq!(Fragment::Footer.placeholder_selector(), "#footer-placeholder");
    }

    #[test]
    fn test_scroll_thresholds() {
        let layout = ChromeLayout::default();
        assert!(!layout.navbar_scrolled(80.0));
        assert!(layout.navbar_scrolled(81.0));
        assert!(!layout.back_to_top_visible(300.0));
        assert!(layout.back_to_top_visible(301.0));
    }

    #[test]
    fn test_anchor_offset() {
        let layout = ChromeLayout::default();
        assert_eq!(layout.anchor_scroll_top(1000.0, Some(64.0)), 920.0);
        assert_eq!(layout.anchor_scroll_top(1000.0, None), 914.0);
        assert_eq!(layout.anchor_scroll_top(1000.0, Some(0.0)), 914.0);
    }

    #[test]
    fn test_mobile_menu() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.body_overflow(), "");
        assert!(menu.toggle());
        assert_eq!(menu.body_overflow(), "hidden");
        assert!(menu.close());
        assert!(!menu.close());
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(!menu.toggle());
    }

    #[test]
    fn test_current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
