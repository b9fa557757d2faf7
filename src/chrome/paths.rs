//! Root path handling
//!
//! Pages live at different depths but share one navbar and footer. The
//! shared fragments write their links relative to a page one level down
//! (`../about/`); before injection those are rewritten against the site's
//! root path so they resolve the same from any page.

use regex::Regex;
use std::sync::OnceLock;

/// Directory every site asset lives under, used to locate the root
pub const ASSETS_MARKER: &str = "/assets/";

/// Force a root path into `/like/this/` form
pub fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Path component of a URL (`https://host/a/b?x` → `/a/b`)
pub fn url_path(url: &str) -> &str {
    let without_scheme = match url.find("://") {
        Some(i) => {
            let rest = &url[i + 3..];
            rest.find('/').map(|j| &rest[j..]).unwrap_or("/")
        }
        None => url,
    };
    crate::fetch::strip_query(without_scheme)
}

/// Derive the site root from the URL a script was loaded from
///
/// Everything before the first `/assets/` segment is the root:
/// `https://host/sub/assets/pkg/apcea_ui.js` → `/sub/`. Returns `None` when
/// the script doesn't live under an assets directory.
pub fn root_from_script_url(script_url: &str) -> Option<String> {
    let path = url_path(script_url);
    let index = path.find(ASSETS_MARKER)?;
    Some(normalize_root(&path[..index]))
}

fn relative_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(^|\s)(href|src)=(["']?)(?:\.\./)+"#).expect("static regex is valid")
    })
}

/// Rewrite `href`/`src` values that start with `../` to start at `root`
///
/// Quoted and unquoted attribute values are both handled.
pub fn rewrite_relative_paths(html: &str, root: &str) -> String {
    relative_attr_regex()
        .replace_all(html, |caps: &regex::Captures<'_>| {
            format!("{}{}={}{}", &caps[1], &caps[2], &caps[3], root)
        })
        .into_owned()
}

/// Whether a navigation link points at the page being shown
///
/// The root link is active only on the home page; every other link is
/// active for its own page and anything below it.
pub fn nav_link_is_active(href: &str, current_path: &str, root: &str) -> bool {
    let href = url_path(href);
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let href = href.strip_suffix("index.html").unwrap_or(href);
    let current = url_path(current_path);

    if href == root || href == "/" {
        let home = current.strip_suffix("index.html").unwrap_or(current);
        return home == root;
    }
    current.starts_with(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root(""), "/");
        assert_eq!(normalize_root("/"), "/");
        assert_eq!(normalize_root("sub"), "/sub/");
        assert_eq!(normalize_root("/a/b"), "/a/b/");
    }

    #[test]
    fn test_root_from_script_url() {
        assert_eq!(
            root_from_script_url("https://example.org/assets/pkg/apcea_ui.js").as_deref(),
            Some("/")
        );
        assert_eq!(
            root_from_script_url("https://example.org/sub/site/assets/js/main.js?v=2").as_deref(),
            Some("/sub/site/")
        );
        assert_eq!(root_from_script_url("/assets/pkg/x.js").as_deref(), Some("/"));
        assert_eq!(
            root_from_script_url("https://example.org/sub/assets/pkg/snippets/apcea-ui-1f2e/inline0.js")
                .as_deref(),
            Some("/sub/")
        );
        assert_eq!(root_from_script_url("https://cdn.example.org/x.js"), None);
    }

    #[test]
    fn test_rewrite_relative_paths() {
        let fragment = r##"<a class="nav-link" href="../about/">關於</a>
<img src="../../assets/img/logo.png" alt="">
<a href='../news/'>消息</a>
<a href="https://example.org/">外部</a>
<a href="#top">頂部</a>
<a data-href="../keep/">x</a>
<a href=../courses/>課程</a>"##;

        let rewritten = rewrite_relative_paths(fragment, "/sub/");
        assert!(rewritten.contains(r#"href="/sub/about/""#));
        assert!(rewritten.contains(r#"src="/sub/assets/img/logo.png""#));
        assert!(rewritten.contains("href='/sub/news/'"));
        assert!(rewritten.contains(r#"href="https://example.org/""#));
        assert!(rewritten.contains(r##"href="#top""##));
        assert!(rewritten.contains(r#"data-href="../keep/""#));
        assert!(rewritten.contains("<a href=/sub/courses/>"));
    }

    #[test]
    fn test_nav_link_active() {
        assert!(nav_link_is_active("/", "/", "/"));
        assert!(nav_link_is_active("/", "/index.html", "/"));
        assert!(!nav_link_is_active("/", "/news/", "/"));

        assert!(nav_link_is_active("/news/", "/news/", "/"));
        assert!(nav_link_is_active("/news/", "/news/article/", "/"));
        assert!(!nav_link_is_active("/news/", "/courses/", "/"));

        assert!(nav_link_is_active("/sub/", "/sub/index.html", "/sub/"));
        assert!(nav_link_is_active("/sub/about/index.html", "/sub/about/", "/sub/"));
        assert!(!nav_link_is_active("#contact", "/", "/"));
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("https://example.org"), "/");
        assert_eq!(url_path("https://example.org/a/b?x=1#y"), "/a/b");
        assert_eq!(url_path("/a/"), "/a/");
    }
}
