//! HTML output type
//!
//! Markup produced by the renderers is carried as [`Html`] so that raw text
//! and finished markup can't be mixed up. Text only becomes markup through
//! [`escape`] or [`Html::text`].

use std::fmt;

/// A fragment of finished markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    /// Wrap a trusted literal fragment (templates owned by this crate)
    pub fn trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escape plain text into markup
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    /// Escape multi-line text, turning each newline into `<br>`
    pub fn multiline(text: &str) -> Self {
        let escaped = escape(text).replace("\r\n", "\n");
        Self(escaped.replace('\n', "<br>"))
    }

    /// Concatenate fragments
    pub fn join<I: IntoIterator<Item = Html>>(parts: I) -> Self {
        Self(parts.into_iter().map(|h| h.0).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Html> for String {
    fn from(html: Html) -> Self {
        html.0
    }
}

/// Escape text for use in element content and quoted attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
