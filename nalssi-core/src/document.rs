//! Thin accessor over a parsed weather page.
//!
//! Lookups never panic: a missing node, a missing attribute or an invalid
//! selector all come back as `None`.

use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            tracing::warn!(css, "invalid selector: {err}");
            None
        }
    }
}

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(raw: &str) -> Self {
        Self { html: Html::parse_document(raw) }
    }

    pub fn select_first(&self, css: &str) -> Option<Node<'_>> {
        let sel = selector(css)?;
        self.html.select(&sel).next().map(Node)
    }

    pub fn select_all(&self, css: &str) -> Vec<Node<'_>> {
        match selector(css) {
            Some(sel) => self.html.select(&sel).map(Node).collect(),
            None => Vec::new(),
        }
    }

    /// Raw text of the last `<script>` without a `src` attribute.
    pub fn last_inline_script(&self) -> Option<String> {
        self.select_all("script:not([src])")
            .last()
            .map(|script| script.raw_text())
    }
}

/// An element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn select_first(&self, css: &str) -> Option<Node<'a>> {
        let sel = selector(css)?;
        self.0.select(&sel).next().map(Node)
    }

    pub fn select_all(&self, css: &str) -> Vec<Node<'a>> {
        match selector(css) {
            Some(sel) => self.0.select(&sel).map(Node).collect(),
            None => Vec::new(),
        }
    }

    /// Lower-case tag name.
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Visible text with runs of whitespace collapsed to one space.
    pub fn text(&self) -> String {
        self.0
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text exactly as it appears in the source.
    pub fn raw_text(&self) -> String {
        self.0.text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
            <script src="/static/app.js"></script>
            <script>var first = 1;</script>
        </head><body>
            <div class="weather_area">
                <strong class="current">
                    <span class="blind">현재 온도</span>21°
                </strong>
                <span class="weather" data-code="1">맑음</span>
            </div>
            <script>var last = 2;</script>
            <script src="/static/tracker.js"></script>
        </body></html>
    "#;

    #[test]
    fn last_inline_script_skips_external_scripts() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.last_inline_script().as_deref(), Some("var last = 2;"));
    }

    #[test]
    fn text_collapses_whitespace() {
        let doc = Document::parse(PAGE);
        let current = doc.select_first(".weather_area .current").expect("current node");
        assert_eq!(current.text(), "현재 온도 21°");
    }

    #[test]
    fn missing_nodes_and_attributes_are_none() {
        let doc = Document::parse(PAGE);
        let area = doc.select_first(".weather_area").expect("area");

        assert!(area.select_first(".summary_rainfall").is_none());
        assert_eq!(area.select_first(".weather").and_then(|n| n.attr("data-code")), Some("1"));
        assert!(area.select_first(".weather").and_then(|n| n.attr("data-missing")).is_none());
        assert!(doc.select_first("[[invalid").is_none());
        assert!(doc.select_all("[[invalid").is_empty());
    }
}
