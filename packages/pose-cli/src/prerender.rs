use anyhow::{Context, Result};
use pose_canvas::TAG_NAME;
use pose_element::{Document, Registry};
use pose_nodes::{element, text, Node};
use pose_render::NodeRef;

use crate::config::Config;

/// A static page holding prerendered `<pose-canvas>` elements.
///
/// Every element carries its shadow root as a declarative template, so the
/// page paints styled before the wasm module loads and the browser hands the
/// same root back when the element is upgraded.
pub struct Page {
    document: Document<NodeRef>,
    body: NodeRef,
}

impl Page {
    pub fn new(config: &Config) -> Result<Self> {
        let mut registry = Registry::new();
        pose_canvas::register_with_mode(&mut registry, config.element.mode)
            .context("failed to define the element")?;

        let body: NodeRef = element!("body");
        let html: NodeRef = element!("html", {
            lang => "en";
            element!("head", {
                element!("meta", { charset => "utf-8" });
                element!("title", { text!(config.prerender.title) });
            });
            body;
        });

        let root = NodeRef::document();
        root.insert(&html, None);
        let mut page = Self {
            document: Document::new(root, registry),
            body,
        };

        for _ in 0..config.prerender.count {
            page.push()?;
        }
        Ok(page)
    }

    /// Appends one more element to the body.
    pub fn push(&mut self) -> Result<()> {
        let host: NodeRef = element!(TAG_NAME);
        self.document
            .append(&self.body, &host)
            .with_context(|| format!("failed to render `<{TAG_NAME}>`"))?;
        tracing::trace!(count = self.len(), "prerendered element");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.document.adapters().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        format!("<!DOCTYPE html>\n{}", self.document.root())
    }
}

#[cfg(test)]
mod tests {
    use pose_nodes::ShadowMode;

    use super::Page;
    use crate::config::Config;

    fn config(count: usize, mode: ShadowMode) -> Config {
        let mut config = Config::default();
        config.prerender.count = count;
        config.element.mode = mode;
        config
    }

    #[test]
    fn renders_one_template_per_element() {
        let page = Page::new(&config(3, ShadowMode::Open)).unwrap();
        let html = page.render();

        assert_eq!(page.len(), 3);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.lines().any(|line| line.trim() == "<title>"));
        assert!(html.lines().any(|line| line.trim() == "pose-canvas"));
        assert_eq!(html.matches("<pose-canvas>").count(), 3);
        assert_eq!(html.matches("<template shadowrootmode=\"open\">").count(), 3);
        assert_eq!(html.matches("<style>").count(), 3);
    }

    #[test]
    fn closed_mode_is_serialized() {
        let html = Page::new(&config(1, ShadowMode::Closed)).unwrap().render();

        assert!(html.contains("<template shadowrootmode=\"closed\">"));
        assert!(!html.contains("shadowrootmode=\"open\""));
    }

    #[test]
    fn zero_count_renders_an_empty_body() {
        let mut page = Page::new(&config(0, ShadowMode::Open)).unwrap();
        assert!(page.is_empty());
        assert!(page.render().contains("<body></body>"));

        page.push().unwrap();
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn title_is_escaped() {
        let mut config = config(0, ShadowMode::Open);
        config.prerender.title = "Poses <&> more".to_string();

        let html = Page::new(&config).unwrap().render();
        assert!(html.contains("Poses &lt;&amp;&gt; more"));
    }
}
