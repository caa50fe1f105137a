use pose_nodes::Node;

/// CSS text resolved at build time, usually through `include_str!`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Stylesheet(&'static str);

impl Stylesheet {
    pub const fn new(css: &'static str) -> Self {
        Self(css)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts a `<style>` carrying the stylesheet as the first child of `root`.
    pub fn inject<N: Node>(&self, root: &N) -> N {
        let text = N::text();
        text.set_text(self.0);

        let style = N::element(None, "style");
        style.insert(&text, None);

        root.insert(&style, root.first_child().as_ref());
        style
    }
}
