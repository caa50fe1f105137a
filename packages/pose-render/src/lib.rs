use std::{
    cell::{Ref, RefCell, RefMut},
    fmt::{self, Write},
    hash::{Hash, Hasher},
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use pose_nodes::{can_host_shadow, EventKey, Node, NodeType, ShadowError, ShadowMode};

// Reference: https://developer.mozilla.org/en-US/docs/Glossary/Void_element
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// Elements whose text children are serialized without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// In-memory node, rendered to HTML through its [`Display`](fmt::Display) impl.
///
/// Shadow roots are serialized as declarative `<template shadowrootmode>`
/// children placed before the light children of their host.
#[derive(Clone, Debug)]
pub struct NodeRef(Rc<RefCell<Inner>>);

type WeakNode = Weak<RefCell<Inner>>;

struct Inner {
    parent: Option<WeakNode>,
    kind: NodeKind,
}

#[derive(Debug)]
enum NodeKind {
    Document(Vec<NodeRef>),
    Element {
        namespace: Option<String>,
        name: String,
        attrs: IndexMap<String, String>,
        shadow: Option<NodeRef>,
        children: Vec<NodeRef>,
    },
    Fragment(Vec<NodeRef>),
    ShadowRoot {
        mode: ShadowMode,
        host: WeakNode,
        children: Vec<NodeRef>,
    },
    Text(String),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        match &inner.kind {
            NodeKind::Element {
                namespace,
                name,
                attrs,
                shadow,
                children,
            } => {
                let tag = namespace
                    .as_ref()
                    .map(|ns| format!("{ns}:{name}"))
                    .unwrap_or(name.clone());

                let mut buf = String::new();
                if let Some(shadow) = shadow {
                    writeln!(&mut buf, "{shadow}")?;
                }
                for child in children {
                    writeln!(&mut buf, "{child}")?;
                }
                let indented = indent(&buf);

                let attrs = attrs
                    .iter()
                    .map(|(name, value)| format!(" {name}=\"{}\"", escape(value)))
                    .collect::<Vec<_>>()
                    .join("");

                if !indented.is_empty() {
                    write!(f, "<{tag}{attrs}>\n{indented}\n</{tag}>")
                } else if VOID_ELEMENTS.contains(&tag.to_lowercase().as_str()) {
                    write!(f, "<{tag}{attrs}>")
                } else {
                    write!(f, "<{tag}{attrs}></{tag}>")
                }
            }
            NodeKind::ShadowRoot { mode, children, .. } => {
                let mut buf = String::new();
                for child in children {
                    writeln!(&mut buf, "{child}")?;
                }
                let indented = indent(&buf);

                if indented.is_empty() {
                    write!(f, "<template shadowrootmode=\"{mode}\"></template>")
                } else {
                    write!(
                        f,
                        "<template shadowrootmode=\"{mode}\">\n{indented}\n</template>"
                    )
                }
            }
            NodeKind::Document(children) | NodeKind::Fragment(children) => {
                for child in children {
                    writeln!(f, "{child}")?;
                }
                Ok(())
            }
            NodeKind::Text(text) => {
                let raw = self
                    .parent()
                    .and_then(|parent| parent.tag())
                    .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag.as_str()));

                if raw {
                    f.write_str(text)
                } else {
                    f.write_str(&escape(text))
                }
            }
        }
    }
}

impl NodeRef {
    fn new(kind: NodeKind) -> Self {
        let inner = Inner { parent: None, kind };
        Self(Rc::new(RefCell::new(inner)))
    }

    /// Creates the root of a live document. Nodes inserted below it are connected.
    pub fn document() -> Self {
        Self::new(NodeKind::Document(vec![]))
    }

    /// Shadow mode of a shadow root node.
    pub fn mode(&self) -> Option<ShadowMode> {
        match &self.0.borrow().kind {
            NodeKind::ShadowRoot { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    fn children_ref(&self) -> Option<Ref<Vec<Self>>> {
        let inner = self.0.borrow();
        Ref::filter_map(inner, |inner| match &inner.kind {
            NodeKind::Document(children)
            | NodeKind::Element { children, .. }
            | NodeKind::Fragment(children)
            | NodeKind::ShadowRoot { children, .. } => Some(children),
            NodeKind::Text(_) => None,
        })
        .ok()
    }

    fn children_mut(&self) -> Option<RefMut<Vec<Self>>> {
        let inner = self.0.borrow_mut();
        RefMut::filter_map(inner, |inner| match &mut inner.kind {
            NodeKind::Document(children)
            | NodeKind::Element { children, .. }
            | NodeKind::Fragment(children)
            | NodeKind::ShadowRoot { children, .. } => Some(children),
            NodeKind::Text(_) => None,
        })
        .ok()
    }
}

impl Node for NodeRef {
    fn element(namespace: Option<&str>, name: &str) -> Self {
        let kind = NodeKind::Element {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            attrs: IndexMap::new(),
            shadow: None,
            children: vec![],
        };
        Self::new(kind)
    }

    fn text() -> Self {
        Self::new(NodeKind::Text(String::new()))
    }

    fn fragment() -> Self {
        Self::new(NodeKind::Fragment(vec![]))
    }

    fn ty(&self) -> NodeType {
        match &self.0.borrow().kind {
            NodeKind::Document(_) => NodeType::Document,
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Fragment(_) => NodeType::Fragment,
            NodeKind::ShadowRoot { .. } => NodeType::ShadowRoot,
            NodeKind::Text(_) => NodeType::Text,
        }
    }

    fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { name, .. } => Some(name.to_lowercase()),
            _ => None,
        }
    }

    fn parent(&self) -> Option<Self> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(NodeRef)
    }

    fn children(&self) -> Vec<Self> {
        self.children_ref()
            .map(|children| children.clone())
            .unwrap_or_default()
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let children = parent.children_ref()?;

        let idx = children.iter().position(|node| node == self)?;
        children.get(idx + 1).cloned()
    }

    fn insert(&self, child: &Self, before: Option<&Self>) {
        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        let mut children = self
            .children_mut()
            .expect("only container nodes can have children");
        let idx = if let Some(before) = before {
            children
                .iter()
                .position(|node| node == before)
                .expect("not a parent of insertion point node")
        } else {
            children.len()
        };
        children.insert(idx, child.clone());

        child.0.borrow_mut().parent.replace(Rc::downgrade(&self.0));
    }

    fn remove(&self, child: &Self) {
        let mut children = self
            .children_mut()
            .expect("only container nodes can have children");
        let idx = children
            .iter()
            .position(|node| node == child)
            .expect("not a parent of child node");
        children.remove(idx);

        child.0.borrow_mut().parent.take();
    }

    fn text_content(&self) -> String {
        if let NodeKind::Text(text) = &self.0.borrow().kind {
            return text.clone();
        }

        self.children()
            .iter()
            .map(Node::text_content)
            .collect::<String>()
    }

    fn set_text(&self, content: &str) {
        match &mut self.0.borrow_mut().kind {
            NodeKind::Text(text) => {
                *text = content.to_string();
            }
            _ => panic!("can only set text content of text nodes"),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.borrow().kind {
            attrs.get(name).cloned()
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn set_attr(&self, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            attrs.insert(name.to_string(), value.to_string());
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn remove_attr(&self, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            attrs.shift_remove(name);
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn attach_shadow(&self, mode: ShadowMode) -> Result<Self, ShadowError> {
        let mut inner = self.0.borrow_mut();
        let NodeKind::Element { name, shadow, .. } = &mut inner.kind else {
            return Err(ShadowError::NotElement);
        };

        if shadow.is_some() {
            return Err(ShadowError::AlreadyAttached);
        }
        if !can_host_shadow(&name.to_lowercase()) {
            return Err(ShadowError::Unsupported(name.clone()));
        }

        let root = Self::new(NodeKind::ShadowRoot {
            mode,
            host: Rc::downgrade(&self.0),
            children: vec![],
        });
        shadow.replace(root.clone());
        Ok(root)
    }

    fn shadow_root(&self) -> Option<Self> {
        match &self.0.borrow().kind {
            NodeKind::Element {
                shadow: Some(shadow),
                ..
            } if shadow.mode() == Some(ShadowMode::Open) => Some(shadow.clone()),
            _ => None,
        }
    }

    fn internal_shadow_root(&self) -> Option<Self> {
        match &self.0.borrow().kind {
            NodeKind::Element { shadow, .. } => shadow.clone(),
            _ => None,
        }
    }

    fn host(&self) -> Option<Self> {
        match &self.0.borrow().kind {
            NodeKind::ShadowRoot { host, .. } => host.upgrade().map(NodeRef),
            _ => None,
        }
    }

    fn is_connected(&self) -> bool {
        let mut node = self.clone();
        loop {
            let next = match &node.0.borrow().kind {
                NodeKind::Document(_) => return true,
                NodeKind::ShadowRoot { host, .. } => host.upgrade().map(NodeRef),
                _ => node.parent(),
            };

            match next {
                Some(next) => node = next,
                None => return false,
            }
        }
    }

    fn event<E, F>(&self, _event: &E, _f: F)
    where
        E: EventKey,
        F: Fn(E::Event) + 'static,
    {
        // no-op, since events don't exist on renders
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl Hash for NodeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

fn indent(buf: &str) -> String {
    buf.lines()
        .filter(|line| !line.is_empty())
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// Reference: https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html#output-encoding-for-html-contexts
fn escape(text: &str) -> String {
    let mut output = String::new();
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use pose_nodes::{element, text, Node, ShadowMode};

    use super::NodeRef;

    #[test]
    fn node_behavior() {
        pose_nodes::behavior_tests!(NodeRef, NodeRef::document());
    }

    #[test]
    fn renders_declarative_shadow_root() {
        let host: NodeRef = element!("pose-canvas", { id => "main" });
        let shadow = host.attach_shadow(ShadowMode::Open).unwrap();
        let style: NodeRef = element!("style", { text!("a > b { color: red; }") });
        shadow.insert(&style, None);
        shadow.insert(&element!("p", { text!("1 < 2") }), None);

        assert_eq!(
            host.to_string(),
            [
                "<pose-canvas id=\"main\">",
                "  <template shadowrootmode=\"open\">",
                "    <style>",
                "      a > b { color: red; }",
                "    </style>",
                "    <p>",
                "      1 &lt; 2",
                "    </p>",
                "  </template>",
                "</pose-canvas>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn renders_closed_and_void_elements() {
        let host: NodeRef = element!("pose-canvas");
        host.attach_shadow(ShadowMode::Closed).unwrap();
        let br: NodeRef = element!("br");
        host.insert(&br, None);

        assert_eq!(
            host.to_string(),
            [
                "<pose-canvas>",
                "  <template shadowrootmode=\"closed\"></template>",
                "  <br>",
                "</pose-canvas>",
            ]
            .join("\n")
        );
    }

    #[test]
    fn moves_nodes_between_parents() {
        let a: NodeRef = element!("div");
        let b: NodeRef = element!("div");
        let child: NodeRef = element!("span");

        a.insert(&child, None);
        b.insert(&child, None);

        assert!(a.children().is_empty());
        assert_eq!(b.children(), vec![child.clone()]);
        assert_eq!(child.parent(), Some(b));
    }

    #[test]
    fn text_content_skips_shadow_tree() {
        let host: NodeRef = element!("pose-canvas", { text!("light") });
        let shadow = host.attach_shadow(ShadowMode::Open).unwrap();
        shadow.insert(&text!("shadow"), None);

        assert_eq!(host.text_content(), "light");
        assert_eq!(shadow.text_content(), "shadow");
    }
}
