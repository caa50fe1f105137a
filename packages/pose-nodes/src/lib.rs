
mod macros;
mod name;
mod shadow;

pub use name::{is_valid_custom_element_name, InvalidName, RESERVED_NAMES};
pub use shadow::{can_host_shadow, ShadowError, ShadowMode};

use std::hash::Hash;

use wasm_bindgen::{convert::FromWasmAbi, JsCast};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Fragment,
    ShadowRoot,
}

/// A handle to a node. Equality and hashing follow handle identity.
pub trait Node: Clone + Eq + Hash + Sized + 'static {
    fn element(namespace: Option<&str>, name: &str) -> Self;

    fn text() -> Self;

    fn fragment() -> Self;

    fn ty(&self) -> NodeType;

    /// Lowercase local name of an element node, `None` for every other node type.
    fn tag(&self) -> Option<String>;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    fn first_child(&self) -> Option<Self> {
        self.children().into_iter().next()
    }

    fn next_sibling(&self) -> Option<Self>;

    fn insert(&self, child: &Self, before: Option<&Self>);

    fn remove(&self, child: &Self);

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String;

    fn set_text(&self, content: &str);

    fn attr(&self, name: &str) -> Option<String>;

    fn set_attr(&self, name: &str, value: &str);

    fn remove_attr(&self, name: &str);

    /// Attaches a shadow root to an element and returns it.
    ///
    /// A host can carry at most one shadow root for its whole lifetime.
    fn attach_shadow(&self, mode: ShadowMode) -> Result<Self, ShadowError>;

    /// The shadow root of `self`, if one is attached in [`ShadowMode::Open`].
    fn shadow_root(&self) -> Option<Self>;

    /// The shadow root of `self` in either mode, as seen by the element's own
    /// implementation through `ElementInternals`.
    fn internal_shadow_root(&self) -> Option<Self>;

    /// The host element of a shadow root.
    fn host(&self) -> Option<Self>;

    /// Whether the node is reachable from a document, crossing shadow boundaries.
    fn is_connected(&self) -> bool;

    fn event<E, F>(&self, event: &E, f: F)
    where
        E: EventKey,
        F: Fn(E::Event) + 'static;
}

pub trait EventKey {
    type Event: FromWasmAbi + JsCast;

    fn name(&self) -> &str;
}

impl EventKey for &str {
    type Event = web_sys::Event;

    fn name(&self) -> &str {
        self
    }
}

impl EventKey for String {
    type Event = web_sys::Event;

    fn name(&self) -> &str {
        self.as_str()
    }
}
