//! Browser backend for `pose-nodes`, built on `web-sys`.

mod custom_elements;

pub use custom_elements::CustomElements;

use std::{
    cell::RefCell,
    hash::{Hash, Hasher},
    rc::{Rc, Weak},
    thread_local,
};

use pose_nodes::{can_host_shadow, EventKey, Node, NodeType, ShadowError, ShadowMode};
use wasm_bindgen::{intern, prelude::*};

thread_local! {
    static WINDOW: web_sys::Window = web_sys::window().expect("JavaScript window undefined");

    static DOCUMENT: web_sys::Document = web_sys::window()
        .and_then(|window| window.document())
        .expect("JavaScript window.document undefined");
}

pub fn window() -> web_sys::Window {
    WINDOW.with(Clone::clone)
}

pub fn document() -> web_sys::Document {
    DOCUMENT.with(Clone::clone)
}

#[derive(Clone, Debug)]
pub struct DomNode(Rc<Inner>);

type WeakNode = Weak<Inner>;
type EventClosure = Closure<dyn Fn(web_sys::Event)>;

#[derive(Debug)]
struct Inner {
    native: web_sys::Node,
    ty: NodeType,

    parent: RefCell<Option<WeakNode>>,
    children: RefCell<Vec<DomNode>>,
    events: RefCell<Vec<EventClosure>>,

    shadow: RefCell<Option<DomNode>>,
    host: RefCell<Option<WeakNode>>,
}

impl DomNode {
    fn new(native: web_sys::Node, ty: NodeType) -> Self {
        Self(Rc::new(Inner {
            native,
            ty,
            parent: RefCell::default(),
            children: RefCell::default(),
            events: RefCell::default(),
            shadow: RefCell::default(),
            host: RefCell::default(),
        }))
    }

    pub fn native(&self) -> &web_sys::Node {
        &self.0.native
    }

    /// Wraps an existing native node, e.g. a custom element host or `document.body`.
    ///
    /// Children already present under `native` are not tracked by the wrapper.
    pub fn from_native(native: web_sys::Node) -> Option<Self> {
        let ty = if native.has_type::<web_sys::ShadowRoot>() {
            NodeType::ShadowRoot
        } else if native.has_type::<web_sys::Document>() {
            NodeType::Document
        } else if native.has_type::<web_sys::Element>() {
            NodeType::Element
        } else if native.has_type::<web_sys::Text>() {
            NodeType::Text
        } else if native.has_type::<web_sys::Comment>() {
            NodeType::Fragment
        } else {
            return None;
        };

        Some(Self::new(native, ty))
    }

    fn is_virtual(&self) -> bool {
        matches!(self.ty(), NodeType::Fragment)
    }

    fn native_parent(&self) -> Option<web_sys::Node> {
        self.0.native.parent_node()
    }

    fn native_target(&self) -> Option<web_sys::Node> {
        if self.is_virtual() {
            self.native_parent()
        } else {
            Some(self.0.native.clone())
        }
    }

    fn first_node(&self) -> web_sys::Node {
        if self.is_virtual() {
            let children = self.0.children.borrow();
            if let Some(first) = children.first() {
                return first.0.native.clone();
            }
        }

        self.0.native.clone()
    }

    fn as_element(&self) -> &web_sys::Element {
        self.0.native.unchecked_ref::<web_sys::Element>()
    }

    pub fn mount_to_native(&self, target: &web_sys::Node, before: Option<&web_sys::Node>) {
        if self.is_virtual() {
            let children = self.0.children.borrow();
            for child in &*children {
                child.mount_to_native(target, before);
            }
        }

        target
            .insert_before(&self.0.native, before)
            .expect("native insertion failed");
    }

    pub fn remove_from_native(&self, target: &web_sys::Node) {
        if self.is_virtual() {
            let children = self.0.children.borrow();
            for child in &*children {
                child.remove_from_native(target);
            }
        }

        target
            .remove_child(&self.0.native)
            .expect("native removal failed");
    }
}

impl Node for DomNode {
    fn element(namespace: Option<&str>, name: &str) -> Self {
        let native = DOCUMENT
            .with(|document| {
                if namespace.is_some() {
                    document.create_element_ns(namespace, intern(name))
                } else {
                    document.create_element(intern(name))
                }
            })
            .expect("invalid element name");

        Self::new(native.unchecked_into(), NodeType::Element)
    }

    fn text() -> Self {
        let native = web_sys::Text::new().expect("text node creation failed");

        Self::new(native.unchecked_into(), NodeType::Text)
    }

    fn fragment() -> Self {
        let native = web_sys::Comment::new().expect("comment node creation failed");

        Self::new(native.unchecked_into(), NodeType::Fragment)
    }

    fn ty(&self) -> NodeType {
        self.0.ty
    }

    fn tag(&self) -> Option<String> {
        (self.ty() == NodeType::Element).then(|| self.as_element().local_name())
    }

    fn parent(&self) -> Option<Self> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(DomNode)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        children
            .iter()
            .position(|node| node == self)
            .and_then(|idx| children.get(idx + 1).cloned())
    }

    fn insert(&self, child: &Self, before: Option<&Self>) {
        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        let mut children = self.0.children.borrow_mut();
        let idx = if let Some(before) = before {
            children
                .iter()
                .position(|node| node == before)
                .expect("not a parent of insertion point node")
        } else {
            children.len()
        };
        children.insert(idx, child.clone());

        child.0.parent.borrow_mut().replace(Rc::downgrade(&self.0));

        if let Some(target) = self.native_target() {
            let before = before.map(|node| node.first_node()).or_else(|| {
                if self.is_virtual() {
                    self.native().next_sibling()
                } else {
                    None
                }
            });

            child.mount_to_native(&target, before.as_ref());
        }
    }

    fn remove(&self, child: &Self) {
        let mut children = self.0.children.borrow_mut();
        let idx = children
            .iter()
            .position(|node| node == child)
            .expect("not a parent of child node");
        children.remove(idx);

        child.0.parent.borrow_mut().take();

        if let Some(target) = self.native_target() {
            child.remove_from_native(&target);
        }
    }

    fn text_content(&self) -> String {
        if self.is_virtual() {
            self.children()
                .iter()
                .map(Node::text_content)
                .collect::<String>()
        } else {
            self.0.native.text_content().unwrap_or_default()
        }
    }

    fn set_text(&self, content: &str) {
        match self.ty() {
            NodeType::Text => {
                self.0.native.set_text_content(Some(content));
            }
            _ => panic!("can only set text content of text nodes"),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        if self.ty() == NodeType::Element {
            self.as_element().get_attribute(name)
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn set_attr(&self, name: &str, value: &str) {
        if self.ty() == NodeType::Element {
            self.as_element()
                .set_attribute(intern(name), value)
                .expect("invalid attribute name");
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn remove_attr(&self, name: &str) {
        if self.ty() == NodeType::Element {
            self.as_element()
                .remove_attribute(intern(name))
                .expect("invalid attribute name");
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn attach_shadow(&self, mode: ShadowMode) -> Result<Self, ShadowError> {
        if self.ty() != NodeType::Element {
            return Err(ShadowError::NotElement);
        }
        if self.0.shadow.borrow().is_some() {
            return Err(ShadowError::AlreadyAttached);
        }

        let element = self.as_element();
        let tag = element.local_name();
        if !can_host_shadow(&tag) {
            return Err(ShadowError::Unsupported(tag));
        }

        // a declarative shadow root left by prerendering is handed back emptied
        let init = web_sys::ShadowRootInit::new(match mode {
            ShadowMode::Open => web_sys::ShadowRootMode::Open,
            ShadowMode::Closed => web_sys::ShadowRootMode::Closed,
        });
        let native = element
            .attach_shadow(&init)
            .map_err(|err| ShadowError::Host(js_message(&err)))?;

        let root = Self::new(native.unchecked_into(), NodeType::ShadowRoot);
        root.0.host.replace(Some(Rc::downgrade(&self.0)));
        self.0.shadow.replace(Some(root.clone()));
        Ok(root)
    }

    fn shadow_root(&self) -> Option<Self> {
        self.0.shadow.borrow().clone().filter(|root| {
            root.native().unchecked_ref::<web_sys::ShadowRoot>().mode()
                == web_sys::ShadowRootMode::Open
        })
    }

    fn internal_shadow_root(&self) -> Option<Self> {
        self.0.shadow.borrow().clone()
    }

    fn host(&self) -> Option<Self> {
        self.0
            .host
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(DomNode)
    }

    fn is_connected(&self) -> bool {
        self.0.native.is_connected()
    }

    fn event<E, F>(&self, event: &E, f: F)
    where
        E: EventKey,
        F: Fn(E::Event) + 'static,
    {
        if self.ty() != NodeType::Element {
            panic!("can only set events on element nodes");
        }

        let closure = EventClosure::new(move |value: web_sys::Event| {
            let value = value
                .dyn_into::<E::Event>()
                .expect("invalid event type cast");
            f(value);
        });

        self.0
            .native
            .add_event_listener_with_callback(
                intern(event.name()),
                closure.as_ref().unchecked_ref(),
            )
            .expect("event listener registration failed");

        self.0.events.borrow_mut().push(closure);
    }
}

impl PartialEq for DomNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for DomNode {}

impl Hash for DomNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
