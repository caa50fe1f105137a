//! The `<pose-canvas>` custom element.
//!
//! Each instance renders into its own shadow root: the element stylesheet is
//! injected first, then [`App`] is mounted after it. In the browser the
//! element is registered on load by the wasm start function; other backends
//! call [`register`] on their own [`Registry`].

mod app;

pub use app::{App, CANVAS_HEIGHT, CANVAS_WIDTH};

use pose_element::{DefineError, ElementDefinition, Registry, ShadowMode, Stylesheet};
use pose_nodes::Node;

pub const TAG_NAME: &str = "pose-canvas";

pub const STYLES: Stylesheet = Stylesheet::new(include_str!("app.css"));

pub fn definition<N: Node>() -> Result<ElementDefinition<N>, DefineError> {
    ElementDefinition::new::<App<N>>(TAG_NAME, STYLES)
}

/// Defines `<pose-canvas>` on `registry` with an open shadow root.
pub fn register<N: Node>(registry: &mut Registry<N>) -> Result<(), DefineError> {
    register_with_mode(registry, ShadowMode::Open)
}

pub fn register_with_mode<N: Node>(
    registry: &mut Registry<N>,
    mode: ShadowMode,
) -> Result<(), DefineError> {
    registry.define(definition()?.with_mode(mode))?;
    Ok(())
}

#[cfg(target_family = "wasm")]
mod web {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let definition = super::definition().map_err(|err| JsValue::from_str(&err.to_string()))?;
        pose_web::CustomElements::define_global(definition)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pose_element::{DefineError, Document, Registry, ShadowMode};
    use pose_nodes::{element, Node, NodeType};
    use pose_render::NodeRef;

    use super::{register, register_with_mode, STYLES, TAG_NAME};

    fn document() -> (Document<NodeRef>, NodeRef) {
        let mut registry = Registry::new();
        register(&mut registry).unwrap();

        let body: NodeRef = element!("body");
        let root = NodeRef::document();
        root.insert(&body, None);
        (Document::new(root, registry), body)
    }

    fn styles(root: &NodeRef) -> Vec<NodeRef> {
        root.children()
            .into_iter()
            .filter(|node| node.tag().as_deref() == Some("style"))
            .collect()
    }

    fn ui_roots(root: &NodeRef) -> Vec<NodeRef> {
        root.children()
            .into_iter()
            .filter(|node| node.attr("class").as_deref() == Some("pose-canvas"))
            .collect()
    }

    #[test]
    fn insert_creates_styled_boundary() {
        let (mut doc, body) = document();
        let host: NodeRef = element!(TAG_NAME);

        doc.append(&body, &host).unwrap();

        let shadow = host.shadow_root().unwrap();
        assert_eq!(shadow.ty(), NodeType::ShadowRoot);
        let children = shadow.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].tag().as_deref(), Some("style"));
        assert_eq!(children[1].tag().as_deref(), Some("div"));

        let canvas = children[1].first_child().unwrap();
        assert_eq!(canvas.tag().as_deref(), Some("canvas"));
        assert_eq!(canvas.attr("part").as_deref(), Some("canvas"));
    }

    #[test]
    fn style_text_matches_stylesheet() {
        let (mut doc, body) = document();
        let host: NodeRef = element!(TAG_NAME);
        doc.append(&body, &host).unwrap();

        let shadow = host.shadow_root().unwrap();
        let style = &styles(&shadow)[0];
        assert_eq!(style.text_content(), STYLES.as_str());
        assert_eq!(style.children().len(), 1);
    }

    #[test]
    fn ui_root_stays_inside_boundary() {
        let (mut doc, body) = document();
        let host: NodeRef = element!(TAG_NAME);
        doc.append(&body, &host).unwrap();

        let shadow = host.shadow_root().unwrap();
        let ui = &ui_roots(&shadow)[0];
        assert_eq!(ui.parent(), Some(shadow));
        assert!(host.children().is_empty());
        assert!(body.children().iter().all(|node| node == &host));
    }

    #[test]
    fn repeated_attach_never_duplicates() {
        let (mut doc, body) = document();
        let host: NodeRef = element!(TAG_NAME);
        let other: NodeRef = element!("div");
        doc.append(&body, &other).unwrap();

        for _ in 0..3 {
            doc.append(&body, &host).unwrap();
            doc.append(&other, &host).unwrap();
        }
        doc.remove(&other, &host);
        doc.append(&body, &host).unwrap();

        let shadow = host.shadow_root().unwrap();
        assert_eq!(styles(&shadow).len(), 1);
        assert_eq!(ui_roots(&shadow).len(), 1);
        assert_eq!(doc.adapters().len(), 1);
    }

    #[test]
    fn instances_have_independent_boundaries() {
        let (mut doc, body) = document();
        let first: NodeRef = element!(TAG_NAME);
        let second: NodeRef = element!(TAG_NAME);
        doc.append(&body, &first).unwrap();
        doc.append(&body, &second).unwrap();

        let a = first.shadow_root().unwrap();
        let b = second.shadow_root().unwrap();
        assert_ne!(a, b);
        assert_ne!(styles(&a)[0], styles(&b)[0]);
        assert_ne!(ui_roots(&a)[0], ui_roots(&b)[0]);
        assert_eq!(a.host(), Some(first));
        assert_eq!(b.host(), Some(second));
    }

    #[test]
    fn replacing_an_element_gives_a_fresh_boundary() {
        let (mut doc, body) = document();
        let old: NodeRef = element!(TAG_NAME);
        doc.append(&body, &old).unwrap();
        let old_shadow = old.shadow_root().unwrap();

        doc.remove(&body, &old);
        assert!(old_shadow.children().is_empty());
        assert!(doc.adapter(&old).is_none());

        let new: NodeRef = element!(TAG_NAME);
        doc.append(&body, &new).unwrap();
        let new_shadow = new.shadow_root().unwrap();

        assert_ne!(new_shadow, old_shadow);
        assert_eq!(new_shadow.children().len(), 2);
        assert!(old_shadow.children().is_empty());
    }

    #[test]
    fn closed_mode_hides_the_boundary() {
        let mut registry = Registry::new();
        register_with_mode(&mut registry, ShadowMode::Closed).unwrap();
        let root = NodeRef::document();
        let mut doc = Document::new(root.clone(), registry);

        let host: NodeRef = element!(TAG_NAME);
        doc.append(&root, &host).unwrap();

        assert!(host.shadow_root().is_none());
        let shadow = doc.adapter(&host).unwrap().shadow_root().unwrap().clone();
        assert_eq!(shadow.mode(), Some(ShadowMode::Closed));
        assert_eq!(shadow.children().len(), 2);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = Registry::<NodeRef>::new();
        register(&mut registry).unwrap();

        assert_eq!(
            register(&mut registry),
            Err(DefineError::AlreadyDefined(TAG_NAME.to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn prerendered_markup_has_one_template_per_element() {
        let (mut doc, body) = document();
        for _ in 0..2 {
            let host: NodeRef = element!(TAG_NAME);
            doc.append(&body, &host).unwrap();
        }

        let html = doc.root().to_string();
        assert_eq!(html.matches("<template shadowrootmode=\"open\">").count(), 2);
        assert_eq!(html.matches("<pose-canvas>").count(), 2);
        assert!(html.contains("<canvas part=\"canvas\""));
    }
}
