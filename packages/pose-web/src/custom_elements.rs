use std::{cell::RefCell, rc::Rc, thread_local};

use pose_element::{DefineError, ElementAdapter, ElementDefinition, Registry};
use wasm_bindgen::prelude::*;

use crate::{js_message, window, DomNode};

type ConnectedClosure =
    Closure<dyn FnMut(web_sys::HtmlElement, Option<web_sys::ShadowRoot>) -> Result<(), JsValue>>;
type DisconnectedClosure = Closure<dyn FnMut(web_sys::HtmlElement)>;

// The shadow root is handed over through `ElementInternals`, which also exposes
// closed and declarative roots, so nothing on the Rust side has to outlive a
// connection.
#[wasm_bindgen(inline_js = r#"
export function define_element(name, connected, disconnected) {
    class CustomElement extends HTMLElement {
        #internals = this.attachInternals();

        connectedCallback() {
            connected(this, this.#internals.shadowRoot);
        }

        disconnectedCallback() {
            disconnected(this);
        }
    }
    customElements.define(name, CustomElement);
}
"#)]
extern "C" {
    #[wasm_bindgen(catch)]
    fn define_element(
        name: &str,
        connected: &ConnectedClosure,
        disconnected: &DisconnectedClosure,
    ) -> Result<(), JsValue>;
}

thread_local! {
    static GLOBAL: CustomElements = CustomElements::new();
}

/// Bridges definitions to the browser's `window.customElements`.
///
/// Each defined tag gets a JS class whose lifecycle callbacks dispatch to an
/// [`ElementAdapter`] for the element they fire on. Adapters only live while
/// their element is connected; a re-inserted element gets a new adapter that
/// adopts the shadow root it already carries.
#[derive(Clone, Default)]
pub struct CustomElements(Rc<RefCell<State>>);

#[derive(Default)]
struct State {
    registry: Registry<DomNode>,
    connected: Vec<ElementAdapter<DomNode>>,
}

impl State {
    fn take(&mut self, host: &web_sys::Node) -> Option<ElementAdapter<DomNode>> {
        let idx = self
            .connected
            .iter()
            .position(|adapter| adapter.host().native().is_same_node(Some(host)))?;
        Some(self.connected.swap_remove(idx))
    }

    fn upgrade(
        &mut self,
        host: &web_sys::Node,
        root: Option<web_sys::ShadowRoot>,
    ) -> Option<ElementAdapter<DomNode>> {
        if let Some(adapter) = self.take(host) {
            return Some(adapter);
        }

        let mut adapter = self.registry.upgrade(&DomNode::from_native(host.clone())?)?;
        if let Some(root) = root {
            // the wrapper below does not track content parsed from prerendered markup
            root.set_inner_html("");
            adapter.adopt(DomNode::from_native(root.into())?);
        }
        Some(adapter)
    }
}

impl CustomElements {
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance used by [`CustomElements::define_global`].
    pub fn global() -> Self {
        GLOBAL.with(Clone::clone)
    }

    /// Defines an element on the global instance.
    pub fn define_global(definition: ElementDefinition<DomNode>) -> Result<(), DefineError> {
        Self::global().define(definition)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.0.borrow().registry.is_defined(name)
    }

    /// Number of defined elements currently connected to the document.
    pub fn connected_len(&self) -> usize {
        self.0.borrow().connected.len()
    }

    pub fn define(&self, definition: ElementDefinition<DomNode>) -> Result<(), DefineError> {
        let name = definition.name().to_string();
        if !window().custom_elements().get(&name).is_undefined() {
            tracing::warn!(tag = %name, "custom element already defined by the page");
            return Err(DefineError::AlreadyDefined(name));
        }
        // registered up front: the browser upgrades existing elements during `define_element`
        self.0.borrow_mut().registry.define(definition)?;

        let state = self.0.clone();
        let connected = ConnectedClosure::new(
            move |element: web_sys::HtmlElement, root: Option<web_sys::ShadowRoot>| {
                let host: web_sys::Node = element.into();
                let Some(mut adapter) = state.borrow_mut().upgrade(&host, root) else {
                    return Ok(());
                };

                // no borrow is held here: mounting may connect nested custom elements
                let result = adapter.connected();
                state.borrow_mut().connected.push(adapter);
                result.map_err(|err| js_sys::Error::new(&err.to_string()).into())
            },
        );

        let state = self.0.clone();
        let disconnected = DisconnectedClosure::new(move |element: web_sys::HtmlElement| {
            let host: web_sys::Node = element.into();
            let adapter = state.borrow_mut().take(&host);
            if let Some(mut adapter) = adapter {
                adapter.disconnected();
            }
        });

        if let Err(err) = define_element(&name, &connected, &disconnected) {
            let message = js_message(&err);
            tracing::error!(tag = %name, %message, "browser rejected custom element");
            self.0.borrow_mut().registry.remove(&name);
            return Err(DefineError::Host(message));
        }

        // the browser registry never forgets a definition
        connected.forget();
        disconnected.forget();
        Ok(())
    }
}
