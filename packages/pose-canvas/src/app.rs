use pose_element::{Component, MountError, MountOptions};
use pose_nodes::{element, Node};
use wasm_bindgen::JsCast;

pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 480;

/// Root component rendered inside every `<pose-canvas>`.
pub struct App<N: Node> {
    target: N,
    root: N,
}

impl<N: Node> Component<N> for App<N> {
    fn new(options: MountOptions<'_, N>) -> Result<Self, MountError> {
        let canvas: N = element!("canvas", {
            part => "canvas";
            width => CANVAS_WIDTH;
            height => CANVAS_HEIGHT;
        });
        canvas.event(&"pointerdown", |event| set_active(&event, true));
        canvas.event(&"pointerup", |event| set_active(&event, false));
        canvas.event(&"pointercancel", |event| set_active(&event, false));

        let root: N = element!("div", { class => "pose-canvas"; canvas });
        options.target.insert(&root, None);

        Ok(Self {
            target: options.target.clone(),
            root,
        })
    }

    fn destroy(self) {
        if self.root.parent().as_ref() == Some(&self.target) {
            self.target.remove(&self.root);
        }
    }
}

fn set_active(event: &web_sys::Event, active: bool) {
    let Some(element) = event
        .current_target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
    else {
        return;
    };

    let result = if active {
        element.set_attribute("data-active", "")
    } else {
        element.remove_attribute("data-active")
    };
    if let Err(err) = result {
        tracing::debug!(?err, active, "failed to toggle data-active");
    }
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use pose_element::{Component, MountOptions};
    use pose_nodes::Node;
    use pose_web::DomNode;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use super::App;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dispatch(element: &web_sys::Element, name: &str) {
        let event = web_sys::Event::new(name).unwrap();
        element.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn pointer_toggles_active_state() {
        let target = DomNode::element(None, "div");
        let app = App::<DomNode>::new(MountOptions { target: &target }).unwrap();

        let canvas = app.root.first_child().unwrap();
        let native = canvas.native().unchecked_ref::<web_sys::Element>();
        assert!(!native.has_attribute("data-active"));

        dispatch(native, "pointerdown");
        assert!(native.has_attribute("data-active"));
        dispatch(native, "pointerup");
        assert!(!native.has_attribute("data-active"));

        dispatch(native, "pointerdown");
        dispatch(native, "pointercancel");
        assert!(!native.has_attribute("data-active"));

        app.destroy();
        assert!(target.children().is_empty());
    }
}
