use std::rc::Rc;

use pose_nodes::Node;

use crate::{ConnectError, ElementDefinition, RenderScope};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lifecycle {
    Unattached,
    Attached,
    Detached,
}

/// Per-instance state of an upgraded host element.
#[derive(Debug)]
pub struct ElementAdapter<N: Node> {
    host: N,
    definition: Rc<ElementDefinition<N>>,
    scope: Option<RenderScope<N>>,
    lifecycle: Lifecycle,
}

impl<N: Node> ElementAdapter<N> {
    pub fn new(host: N, definition: Rc<ElementDefinition<N>>) -> Self {
        Self {
            host,
            definition,
            scope: None,
            lifecycle: Lifecycle::Unattached,
        }
    }

    pub fn host(&self) -> &N {
        &self.host
    }

    pub fn definition(&self) -> &ElementDefinition<N> {
        &self.definition
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn scope(&self) -> Option<&RenderScope<N>> {
        self.scope.as_ref()
    }

    /// The shadow root opened for this instance, in either mode.
    pub fn shadow_root(&self) -> Option<&N> {
        self.scope.as_ref().map(RenderScope::root)
    }

    /// Reuses a shadow root that is already attached to the host, such as one
    /// left by a previous instance or parsed from prerendered markup.
    ///
    /// Anything the root still holds is removed.
    pub fn adopt(&mut self, root: N) {
        debug_assert_eq!(self.lifecycle, Lifecycle::Unattached);

        let mut scope = RenderScope::new(root);
        scope.clear();
        self.scope = Some(scope);
    }

    /// Called when the host becomes part of a live document.
    ///
    /// The shadow root is opened on first attachment and reused afterwards.
    /// Calling this while already attached does nothing.
    pub fn connected(&mut self) -> Result<(), ConnectError> {
        if self.lifecycle == Lifecycle::Attached {
            return Ok(());
        }

        let mut scope = match self.scope.take() {
            Some(scope) => scope,
            None => {
                let root = self.host.attach_shadow(self.definition.mode()).map_err(|err| {
                    tracing::error!(tag = %self.definition.name(), %err, "failed to attach shadow root");
                    err
                })?;
                RenderScope::new(root)
            }
        };
        let result = scope.fill(&self.definition);
        self.scope = Some(scope);
        self.lifecycle = Lifecycle::Attached;

        tracing::trace!(tag = %self.definition.name(), "connected");
        result.map_err(|err| {
            tracing::error!(tag = %self.definition.name(), %err, "root component failed to mount");
            err.into()
        })
    }

    /// Called when the host leaves the document; tears down the shadow content.
    pub fn disconnected(&mut self) {
        if self.lifecycle != Lifecycle::Attached {
            return;
        }

        if let Some(scope) = &mut self.scope {
            scope.clear();
        }
        self.lifecycle = Lifecycle::Detached;

        tracing::trace!(tag = %self.definition.name(), "disconnected");
    }
}
