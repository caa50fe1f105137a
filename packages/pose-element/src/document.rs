use indexmap::IndexMap;
use pose_nodes::{Node, NodeType};

use crate::{ConnectError, DefineError, ElementAdapter, ElementDefinition, Registry};

/// Dispatches custom element reactions for a tree rooted at a live document.
///
/// Backends that lack native custom element support mutate the tree through a
/// `Document` so that defined elements are connected when they become part of
/// the document and disconnected when they leave it. Content rendered inside
/// shadow roots is walked as well, so elements nested in a root component are
/// upgraded too.
///
/// Only connected elements hold an adapter. A removed element keeps its shadow
/// root, which is adopted again if the element is re-inserted.
pub struct Document<N: Node> {
    root: N,
    registry: Registry<N>,
    adapters: IndexMap<N, ElementAdapter<N>>,
}

impl<N: Node> Document<N> {
    /// Wraps a connected root node, upgrading any defined elements already below it.
    ///
    /// Upgrade failures are logged by the failing adapter.
    pub fn new(root: N, registry: Registry<N>) -> Self {
        debug_assert!(root.is_connected(), "document root must be connected");

        let mut document = Self {
            root,
            registry,
            adapters: IndexMap::new(),
        };
        let root = document.root.clone();
        if let Err(err) = document.connect_tree(&root) {
            tracing::warn!(%err, "document created with elements that failed to connect");
        }
        document
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    /// Defines an element and upgrades matching elements already in the document.
    ///
    /// The definition stays registered when an upgrade fails; the first
    /// failure is returned as [`DefineError::Upgrade`].
    pub fn define(&mut self, definition: ElementDefinition<N>) -> Result<(), DefineError> {
        self.registry.define(definition)?;

        let root = self.root.clone();
        self.connect_tree(&root).map_err(DefineError::Upgrade)
    }

    pub fn append(&mut self, parent: &N, child: &N) -> Result<(), ConnectError> {
        self.insert(parent, child, None)
    }

    /// Inserts `child` and connects every defined element in its subtree.
    ///
    /// A failure does not stop the remaining elements from connecting; the
    /// first failure is returned.
    pub fn insert(&mut self, parent: &N, child: &N, before: Option<&N>) -> Result<(), ConnectError> {
        if let Some(old) = child.parent() {
            self.remove(&old, child);
        }

        parent.insert(child, before);
        if child.is_connected() {
            self.connect_tree(child)
        } else {
            Ok(())
        }
    }

    /// Removes `child` and disconnects every defined element in its subtree.
    pub fn remove(&mut self, parent: &N, child: &N) {
        let connected = child.is_connected();
        parent.remove(child);
        if connected {
            self.disconnect_tree(child);
        }
    }

    pub fn adapter(&self, host: &N) -> Option<&ElementAdapter<N>> {
        self.adapters.get(host)
    }

    /// Adapters of the defined elements currently in the document.
    pub fn adapters(&self) -> impl ExactSizeIterator<Item = &ElementAdapter<N>> {
        self.adapters.values()
    }

    fn connect_tree(&mut self, node: &N) -> Result<(), ConnectError> {
        let mut first_err = None;

        let mut stack = vec![node.clone()];
        while let Some(node) = stack.pop() {
            if node.ty() == NodeType::Element {
                if let Err(err) = self.connect(&node) {
                    first_err.get_or_insert(err);
                }
            }

            // shadow content is populated by the connect above
            let next = self.shadow_of(&node).into_iter().chain(node.children());
            stack.extend(next.collect::<Vec<_>>().into_iter().rev());
        }

        first_err.map_or(Ok(()), Err)
    }

    fn connect(&mut self, host: &N) -> Result<(), ConnectError> {
        if !self.adapters.contains_key(host) {
            let Some(adapter) = self.registry.upgrade(host) else {
                return Ok(());
            };
            self.adapters.insert(host.clone(), adapter);
        }

        match self.adapters.get_mut(host) {
            Some(adapter) => adapter.connected(),
            None => Ok(()),
        }
    }

    fn disconnect_tree(&mut self, node: &N) {
        let mut order = vec![];
        let mut stack = vec![node.clone()];
        while let Some(node) = stack.pop() {
            let next = self.shadow_of(&node).into_iter().chain(node.children());
            stack.extend(next.collect::<Vec<_>>().into_iter().rev());
            order.push(node);
        }

        // descendants first, so nested elements are torn down before their host empties them
        for node in order.iter().rev() {
            if let Some(mut adapter) = self.adapters.swap_remove(node) {
                adapter.disconnected();
            }
        }
    }

    fn shadow_of(&self, node: &N) -> Option<N> {
        self.adapter(node)
            .and_then(|adapter| adapter.shadow_root().cloned())
            .or_else(|| node.shadow_root())
    }
}
