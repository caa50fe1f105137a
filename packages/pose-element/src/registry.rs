use std::rc::Rc;

use indexmap::IndexMap;
use pose_nodes::Node;

use crate::{DefineError, ElementAdapter, ElementDefinition, TagName};

/// Maps custom element names to their definitions.
///
/// Each registry is independent; nothing here is process-wide.
pub struct Registry<N: Node> {
    definitions: IndexMap<TagName, Rc<ElementDefinition<N>>>,
}

impl<N: Node> Default for Registry<N> {
    fn default() -> Self {
        Self {
            definitions: IndexMap::new(),
        }
    }
}

impl<N: Node> Registry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition. A name can only be defined once.
    pub fn define(
        &mut self,
        definition: ElementDefinition<N>,
    ) -> Result<Rc<ElementDefinition<N>>, DefineError> {
        let name = definition.name().clone();
        if self.definitions.contains_key(&name) {
            tracing::warn!(tag = %name, "custom element defined twice");
            return Err(DefineError::AlreadyDefined(name.to_string()));
        }

        tracing::debug!(tag = %name, mode = %definition.mode(), "defined custom element");
        let definition = Rc::new(definition);
        self.definitions.insert(name, definition.clone());
        Ok(definition)
    }

    pub fn get(&self, name: &str) -> Option<Rc<ElementDefinition<N>>> {
        self.definitions.get(name).cloned()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &TagName> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Removes a definition, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Rc<ElementDefinition<N>>> {
        self.definitions.shift_remove(name)
    }

    /// Creates an adapter for `host` if its tag has been defined.
    ///
    /// A shadow root the host already carries is adopted by the adapter.
    pub fn upgrade(&self, host: &N) -> Option<ElementAdapter<N>> {
        let definition = self.get(&host.tag()?)?;
        let mut adapter = ElementAdapter::new(host.clone(), definition);
        if let Some(root) = host.internal_shadow_root() {
            adapter.adopt(root);
        }
        Some(adapter)
    }
}

#[cfg(test)]
mod tests {
    use pose_nodes::{element, Node, ShadowMode};
    use pose_render::NodeRef;

    use super::Registry;
    use crate::{adapter::tests::probe_definition, DefineError, Lifecycle};

    #[test]
    fn define_and_lookup() {
        let mut registry = Registry::new();
        registry.define(probe_definition("pose-a")).unwrap();
        registry.define(probe_definition("pose-b")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.is_defined("pose-a"));
        assert!(!registry.is_defined("pose-c"));
        assert_eq!(
            registry.names().map(|name| name.as_str()).collect::<Vec<_>>(),
            ["pose-a", "pose-b"]
        );
    }

    #[test]
    fn duplicate_definition_fails() {
        let mut registry = Registry::new();
        let first = registry.define(probe_definition("pose-a")).unwrap();

        assert_eq!(
            registry.define(probe_definition("pose-a")).unwrap_err(),
            DefineError::AlreadyDefined("pose-a".to_string())
        );
        assert_eq!(registry.len(), 1);
        assert!(std::rc::Rc::ptr_eq(&first, &registry.get("pose-a").unwrap()));
    }

    #[test]
    fn registries_are_independent() {
        let mut a = Registry::new();
        let b: Registry<NodeRef> = Registry::new();
        a.define(probe_definition("pose-a")).unwrap();

        assert!(a.is_defined("pose-a"));
        assert!(b.is_empty());
    }

    #[test]
    fn upgrades_defined_tags_only() {
        let mut registry = Registry::new();
        registry.define(probe_definition("pose-a")).unwrap();

        let host: NodeRef = element!("pose-a");
        let adapter = registry.upgrade(&host).unwrap();
        assert_eq!(adapter.host(), &host);
        assert_eq!(adapter.lifecycle(), Lifecycle::Unattached);

        assert!(registry.upgrade(&element!("pose-b")).is_none());
        assert!(registry.upgrade(&NodeRef::text()).is_none());
    }

    #[test]
    fn removed_definition_can_be_defined_again() {
        let mut registry = Registry::new();
        registry.define(probe_definition("pose-a")).unwrap();

        assert!(registry.remove("pose-a").is_some());
        assert!(!registry.is_defined("pose-a"));
        assert!(registry.remove("pose-a").is_none());

        registry.define(probe_definition("pose-a")).unwrap();
        assert!(registry.is_defined("pose-a"));
    }

    #[test]
    fn upgrade_adopts_an_existing_shadow_root() {
        let mut registry = Registry::new();
        registry.define(probe_definition("pose-a")).unwrap();

        let host: NodeRef = element!("pose-a");
        let root = host.attach_shadow(ShadowMode::Closed).unwrap();

        let mut adapter = registry.upgrade(&host).unwrap();
        assert_eq!(adapter.shadow_root(), Some(&root));
        adapter.connected().unwrap();
        assert_eq!(root.children().len(), 2);
    }
}
