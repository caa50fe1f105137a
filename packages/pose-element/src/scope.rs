use pose_nodes::Node;

use crate::{ElementDefinition, MountError, Mounted};

/// The shadow root of one element instance, with the style node and root
/// component it currently holds.
#[derive(Debug)]
pub struct RenderScope<N: Node> {
    root: N,
    style: Option<N>,
    mounted: Option<Mounted>,
}

impl<N: Node> RenderScope<N> {
    pub(crate) fn new(root: N) -> Self {
        Self {
            root,
            style: None,
            mounted: None,
        }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn style(&self) -> Option<&N> {
        self.style.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Injects the stylesheet, then mounts the root component after it.
    ///
    /// A failing component leaves the style in place.
    pub(crate) fn fill(&mut self, definition: &ElementDefinition<N>) -> Result<(), MountError> {
        debug_assert!(self.style.is_none() && self.mounted.is_none());

        self.style = Some(definition.stylesheet().inject(&self.root));
        self.mounted = Some(definition.construct(&self.root)?);
        Ok(())
    }

    /// Destroys the root component and removes everything left in the root.
    pub(crate) fn clear(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.destroy();
        }
        self.style = None;

        for child in self.root.children() {
            self.root.remove(&child);
        }
    }
}

#[cfg(test)]
mod tests {
    use pose_nodes::{element, Node, ShadowMode};
    use pose_render::NodeRef;

    use super::RenderScope;
    use crate::{
        adapter::tests::CSS, Component, ElementDefinition, MountError, MountOptions, Stylesheet,
    };

    struct StyledFirst;

    impl Component<NodeRef> for StyledFirst {
        fn new(options: MountOptions<'_, NodeRef>) -> Result<Self, MountError> {
            let first = options.target.first_child().ok_or_else(|| MountError::new("empty"))?;
            if first.tag().as_deref() != Some("style") || first.text_content() != CSS {
                return Err(MountError::new("style not injected before mount"));
            }
            Ok(Self)
        }

        fn destroy(self) {}
    }

    fn scope() -> RenderScope<NodeRef> {
        let host: NodeRef = element!("pose-scope");
        RenderScope::new(host.attach_shadow(ShadowMode::Open).unwrap())
    }

    #[test]
    fn style_is_present_when_component_is_built() {
        let definition =
            ElementDefinition::new::<StyledFirst>("pose-scope", Stylesheet::new(CSS)).unwrap();
        let mut scope = scope();

        scope.fill(&definition).unwrap();
        assert!(scope.is_mounted());
        assert_eq!(scope.root().children().len(), 1);
    }

    #[test]
    fn clear_empties_the_root() {
        let definition =
            ElementDefinition::new::<StyledFirst>("pose-scope", Stylesheet::new(CSS)).unwrap();
        let mut scope = scope();
        scope.fill(&definition).unwrap();
        scope.root().insert(&NodeRef::text(), None);

        scope.clear();
        assert!(scope.root().children().is_empty());
        assert!(scope.style().is_none());
        assert!(!scope.is_mounted());
    }
}
