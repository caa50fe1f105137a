use std::fmt;

use pose_nodes::{Node, ShadowMode};

use crate::{Component, DefineError, MountError, MountOptions, Mounted, Stylesheet, TagName};

type Constructor<N> = Box<dyn Fn(MountOptions<'_, N>) -> Result<Mounted, MountError>>;

/// Everything needed to upgrade a host element: its tag, how its shadow root
/// is opened, the stylesheet injected first and the root component mounted after.
pub struct ElementDefinition<N: Node> {
    name: TagName,
    mode: ShadowMode,
    stylesheet: Stylesheet,
    constructor: Constructor<N>,
}

impl<N: Node> ElementDefinition<N> {
    pub fn new<C>(name: &str, stylesheet: Stylesheet) -> Result<Self, DefineError>
    where
        C: Component<N>,
    {
        Ok(Self {
            name: TagName::new(name)?,
            mode: ShadowMode::Open,
            stylesheet,
            constructor: Box::new(|options: MountOptions<'_, N>| {
                C::new(options).map(Mounted::new::<N, C>)
            }),
        })
    }

    pub fn with_mode(mut self, mode: ShadowMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn name(&self) -> &TagName {
        &self.name
    }

    pub fn mode(&self) -> ShadowMode {
        self.mode
    }

    pub fn stylesheet(&self) -> Stylesheet {
        self.stylesheet
    }

    pub(crate) fn construct(&self, target: &N) -> Result<Mounted, MountError> {
        (self.constructor)(MountOptions { target })
    }
}

impl<N: Node> fmt::Debug for ElementDefinition<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDefinition")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("stylesheet", &self.stylesheet.len())
            .finish_non_exhaustive()
    }
}
