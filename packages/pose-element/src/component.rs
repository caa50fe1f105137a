use std::fmt;

use pose_nodes::Node;

use crate::MountError;

/// Options handed to a root component when it is constructed.
pub struct MountOptions<'a, N> {
    /// Node the component renders into.
    pub target: &'a N,
}

/// A UI root that renders synchronously into a target when constructed.
pub trait Component<N: Node>: Sized + 'static {
    fn new(options: MountOptions<'_, N>) -> Result<Self, MountError>;

    /// Tears down everything the component rendered into its target.
    fn destroy(self);
}

/// A mounted root component with its concrete type erased.
#[must_use = "dropping a `Mounted` leaks the component without destroying it"]
pub struct Mounted(Box<dyn FnOnce()>);

impl Mounted {
    pub fn new<N, C>(component: C) -> Self
    where
        N: Node,
        C: Component<N>,
    {
        Self(Box::new(move || component.destroy()))
    }

    pub fn destroy(self) {
        (self.0)();
    }
}

impl fmt::Debug for Mounted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted").finish_non_exhaustive()
    }
}
