use std::fmt;

use pose_nodes::{InvalidName, ShadowError};
use thiserror::Error;

#[derive(Clone, PartialEq, Eq, Error, Debug)]
pub enum DefineError {
    #[error("`{name}` is not a valid custom element name: {reason}")]
    InvalidName { name: String, reason: InvalidName },
    #[error("`{0}` has already been defined as a custom element")]
    AlreadyDefined(String),
    #[error("custom element registry rejected definition: {0}")]
    Host(String),
    /// The definition was registered but an element already in the document
    /// failed to connect.
    #[error("failed to upgrade an existing element: {0}")]
    Upgrade(ConnectError),
}

/// Failure raised by a root component while rendering into its target.
#[derive(Clone, PartialEq, Eq, Error, Debug)]
#[error("failed to mount root component: {0}")]
pub struct MountError(String);

impl MountError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self(message.to_string())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Error, Debug)]
pub enum ConnectError {
    #[error(transparent)]
    Shadow(#[from] ShadowError),
    #[error(transparent)]
    Mount(#[from] MountError),
}
