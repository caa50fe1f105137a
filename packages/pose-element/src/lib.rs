//! Custom element plumbing over any [`Node`](pose_nodes::Node) backend.
//!
//! An [`ElementDefinition`] ties a [`TagName`] to a [`Stylesheet`] and a root
//! [`Component`]. Definitions live in an explicit [`Registry`]; when a host
//! element with a defined tag becomes connected, its [`ElementAdapter`] opens a
//! shadow root, injects the stylesheet and mounts the component inside it.
//! Disconnecting the host destroys the component and empties the shadow root.
//!
//! Backends without native custom element reactions drive adapters through a
//! [`Document`].

#![warn(clippy::use_self)]

mod adapter;
mod component;
mod definition;
mod document;
mod error;
mod name;
mod registry;
mod scope;
mod style;

pub use adapter::{ElementAdapter, Lifecycle};
pub use component::{Component, MountOptions, Mounted};
pub use definition::ElementDefinition;
pub use document::Document;
pub use error::{ConnectError, DefineError, MountError};
pub use name::TagName;
pub use registry::Registry;
pub use scope::RenderScope;
pub use style::Stylesheet;

pub use pose_nodes::ShadowMode;
