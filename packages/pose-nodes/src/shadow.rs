use std::fmt;

use thiserror::Error;

use crate::name::is_valid_custom_element_name;

// Reference: https://dom.spec.whatwg.org/#dom-element-attachshadow
const SHADOW_HOSTS: &[&str] = &[
    "article",
    "aside",
    "blockquote",
    "body",
    "div",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "main",
    "nav",
    "p",
    "section",
    "span",
];

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum ShadowMode {
    #[default]
    Open,
    Closed,
}

impl ShadowMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ShadowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Error, Debug)]
pub enum ShadowError {
    #[error("shadow roots can only be attached to elements")]
    NotElement,
    #[error("element already hosts a shadow root")]
    AlreadyAttached,
    #[error("`<{0}>` cannot host a shadow root")]
    Unsupported(String),
    #[error("host rejected shadow root: {0}")]
    Host(String),
}

/// Whether an element with the given tag may carry a shadow root.
pub fn can_host_shadow(tag: &str) -> bool {
    SHADOW_HOSTS.contains(&tag) || is_valid_custom_element_name(tag).is_ok()
}
