use std::{borrow::Borrow, fmt, ops::Deref};

use pose_nodes::is_valid_custom_element_name;

use crate::DefineError;

/// A validated custom element name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TagName(String);

impl TagName {
    pub fn new(name: impl Into<String>) -> Result<Self, DefineError> {
        let name = name.into();
        match is_valid_custom_element_name(&name) {
            Ok(()) => Ok(Self(name)),
            Err(reason) => Err(DefineError::InvalidName { name, reason }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for TagName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for TagName {
    type Error = DefineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
