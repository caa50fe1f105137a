use thiserror::Error;

// Reference: https://html.spec.whatwg.org/multipage/custom-elements.html#valid-custom-element-name
pub const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

#[derive(Clone, Copy, PartialEq, Eq, Error, Debug)]
pub enum InvalidName {
    #[error("name must start with an ASCII lowercase letter")]
    Start,
    #[error("name must contain a hyphen")]
    NoHyphen,
    #[error("name must not contain ASCII uppercase letters")]
    Uppercase,
    #[error("name contains invalid character {0:?}")]
    Char(char),
    #[error("name is reserved")]
    Reserved,
}

pub fn is_valid_custom_element_name(name: &str) -> Result<(), InvalidName> {
    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
        return Err(InvalidName::Start);
    }

    for c in chars {
        if c.is_ascii_uppercase() {
            return Err(InvalidName::Uppercase);
        }
        if !is_name_char(c) {
            return Err(InvalidName::Char(c));
        }
    }

    if !name.contains('-') {
        return Err(InvalidName::NoHyphen);
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(InvalidName::Reserved);
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '0'..='9' | '_' | 'a'..='z'
        | '\u{B7}'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{203F}'..='\u{2040}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}
