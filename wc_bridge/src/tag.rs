//! Tag identifiers and tag name resolution.

use std::borrow::Cow;

use crate::{
    error::BridgeError,
    props::{PropValue, Props, TagKey},
};

/// Names the native element type a bridge instantiates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagId {
    /// A literal tag name, used verbatim.
    Name(Cow<'static, str>),
    /// A component type identified by its display name (eg `MyWidget`).
    ///
    /// The tag name is derived by converting the display name from
    /// camel-case to dash-case.
    Type(Cow<'static, str>),
}

impl TagId {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }

    pub fn type_named(display_name: impl Into<Cow<'static, str>>) -> Self {
        Self::Type(display_name.into())
    }

    /// Identify a tag by the unqualified name of a Rust type.
    ///
    /// `TagId::of::<MyWidget>()` resolves to `my-widget`.
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let without_generics = full.split('<').next().unwrap_or(full);
        let name = without_generics
            .rsplit("::")
            .next()
            .unwrap_or(without_generics);
        Self::Type(Cow::Borrowed(name))
    }

    /// Resolve to a tag name.
    ///
    /// Returns `None` if the resulting name would be empty.
    pub fn resolve(&self) -> Option<TagName> {
        let name = match self {
            Self::Name(name) => name.to_string(),
            Self::Type(display) => camel_to_dash(display),
        };
        if name.is_empty() {
            None
        } else {
            Some(TagName(name))
        }
    }
}

impl From<&'static str> for TagId {
    fn from(value: &'static str) -> Self {
        Self::Name(Cow::Borrowed(value))
    }
}

impl From<String> for TagId {
    fn from(value: String) -> Self {
        Self::Name(Cow::Owned(value))
    }
}

/// A resolved, non-empty element tag name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convert a camel-case display name to a lowercase dash-case tag name.
///
/// A dash is inserted before every ASCII uppercase letter that follows an
/// ASCII letter, so a leading uppercase letter never produces a leading dash.
/// The whole result is lowercased, including non-ASCII letters.
pub fn camel_to_dash(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut prev_is_letter = false;
    for c in value.chars() {
        if c.is_ascii_uppercase() && prev_is_letter {
            out.push('-');
        }
        out.extend(c.to_lowercase());
        prev_is_letter = c.is_ascii_alphabetic();
    }
    out
}

/// Resolve the tag name from the tag identifier entry of a prop set.
pub fn resolve_tag<E, C>(props: &Props<E, C>, key: TagKey) -> Result<TagName, BridgeError> {
    let resolved = match props.tag_identifier(key) {
        Some(PropValue::Str(name)) if !name.is_empty() => Some(TagName(name.clone())),
        Some(PropValue::Component(id)) => id.resolve(),
        _ => None,
    };
    resolved.ok_or(BridgeError::MissingTagIdentifier { key })
}
