//! Prop sets handed to a bridge by the host framework.

use std::{borrow::Cow, collections::BTreeMap, rc::Rc};

use crate::tag::TagId;

/// Key reserved for children. Never assigned to the element.
pub const CHILDREN_KEY: &str = "children";

/// Which prop key carries the tag identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TagKey {
    /// `type`
    #[default]
    Type,
    /// `wcType`
    WcType,
}

impl TagKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::WcType => "wcType",
        }
    }
}

impl std::fmt::Display for TagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event listener supplied as a prop value.
///
/// Compared by identity: two handlers are equal only if they are clones of
/// the same handler.
pub struct EventHandler<E = web_sys::Event>(Rc<dyn Fn(E)>);

impl<E> EventHandler<E> {
    pub fn new<F: Fn(E) + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, event: E) {
        (self.0)(event)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> Clone for EventHandler<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> PartialEq for EventHandler<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<E> std::fmt::Debug for EventHandler<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// A runtime-typed prop value.
pub enum PropValue<E = web_sys::Event> {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    /// A callable value. Registered as an event listener.
    Handler(EventHandler<E>),
    /// A component type used as a tag identifier.
    Component(TagId),
    /// An arbitrary Javascript value, assigned as is.
    Js(wasm_bindgen::JsValue),
}

impl<E> PropValue<E> {
    /// Returns `true` if the value is callable.
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Handler(_))
    }

    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

impl<E> Clone for PropValue<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Bool(v) => Self::Bool(*v),
            Self::Number(v) => Self::Number(*v),
            Self::Str(v) => Self::Str(v.clone()),
            Self::Handler(v) => Self::Handler(v.clone()),
            Self::Component(v) => Self::Component(v.clone()),
            Self::Js(v) => Self::Js(v.clone()),
        }
    }
}

impl<E> PartialEq for PropValue<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Handler(a), Self::Handler(b)) => a.ptr_eq(b),
            (Self::Component(a), Self::Component(b)) => a == b,
            (Self::Js(a), Self::Js(b)) => a == b,
            _ => false,
        }
    }
}

impl<E> std::fmt::Debug for PropValue<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Number(v) => f.debug_tuple("Number").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Handler(v) => v.fmt(f),
            Self::Component(v) => f.debug_tuple("Component").field(v).finish(),
            Self::Js(v) => f.debug_tuple("Js").field(v).finish(),
        }
    }
}

impl<E> From<bool> for PropValue<E> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<E> From<f64> for PropValue<E> {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl<E> From<i32> for PropValue<E> {
    fn from(v: i32) -> Self {
        Self::Number(v.into())
    }
}

impl<E> From<&str> for PropValue<E> {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl<E> From<String> for PropValue<E> {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl<E> From<EventHandler<E>> for PropValue<E> {
    fn from(v: EventHandler<E>) -> Self {
        Self::Handler(v)
    }
}

impl<E> From<TagId> for PropValue<E> {
    fn from(v: TagId) -> Self {
        match v {
            TagId::Name(name) => Self::Str(name.into_owned()),
            other => Self::Component(other),
        }
    }
}

impl<E> From<wasm_bindgen::JsValue> for PropValue<E> {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Self::Js(v)
    }
}

impl<E, V: Into<PropValue<E>>> From<Option<V>> for PropValue<E> {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// An open key/value prop set plus children.
///
/// The tag identifier lives in the map under its [`TagKey`].
/// Keys are kept in sorted order so element updates are deterministic.
pub struct Props<E = web_sys::Event, C = web_sys::Node> {
    values: BTreeMap<String, PropValue<E>>,
    children: Vec<C>,
}

impl<E, C> Props<E, C> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<PropValue<E>>
    where
        K: Into<String>,
        V: Into<PropValue<E>>,
    {
        self.values.insert(key.into(), value.into())
    }

    #[inline]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<PropValue<E>>,
    {
        self.insert(key, value);
        self
    }

    /// Add an event handler prop.
    #[inline]
    pub fn on<K, F>(self, key: K, f: F) -> Self
    where
        K: Into<String>,
        F: Fn(E) + 'static,
    {
        self.with(key, EventHandler::new(f))
    }

    pub fn set_tag(&mut self, key: TagKey, tag: impl Into<TagId>) {
        self.values
            .insert(key.as_str().to_string(), PropValue::from(tag.into()));
    }

    #[inline]
    pub fn with_tag(mut self, key: TagKey, tag: impl Into<TagId>) -> Self {
        self.set_tag(key, tag);
        self
    }

    pub fn tag_identifier(&self, key: TagKey) -> Option<&PropValue<E>> {
        self.values.get(key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&PropValue<E>> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<E>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    // Children.

    pub fn add_child(&mut self, child: C) {
        self.children.push(child);
    }

    #[inline]
    pub fn child(mut self, child: C) -> Self {
        self.add_child(child);
        self
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Keys of `self` whose value differs from `prev`, or that are absent
    /// from `prev`.
    pub fn changed_keys(&self, prev: &Self) -> Vec<String> {
        self.values
            .iter()
            .filter(|(key, value)| prev.values.get(key.as_str()) != Some(*value))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Keys of `prev` that are absent from `self`.
    pub fn removed_keys<'a>(&self, prev: &'a Self) -> Vec<&'a str> {
        prev.keys()
            .filter(|key| !self.values.contains_key(*key))
            .collect()
    }
}

impl<E, C> Default for Props<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C: Clone> Clone for Props<E, C> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            children: self.children.clone(),
        }
    }
}

impl<E, C> std::fmt::Debug for Props<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Props")
            .field("values", &self.values)
            .field("children", &self.children.len())
            .finish()
    }
}

/// Returns `true` for keys that are never assigned to the element nor
/// treated as event props.
#[inline]
pub fn is_reserved(key: &str, tag_key: TagKey) -> bool {
    key == CHILDREN_KEY || key == tag_key.as_str()
}

/// A prop is an event prop if its key is non-empty and its value callable.
#[inline]
pub fn classify_event_prop<E>(key: &str, value: &PropValue<E>) -> bool {
    !key.is_empty() && value.is_callable()
}

/// Derive the native event name for an event prop key.
///
/// `onIncrement` maps to `increment`. Keys not following the `on` +
/// uppercase letter convention are used verbatim.
pub fn listener_event_name(key: &str) -> Cow<'_, str> {
    let bytes = key.as_bytes();
    if bytes.len() > 2 && key.starts_with("on") && bytes[2].is_ascii_uppercase() {
        let mut name = String::with_capacity(key.len() - 2);
        name.push(bytes[2].to_ascii_lowercase() as char);
        name.push_str(&key[3..]);
        Cow::Owned(name)
    } else {
        Cow::Borrowed(key)
    }
}
