use std::{
    cell::{Ref, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::{
    element::{NativeElement, Property, RefSink},
    error::BridgeError,
    props::{classify_event_prop, is_reserved, listener_event_name, PropValue, Props, TagKey},
    tag::{resolve_tag, TagName},
};

/// Props as seen by a bridge for element type `N`.
pub type BridgeProps<N> = Props<<N as NativeElement>::Event, <N as NativeElement>::Child>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    /// The prop key carrying the tag identifier.
    pub tag_key: TagKey,
    /// List every prop with a literal `true` value as an attribute of the
    /// element description, so boolean attributes are present on creation.
    pub forward_true_attributes: bool,
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_key(mut self, key: TagKey) -> Self {
        self.tag_key = key;
        self
    }

    pub fn forward_true_attributes(mut self, flag: bool) -> Self {
        self.forward_true_attributes = flag;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeState {
    Unmounted,
    Mounted,
}

struct Registered<L> {
    event: String,
    listener: L,
}

struct Inner<N: NativeElement> {
    config: BridgeConfig,
    props: BridgeProps<N>,
    element: Option<N>,
    listeners: BTreeMap<String, Registered<N::Listener>>,
    ref_sink: Option<RefSink<N>>,
}

impl<L> Registered<L> {
    /// Remove the listener and clear the property that pointed at it.
    fn detach<N: NativeElement<Listener = L>>(self, element: &N, key: &str) {
        tracing::trace!(prop = %key, event = %self.event, "detaching web component listener");
        element.remove_listener(&self.event, self.listener);
        element.set_property(key, Property::Value(&PropValue::Null));
    }
}

impl<N: NativeElement> Drop for Inner<N> {
    fn drop(&mut self) {
        if let Some(element) = self.element.take() {
            for (key, reg) in std::mem::take(&mut self.listeners) {
                reg.detach(&element, &key);
            }
            if let Some(sink) = &self.ref_sink {
                sink.set(None);
            }
            tracing::debug!("web component bridge dropped while mounted, released");
        }
    }
}

/// Keeps one native element in sync with the latest prop set.
///
/// The bridge is a cheap handle; clones share state. Dropping the last
/// handle of a mounted bridge releases its listeners.
pub struct ElementBridge<N: NativeElement>(Rc<RefCell<Inner<N>>>);

impl<N: NativeElement> Clone for ElementBridge<N> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<N: NativeElement> ElementBridge<N> {
    pub fn new(props: BridgeProps<N>) -> Self {
        Self::with_config(BridgeConfig::default(), props)
    }

    pub fn with_config(config: BridgeConfig, props: BridgeProps<N>) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            config,
            props,
            element: None,
            listeners: BTreeMap::new(),
            ref_sink: None,
        })))
    }

    pub fn downgrade(&self) -> WeakBridge<N> {
        WeakBridge(Rc::downgrade(&self.0))
    }

    pub fn state(&self) -> BridgeState {
        if self.is_mounted() {
            BridgeState::Mounted
        } else {
            BridgeState::Unmounted
        }
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.0.borrow().element.is_some()
    }

    pub fn element(&self) -> Option<N> {
        self.0.borrow().element.clone()
    }

    pub fn props(&self) -> Ref<'_, BridgeProps<N>> {
        Ref::map(self.0.borrow(), |inner| &inner.props)
    }

    /// Keys of the props currently registered as event listeners.
    pub fn listener_keys(&self) -> Vec<String> {
        self.0.borrow().listeners.keys().cloned().collect()
    }

    /// Describe the element to create.
    ///
    /// Fails if the props carry no usable tag identifier.
    pub fn render(&self) -> Result<ElementDescription<N>, BridgeError> {
        let inner = self.0.borrow();
        let tag_key = inner.config.tag_key;
        let tag = resolve_tag(&inner.props, tag_key)?;

        let attributes = if inner.config.forward_true_attributes {
            inner
                .props
                .iter()
                .filter(|(key, value)| !is_reserved(key, tag_key) && value.is_true())
                .map(|(key, _)| (key.to_string(), String::new()))
                .collect()
        } else {
            Vec::new()
        };

        Ok(ElementDescription {
            tag,
            attributes,
            children: inner.props.children().to_vec(),
            on_mount: MountCallback(self.downgrade()),
        })
    }

    /// Set the target that mirrors the live element reference.
    ///
    /// A different sink supplied while mounted receives the element right
    /// away, and the previous one is reset to `None`.
    pub fn set_ref_sink(&self, sink: Option<RefSink<N>>) {
        let (element, old) = {
            let mut inner = self.0.borrow_mut();
            let unchanged = match (&inner.ref_sink, &sink) {
                (Some(a), Some(b)) => a.ptr_eq(b),
                (None, None) => true,
                _ => false,
            };
            if unchanged {
                return;
            }
            let old = std::mem::replace(&mut inner.ref_sink, sink.clone());
            (inner.element.clone(), old)
        };

        if let Some(element) = element {
            if let Some(old) = old {
                old.set(None);
            }
            if let Some(sink) = sink {
                sink.set(Some(&element));
            }
        }
    }

    /// Called by the host when the native element is attached (`Some`) or
    /// detached (`None`).
    pub fn on_mount(&self, element: Option<N>) {
        match element {
            Some(element) => self.on_attach(element),
            None => self.on_detach(),
        }
    }

    pub fn on_attach(&self, element: N) {
        if self.0.borrow().element.as_ref() == Some(&element) {
            return;
        }

        let replaced = self.detach_all().is_some();
        self.0.borrow_mut().element = Some(element.clone());
        tracing::debug!(replaced, "web component attached");

        let keys: Vec<String> = self.0.borrow().props.keys().map(String::from).collect();
        self.apply_keys(keys);

        let sink = self.0.borrow().ref_sink.clone();
        if let Some(sink) = sink {
            sink.set(Some(&element));
        }
    }

    #[inline]
    pub fn on_detach(&self) {
        self.release();
    }

    /// Detach every registered listener and clear the element reference.
    ///
    /// No-op if the bridge is not mounted.
    pub fn release(&self) {
        if self.detach_all().is_none() {
            return;
        }
        tracing::debug!("web component detached");

        let sink = self.0.borrow().ref_sink.clone();
        if let Some(sink) = sink {
            sink.set(None);
        }
    }

    /// Replace the current props and sync the element with the difference.
    pub fn update(&self, next: BridgeProps<N>) {
        let prev = std::mem::replace(&mut self.0.borrow_mut().props, next);
        self.on_props_changed(&prev);
    }

    /// Sync the element after the props changed from `prev` to the current
    /// set.
    ///
    /// Listeners of changed or removed event props are detached before
    /// changed props are applied. A removed event prop leaves `Null` behind
    /// on the element.
    pub fn on_props_changed(&self, prev: &BridgeProps<N>) {
        let (element, stale, removed, changed) = {
            let mut guard = self.0.borrow_mut();
            let inner = &mut *guard;
            let Some(element) = inner.element.clone() else {
                return;
            };

            let changed = inner.props.changed_keys(prev);
            let removed: Vec<String> = inner
                .props
                .removed_keys(prev)
                .into_iter()
                .map(String::from)
                .collect();

            let was_event = |key: &String| {
                prev.get(key)
                    .map_or(false, |value| classify_event_prop(key, value))
            };
            let mut take_registered = |keys: &[String]| -> Vec<(String, Registered<N::Listener>)> {
                keys.iter()
                    .filter(|key| was_event(*key))
                    .filter_map(|key| Some((key.clone(), inner.listeners.remove(key)?)))
                    .collect()
            };
            let stale = take_registered(&changed);
            let removed = take_registered(&removed);
            (element, stale, removed, changed)
        };

        // Changed keys get their new value assigned right after.
        for (key, reg) in stale {
            tracing::trace!(prop = %key, event = %reg.event, "detaching web component listener");
            element.remove_listener(&reg.event, reg.listener);
        }
        for (key, reg) in removed {
            reg.detach(&element, &key);
        }
        self.apply_keys(changed);
    }

    /// Apply the given props from the current set to the element.
    ///
    /// Reserved keys are skipped. Callable values are registered as
    /// listeners and also assigned as properties.
    /// No-op if the bridge is not mounted.
    pub fn apply_keys<I, K>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let (element, entries) = {
            let inner = self.0.borrow();
            let Some(element) = inner.element.clone() else {
                return;
            };
            let tag_key = inner.config.tag_key;
            let entries: Vec<(String, PropValue<N::Event>)> = keys
                .into_iter()
                .map(Into::into)
                .filter(|key| !is_reserved(key, tag_key))
                .filter_map(|key| {
                    let value = inner.props.get(&key)?.clone();
                    Some((key, value))
                })
                .collect();
            (element, entries)
        };

        for (key, value) in entries {
            match &value {
                PropValue::Handler(handler) if classify_event_prop(&key, &value) => {
                    let event = listener_event_name(&key).into_owned();
                    tracing::trace!(prop = %key, event = %event, "attaching web component listener");
                    let listener = element.add_listener(&event, handler);
                    element.set_property(&key, Property::Listener(&listener));

                    let old = self
                        .0
                        .borrow_mut()
                        .listeners
                        .insert(key, Registered { event, listener });
                    if let Some(old) = old {
                        element.remove_listener(&old.event, old.listener);
                    }
                }
                _ => {
                    tracing::trace!(prop = %key, "setting web component property");
                    element.set_property(&key, Property::Value(&value));
                }
            }
        }
    }

    /// Remove all listeners from the held element, reset their properties
    /// and clear the element.
    ///
    /// Returns the released element.
    fn detach_all(&self) -> Option<N> {
        let (element, listeners) = {
            let mut inner = self.0.borrow_mut();
            let element = inner.element.take()?;
            (element, std::mem::take(&mut inner.listeners))
        };
        for (key, reg) in listeners {
            reg.detach(&element, &key);
        }
        Some(element)
    }
}

/// A weak handle to an [`ElementBridge`].
pub struct WeakBridge<N: NativeElement>(Weak<RefCell<Inner<N>>>);

impl<N: NativeElement> Clone for WeakBridge<N> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<N: NativeElement> WeakBridge<N> {
    pub fn upgrade(&self) -> Option<ElementBridge<N>> {
        self.0.upgrade().map(ElementBridge)
    }
}

/// Host callback that reports the created element back to the bridge.
pub struct MountCallback<N: NativeElement>(WeakBridge<N>);

impl<N: NativeElement> Clone for MountCallback<N> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<N: NativeElement> MountCallback<N> {
    pub fn call(&self, element: Option<N>) {
        if let Some(bridge) = self.0.upgrade() {
            bridge.on_mount(element);
        } else {
            #[cfg(debug_assertions)]
            tracing::warn!(
                element=%std::any::type_name::<N>(),
                "Tried to mount dropped web component bridge"
            );
        }
    }
}

/// Describes the element the host should create for a bridge.
pub struct ElementDescription<N: NativeElement> {
    pub tag: TagName,
    /// Attributes to set on creation, as `(name, value)`.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<N::Child>,
    /// Must be invoked with the created element once it is attached, and with
    /// `None` when it is removed.
    pub on_mount: MountCallback<N>,
}
