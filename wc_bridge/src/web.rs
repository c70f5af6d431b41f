//! Browser implementation: bridging [`web_sys::Element`]s.

use futures::{
    future::{AbortHandle, Abortable},
    Future,
};
use futures_signals::signal::Signal;
use once_cell::unsync::OnceCell;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::{
    bridge::{BridgeProps, ElementBridge, ElementDescription, MountCallback},
    element::{NativeElement, Property},
    props::{EventHandler, PropValue},
};

/// Listener registered on a [`web_sys::Element`].
///
/// Dropping it invalidates the Javascript function.
pub type JsListener = Closure<dyn Fn(web_sys::Event)>;

impl NativeElement for web_sys::Element {
    type Event = web_sys::Event;
    type Child = web_sys::Node;
    type Listener = JsListener;

    fn set_property(&self, name: &str, value: Property<'_, Self>) {
        let js = match value {
            Property::Value(value) => prop_to_js(value),
            Property::Listener(listener) => listener.as_ref().clone(),
        };
        let target: &JsValue = self.as_ref();
        if let Err(err) = js_sys::Reflect::set(target, &JsValue::from_str(name), &js) {
            tracing::error!(property=%name, ?err, "Could not set web component property");
        }
    }

    fn add_listener(&self, event: &str, handler: &EventHandler<web_sys::Event>) -> JsListener {
        let handler = handler.clone();
        let boxed: Box<dyn Fn(web_sys::Event)> = Box::new(move |event: web_sys::Event| {
            handler.call(event);
        });
        let closure = Closure::wrap(boxed);

        if let Err(err) =
            self.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            tracing::error!(%event, ?err, "Could not add web component event listener");
        }
        closure
    }

    fn remove_listener(&self, event: &str, listener: JsListener) {
        if let Err(err) =
            self.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        {
            tracing::error!(%event, ?err, "Could not remove web component event listener");
        }
    }
}

fn prop_to_js(value: &PropValue<web_sys::Event>) -> JsValue {
    match value {
        PropValue::Null => JsValue::NULL,
        PropValue::Bool(v) => JsValue::from_bool(*v),
        PropValue::Number(v) => JsValue::from_f64(*v),
        PropValue::Str(v) => JsValue::from_str(v),
        PropValue::Component(id) => id
            .resolve()
            .map(|tag| JsValue::from_str(tag.as_str()))
            .unwrap_or(JsValue::UNDEFINED),
        PropValue::Js(v) => v.clone(),
        // Handlers are always assigned as their registered listener.
        PropValue::Handler(_) => JsValue::UNDEFINED,
    }
}

pub fn document() -> Result<web_sys::Document, JsValue> {
    thread_local! {
        static DOCUMENT: OnceCell<web_sys::Document> = OnceCell::new();
    }

    DOCUMENT.with(|doc| {
        doc.get_or_try_init(|| {
            web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("no document available"))
        })
        .cloned()
    })
}

/// A bridged element attached to the document.
///
/// Dropping it detaches the bridge and removes the element.
#[must_use]
pub struct MountedElement {
    element: web_sys::Element,
    on_mount: MountCallback<web_sys::Element>,
}

impl MountedElement {
    #[inline]
    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }
}

impl Drop for MountedElement {
    fn drop(&mut self) {
        self.on_mount.call(None);
        self.element.remove();
    }
}

/// Create the described element, append it to `parent` and report it to
/// its bridge.
pub fn mount(
    parent: &web_sys::Node,
    desc: ElementDescription<web_sys::Element>,
) -> Result<MountedElement, JsValue> {
    let element = document()?.create_element(desc.tag.as_str())?;
    for (name, value) in &desc.attributes {
        element.set_attribute(name, value)?;
    }
    for child in &desc.children {
        element.append_child(child)?;
    }
    parent.append_child(&element)?;

    desc.on_mount.call(Some(element.clone()));
    Ok(MountedElement {
        element,
        on_mount: desc.on_mount,
    })
}

/// A guard for a spawned future.
/// If dropped, the future will be aborted.
#[must_use]
pub struct AbortGuard(AbortHandle);

impl Drop for AbortGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub fn spawn_guarded<F: Future<Output = ()> + 'static>(f: F) -> AbortGuard {
    let (handle, reg) = AbortHandle::new_pair();
    let f = Abortable::new(f, reg);
    wasm_bindgen_futures::spawn_local(async move {
        f.await.ok();
    });
    AbortGuard(handle)
}

/// Keep `bridge` in sync with a signal of props until the guard is dropped.
pub fn spawn_props_signal<S>(bridge: &ElementBridge<web_sys::Element>, signal: S) -> AbortGuard
where
    S: Signal<Item = BridgeProps<web_sys::Element>> + 'static,
{
    spawn_guarded(bridge.props_signal_future(signal))
}
