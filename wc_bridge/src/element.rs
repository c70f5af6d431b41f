use std::{cell::RefCell, rc::Rc};

use crate::props::{EventHandler, PropValue};

/// An element a bridge can drive.
///
/// Implemented for [`web_sys::Element`]. Other implementations are useful
/// for non-browser hosts and for tests.
pub trait NativeElement: Clone + PartialEq + 'static {
    /// Event type passed to listeners.
    type Event: 'static;
    /// Child type forwarded through element descriptions.
    type Child: Clone;
    /// Token returned when registering a listener, required to remove it.
    type Listener;

    /// Assign a property directly on the element.
    fn set_property(&self, name: &str, value: Property<'_, Self>);

    fn add_listener(&self, event: &str, handler: &EventHandler<Self::Event>) -> Self::Listener;

    fn remove_listener(&self, event: &str, listener: Self::Listener);
}

/// A value assigned to an element property.
pub enum Property<'a, N: NativeElement> {
    Value(&'a PropValue<N::Event>),
    /// Callable props are assigned as the registered listener.
    Listener(&'a N::Listener),
}

/// Receives the live element reference of a bridge.
///
/// Invoked with the element on attach and with `None` on detach.
pub enum RefSink<N> {
    Callback(Rc<dyn Fn(Option<&N>)>),
    Container(Rc<RefCell<Option<N>>>),
}

impl<N: Clone> RefSink<N> {
    pub fn callback<F: Fn(Option<&N>) + 'static>(f: F) -> Self {
        Self::Callback(Rc::new(f))
    }

    pub fn container(target: Rc<RefCell<Option<N>>>) -> Self {
        Self::Container(target)
    }

    pub fn set(&self, element: Option<&N>) {
        match self {
            Self::Callback(f) => f(element),
            Self::Container(target) => {
                *target.borrow_mut() = element.cloned();
            }
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Callback(a), Self::Callback(b)) => Rc::ptr_eq(a, b),
            (Self::Container(a), Self::Container(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<N> Clone for RefSink<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Callback(f) => Self::Callback(f.clone()),
            Self::Container(target) => Self::Container(target.clone()),
        }
    }
}
