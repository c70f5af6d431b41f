#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use wc_bridge::{EventHandler, NativeElement, PropValue, Property};

pub type Event = &'static str;

/// An operation recorded by [`RecordingElement`].
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    SetValue(String, PropValue<Event>),
    SetListener(String, u32),
    Add(String, u32),
    Remove(String, u32),
}

struct Listener {
    id: u32,
    event: String,
    handler: EventHandler<Event>,
}

#[derive(Default)]
struct State {
    ops: Vec<Op>,
    next_id: u32,
    listeners: Vec<Listener>,
}

/// In-memory element that records every mutation and can dispatch events to
/// its registered listeners.
///
/// Siblings share one log, which makes ordering across elements observable.
#[derive(Clone)]
pub struct RecordingElement {
    label: &'static str,
    state: Rc<RefCell<State>>,
}

impl PartialEq for RecordingElement {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Rc::ptr_eq(&self.state, &other.state)
    }
}

impl std::fmt::Debug for RecordingElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RecordingElement({})", self.label)
    }
}

impl RecordingElement {
    pub fn new() -> Self {
        Self {
            label: "a",
            state: Rc::default(),
        }
    }

    /// A different element recording into the same log.
    pub fn sibling(&self, label: &'static str) -> Self {
        Self {
            label,
            state: self.state.clone(),
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.state.borrow().ops.clone()
    }

    pub fn take_ops(&self) -> Vec<Op> {
        std::mem::take(&mut self.state.borrow_mut().ops)
    }

    /// Event names with a currently registered listener, in registration
    /// order.
    pub fn listening(&self) -> Vec<String> {
        self.state
            .borrow()
            .listeners
            .iter()
            .map(|l| l.event.clone())
            .collect()
    }

    pub fn has_listener(&self, event: &str, handler: &EventHandler<Event>) -> bool {
        self.state
            .borrow()
            .listeners
            .iter()
            .any(|l| l.event == event && l.handler.ptr_eq(handler))
    }

    /// The last value assigned to property `name`.
    pub fn property(&self, name: &str) -> Option<PropValue<Event>> {
        self.state.borrow().ops.iter().rev().find_map(|op| match op {
            Op::SetValue(key, value) if key == name => Some(value.clone()),
            _ => None,
        })
    }

    pub fn dispatch(&self, event: &str, payload: Event) {
        let handlers: Vec<_> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.event == event)
            .map(|l| l.handler.clone())
            .collect();
        for handler in handlers {
            handler.call(payload);
        }
    }
}

impl NativeElement for RecordingElement {
    type Event = Event;
    type Child = String;
    type Listener = u32;

    fn set_property(&self, name: &str, value: Property<'_, Self>) {
        let op = match value {
            Property::Value(value) => Op::SetValue(name.to_string(), value.clone()),
            Property::Listener(id) => Op::SetListener(name.to_string(), *id),
        };
        self.state.borrow_mut().ops.push(op);
    }

    fn add_listener(&self, event: &str, handler: &EventHandler<Event>) -> u32 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.listeners.push(Listener {
            id,
            event: event.to_string(),
            handler: handler.clone(),
        });
        state.ops.push(Op::Add(event.to_string(), id));
        id
    }

    fn remove_listener(&self, event: &str, listener: u32) {
        let mut state = self.state.borrow_mut();
        state.listeners.retain(|l| l.id != listener);
        state.ops.push(Op::Remove(event.to_string(), listener));
    }
}
