//! Render and manage native web components (custom elements) from a
//! component-tree UI framework.
//!
//! An [`ElementBridge`] owns one element at a time and keeps it equal to the
//! latest prop set: plain props become element properties, callable props
//! become event listeners. Prop updates are diffed against the previous set,
//! so only changed props touch the element.
//!
//! ```
//! use wc_bridge::{ElementBridge, Props, TagKey};
//!
//! let props = Props::new()
//!     .with_tag(TagKey::Type, "x-counter")
//!     .with("value", 5)
//!     .on("onIncrement", |_ev: web_sys::Event| {});
//!
//! let bridge = ElementBridge::<web_sys::Element>::new(props);
//! let desc = bridge.render().unwrap();
//! assert_eq!(desc.tag.as_str(), "x-counter");
//! // A browser host now calls `wc_bridge::web::mount(&parent, desc)`.
//! ```

mod error;
mod signal;

pub mod bridge;
pub mod component;
pub mod element;
pub mod props;
pub mod tag;
pub mod web;

pub use self::{
    bridge::{BridgeConfig, BridgeProps, BridgeState, ElementBridge, ElementDescription},
    component::{wrap, wrap_with, Instance, WebComponent},
    element::{NativeElement, Property, RefSink},
    error::BridgeError,
    props::{EventHandler, PropValue, Props, TagKey},
    tag::{TagId, TagName},
};
