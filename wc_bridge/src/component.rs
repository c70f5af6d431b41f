//! Wrapping a tag identifier into a reusable component type.

use std::marker::PhantomData;

use crate::{
    bridge::{BridgeConfig, BridgeProps, ElementBridge, ElementDescription},
    element::{NativeElement, RefSink},
    error::BridgeError,
    tag::TagId,
};

/// A component type for one web component tag.
///
/// Each [`Instance`] owns its own [`ElementBridge`].
pub struct WebComponent<N> {
    tag: TagId,
    config: BridgeConfig,
    _marker: PhantomData<fn() -> N>,
}

impl<N> Clone for WebComponent<N> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            config: self.config,
            _marker: PhantomData,
        }
    }
}

/// Wrap a tag identifier into a component type.
///
/// ```
/// use wc_bridge::{wrap, Props, TagId};
///
/// struct FancyButton;
///
/// let button = wrap::<web_sys::Element>(TagId::of::<FancyButton>());
/// let mut instance = button.instance();
/// let desc = instance.render(Props::new().with("label", "Go")).unwrap();
/// assert_eq!(desc.tag.as_str(), "fancy-button");
/// ```
pub fn wrap<N: NativeElement>(tag: impl Into<TagId>) -> WebComponent<N> {
    wrap_with(tag, BridgeConfig::default())
}

pub fn wrap_with<N: NativeElement>(tag: impl Into<TagId>, config: BridgeConfig) -> WebComponent<N> {
    WebComponent {
        tag: tag.into(),
        config,
        _marker: PhantomData,
    }
}

impl<N: NativeElement> WebComponent<N> {
    pub fn instance(&self) -> Instance<N> {
        Instance {
            tag: self.tag.clone(),
            config: self.config,
            bridge: None,
        }
    }
}

/// One rendered occurrence of a [`WebComponent`].
pub struct Instance<N: NativeElement> {
    tag: TagId,
    config: BridgeConfig,
    bridge: Option<ElementBridge<N>>,
}

impl<N: NativeElement> Instance<N> {
    /// Render with the given props.
    ///
    /// The wrapped tag identifier is injected under the configured tag key,
    /// overriding any value the caller supplied for it.
    pub fn render(&mut self, props: BridgeProps<N>) -> Result<ElementDescription<N>, BridgeError> {
        self.render_inner(props, None)
    }

    /// Render, forwarding the live element to `sink`.
    pub fn render_with_ref(
        &mut self,
        props: BridgeProps<N>,
        sink: RefSink<N>,
    ) -> Result<ElementDescription<N>, BridgeError> {
        self.render_inner(props, Some(sink))
    }

    fn render_inner(
        &mut self,
        mut props: BridgeProps<N>,
        sink: Option<RefSink<N>>,
    ) -> Result<ElementDescription<N>, BridgeError> {
        props.set_tag(self.config.tag_key, self.tag.clone());

        let bridge = match self.bridge.take() {
            Some(bridge) => {
                bridge.update(props);
                bridge
            }
            None => ElementBridge::with_config(self.config, props),
        };
        bridge.set_ref_sink(sink);
        let desc = bridge.render();
        self.bridge = Some(bridge);
        desc
    }

    pub fn bridge(&self) -> Option<&ElementBridge<N>> {
        self.bridge.as_ref()
    }
}
