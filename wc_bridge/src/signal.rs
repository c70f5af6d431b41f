use futures::Future;
use futures_signals::signal::{Signal, SignalExt};

use crate::{
    bridge::{BridgeProps, ElementBridge},
    element::NativeElement,
};

impl<N: NativeElement> ElementBridge<N> {
    /// A future that applies every prop set emitted by `signal`.
    ///
    /// Only holds a weak handle, so emissions after the bridge was dropped
    /// are ignored.
    pub fn props_signal_future<S>(&self, signal: S) -> impl Future<Output = ()> + 'static
    where
        S: Signal<Item = BridgeProps<N>> + 'static,
    {
        let handle = self.downgrade();
        signal.for_each(move |props| {
            if let Some(bridge) = handle.upgrade() {
                bridge.update(props);
            } else {
                #[cfg(debug_assertions)]
                tracing::warn!("Tried to update dropped web component bridge");
            }
            async {}
        })
    }
}
