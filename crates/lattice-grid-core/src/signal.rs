//! Signal/slot system for Lattice Grid.
//!
//! This module provides a type-safe, Qt-inspired signal/slot mechanism for
//! communication between the column model, the visual elements and the header
//! cell controllers. Signals are emitted when state changes, and connected
//! slots (callbacks) are invoked synchronously in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`Subscription`] - Handle that releases a connection (or any other
//!   externally owned registration) exactly once
//!
//! # Dispatch
//!
//! Grid notifications are dispatched on the UI thread by the host event loop,
//! so every slot is invoked directly from [`Signal::emit`]. The connection
//! table is not locked while slots run: a slot may connect slots or
//! release subscriptions on the signal that is currently emitting.
//!
//! # Example
//!
//! ```
//! use lattice_grid_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Subscribe a slot (closure)
//! let subscription = text_changed.subscribe(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Release the connection when done
//! subscription.unsubscribe();
//! assert_eq!(text_changed.connection_count(), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Key of a slot in a signal's connection table.
    struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type ConnectionTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a reference
/// to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, f32)` for multiple arguments.
pub struct Signal<Args> {
    /// All active connections. Shared with outstanding [`Subscription`]s.
    connections: Arc<ConnectionTable<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Connect a slot (closure) for the lifetime of the signal.
    ///
    /// Use [`subscribe`](Self::subscribe) for a connection that can be
    /// released.
    pub fn connect<F>(&self, slot: F)
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.insert(slot);
    }

    fn insert<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot and return a [`Subscription`] that disconnects it.
    ///
    /// The subscription only holds a weak reference to the connection table,
    /// so releasing it after the signal itself is gone does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_grid_core::Signal;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Signal::<i32>::new();
    /// let counter = Arc::new(AtomicI32::new(0));
    /// {
    ///     let counter_clone = counter.clone();
    ///     let _subscription = signal.subscribe(move |&n| {
    ///         counter_clone.fetch_add(n, Ordering::SeqCst);
    ///     });
    ///     signal.emit(42);  // counter = 42
    /// }
    /// signal.emit(43);  // Nothing happens - the subscription was dropped
    /// assert_eq!(counter.load(Ordering::SeqCst), 42);
    /// ```
    pub fn subscribe<F>(&self, slot: F) -> Subscription
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.insert(slot);
        let table = Arc::downgrade(&self.connections);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.lock().remove(id);
            }
        })
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// The set of slots is captured before the first slot runs; a slot
    /// released during the emission is still invoked for this emission.
    #[tracing::instrument(skip_all, target = "lattice_grid_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

/// A handle to a registration that must be released exactly once.
///
/// Returned by [`Signal::subscribe`] and by anything else that attaches
/// behavior to an object it does not own (drag handling, controller wiring).
/// The registration is released by [`unsubscribe`](Self::unsubscribe) or, if
/// that never happens, when the handle is dropped.
#[must_use = "dropping a Subscription releases it immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when it is released.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Whether this subscription still has a pending release.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the registration now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<i32>>>, impl Fn(&i32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        (seen, move |&value: &i32| seen_clone.lock().push(value))
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<i32>::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for slot in 0..3 {
            let order = order.clone();
            signal.connect(move |&value| order.lock().push((slot, value)));
        }

        signal.emit(7);
        assert_eq!(*order.lock(), vec![(0, 7), (1, 7), (2, 7)]);
        assert_eq!(signal.connection_count(), 3);
    }

    #[test]
    fn test_subscription_releases_only_its_slot() {
        let signal = Signal::<i32>::new();
        let (kept, kept_slot) = recorder();
        let (released, released_slot) = recorder();

        let _kept = signal.subscribe(kept_slot);
        let subscription = signal.subscribe(released_slot);
        assert!(subscription.is_active());

        signal.emit(1);
        subscription.unsubscribe();
        signal.emit(2);

        assert_eq!(*kept.lock(), vec![1, 2]);
        assert_eq!(*released.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn test_dropped_subscription_releases() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = count.clone();
            let _subscription = signal.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
            signal.emit(());
        }
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_signal() {
        let signal = Signal::<i32>::new();
        let subscription = signal.subscribe(|_| {});
        drop(signal);
        subscription.unsubscribe();
    }

    #[test]
    fn test_slot_can_release_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let holder: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let holder_clone = holder.clone();
        let subscription = signal.subscribe(move |_| {
            if let Some(subscription) = holder_clone.lock().take() {
                subscription.unsubscribe();
            }
        });
        *holder.lock() = Some(subscription);

        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_custom_release_runs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let subscription = Subscription::new(move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        subscription.unsubscribe();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
