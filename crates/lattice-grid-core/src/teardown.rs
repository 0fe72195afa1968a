//! Ordered cleanup for objects that attach behavior to things they don't own.
//!
//! A controller that connects to shared model signals, hands gesture
//! callbacks to a drag primitive or creates externally owned scopes records
//! one [`TeardownAction`] per registration. [`Teardown::run`] executes them
//! once, in registration order, when the controller is disposed.
//!
//! ```
//! use lattice_grid_core::{Signal, Teardown};
//!
//! let moving_changed = Signal::<bool>::new();
//! let mut teardown = Teardown::new();
//!
//! teardown.push_subscription(moving_changed.subscribe(|_| {}));
//! teardown.push(|| println!("scope destroyed"));
//! assert_eq!(moving_changed.connection_count(), 1);
//!
//! assert_eq!(teardown.run(), 2);
//! assert_eq!(moving_changed.connection_count(), 0);
//! ```

use std::fmt;

use crate::logging::targets;
use crate::signal::Subscription;

/// A zero-argument cleanup operation executed exactly once.
pub type TeardownAction = Box<dyn FnOnce() + Send>;

/// Registry of cleanup actions, run once in registration order.
///
/// Actions pushed after the registry has run are executed immediately. A
/// registry dropped without being run executes its pending actions on drop.
#[derive(Default)]
pub struct Teardown {
    actions: Vec<TeardownAction>,
    has_run: bool,
}

impl Teardown {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cleanup action.
    pub fn push<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.has_run {
            tracing::debug!(target: targets::TEARDOWN, "registry already ran, executing action now");
            action();
            return;
        }
        self.actions.push(Box::new(action));
    }

    /// Register the release of a subscription.
    pub fn push_subscription(&mut self, subscription: Subscription) {
        self.push(move || subscription.unsubscribe());
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether there are no pending actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether [`run`](Self::run) has been called.
    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Execute every pending action in registration order.
    ///
    /// Returns the number of actions executed. Later calls execute nothing.
    pub fn run(&mut self) -> usize {
        self.has_run = true;
        let actions = std::mem::take(&mut self.actions);
        let count = actions.len();
        tracing::debug!(target: targets::TEARDOWN, count, "running teardown actions");
        for action in actions {
            action();
        }
        count
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        if !self.actions.is_empty() {
            self.run();
        }
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("pending", &self.actions.len())
            .field("has_run", &self.has_run)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::Signal;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Box<dyn FnOnce() + Send>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |n: u32| -> Box<dyn FnOnce() + Send> {
            let log = log_clone.clone();
            Box::new(move || log.lock().push(n))
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_registration_order_once() {
        let (log, make) = recorder();
        let mut teardown = Teardown::new();
        teardown.push(make(1));
        teardown.push(make(2));
        teardown.push(make(3));
        assert_eq!(teardown.len(), 3);

        assert_eq!(teardown.run(), 3);
        assert_eq!(teardown.run(), 0);
        assert!(teardown.has_run());
        assert_eq!(*log.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_push_after_run_executes_immediately() {
        let (log, make) = recorder();
        let mut teardown = Teardown::new();
        teardown.run();
        teardown.push(make(7));
        assert!(teardown.is_empty());
        assert_eq!(*log.lock(), vec![7]);
    }

    #[test]
    fn test_drop_runs_pending_actions() {
        let (log, make) = recorder();
        {
            let mut teardown = Teardown::new();
            teardown.push(make(1));
            teardown.push(make(2));
        }
        assert_eq!(*log.lock(), vec![1, 2]);
    }

    #[test]
    fn test_subscription_released_by_teardown() {
        let signal = Signal::<bool>::new();
        let mut teardown = Teardown::new();
        teardown.push_subscription(signal.subscribe(|_| {}));
        teardown.push_subscription(signal.subscribe(|_| {}));
        assert_eq!(signal.connection_count(), 2);

        teardown.run();
        assert_eq!(signal.connection_count(), 0);
    }
}
