//! Core systems for Lattice Grid.
//!
//! This crate provides the foundational pieces the grid's header cells are
//! built from:
//!
//! - **Signal/Slot System**: Type-safe notifications between the column model
//!   and its views
//! - **Subscriptions**: Handles that release a registration exactly once
//! - **Property System**: Reactive properties with change detection
//! - **Teardown Registry**: Ordered, run-once cleanup of everything a
//!   controller attached to objects it does not own
//!
//! # Example
//!
//! ```
//! use lattice_grid_core::{Property, Signal, Teardown};
//!
//! let width = Property::new(120.0_f32);
//! let width_changed = Signal::<f32>::new();
//! let mut teardown = Teardown::new();
//!
//! teardown.push_subscription(width_changed.subscribe(|w| {
//!     println!("width is now {w}");
//! }));
//!
//! if width.set(140.0) {
//!     width_changed.emit(width.get());
//! }
//!
//! teardown.run();
//! assert_eq!(width_changed.connection_count(), 0);
//! ```

pub mod logging;
pub mod property;
pub mod signal;
pub mod teardown;

pub use property::Property;
pub use signal::{Signal, Subscription};
pub use teardown::{Teardown, TeardownAction};
