//! Lattice Grid - header cells for the Lattice data grid.
//!
//! Each visible column of a grid gets a [`HeaderCell`](header::HeaderCell):
//! a controller that builds the column's header from a template and wires
//! sorting, resizing, column moving, the column menu and custom header
//! content against the shared column model.
//!
//! The grid's subsystems are reached through small traits bundled in a
//! [`HeaderContext`](services::HeaderContext). Minimal implementations ship
//! with the crate:
//!
//! - [`ColumnSet`](column::ColumnSet) - column model and sort notification
//! - [`PointerDragService`](drag::PointerDragService) - drag gestures on
//!   element pointer signals
//! - [`DefaultHeaderTemplate`](header::DefaultHeaderTemplate) - the standard
//!   header layout
//!
//! Grid and column configuration load from TOML or JSON via
//! [`GridOptions`](options::GridOptions) and [`ColumnDef`](column::ColumnDef).
//!
//! # Example
//!
//! ```
//! use lattice_grid::prelude::*;
//!
//! let columns = ColumnSet::from_defs([
//!     ColumnDef::new("name").with_header_name("Name"),
//!     ColumnDef::new("price").with_width(120.0),
//! ]);
//! let context = HeaderContext::builder(columns.clone())
//!     .options(GridOptions {
//!         enable_sorting: true,
//!         enable_col_resize: true,
//!         ..GridOptions::default()
//!     })
//!     .build();
//!
//! let header_row = Element::new("div");
//! let cells: Vec<_> = columns
//!     .columns()
//!     .into_iter()
//!     .map(|column| {
//!         let cell = HeaderCell::new(column, context.clone(), header_row.clone());
//!         cell.activate();
//!         header_row.append_child(cell.gui().unwrap());
//!         cell
//!     })
//!     .collect();
//!
//! let price = cells[1].gui().unwrap();
//! assert_eq!(price.width(), Some(120.0));
//!
//! for cell in &cells {
//!     cell.destroy();
//! }
//! ```

pub mod column;
pub mod drag;
pub mod element;
pub mod error;
pub mod header;
pub mod options;
pub mod prelude;
pub mod services;
pub mod sort;

pub use lattice_grid_core::{logging, Signal, Subscription, Teardown};
