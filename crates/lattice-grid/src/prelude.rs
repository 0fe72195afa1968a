//! Prelude module for Lattice Grid.
//!
//! ```ignore
//! use lattice_grid::prelude::*;
//! ```
//!
//! This provides access to:
//! - Columns and their configuration (`Column`, `ColumnDef`, `ColumnSet`)
//! - Grid configuration (`GridOptions`)
//! - Header cells and their collaborators (`HeaderCell`, `HeaderContext`)
//! - Visual elements (`Element`, `ElementRef`)
//! - Sort states (`SortDirection`, `SortingOrder`)

// ============================================================================
// Signals and Subscriptions
// ============================================================================

pub use lattice_grid_core::{Property, Signal, Subscription, Teardown};

// ============================================================================
// Columns and Configuration
// ============================================================================

pub use crate::column::{ClassRule, Column, ColumnDef, ColumnResized, ColumnSet, HeaderClass};
pub use crate::error::{ConfigError, SortCycleError};
pub use crate::options::GridOptions;
pub use crate::sort::{SortDirection, SortingOrder};

// ============================================================================
// Elements and Gestures
// ============================================================================

pub use crate::drag::{DragParams, DragService, PointerDragService};
pub use crate::element::{ClickEvent, Element, ElementRef, KeyboardModifiers, PointerEvent};

// ============================================================================
// Header Cells
// ============================================================================

pub use crate::header::{
    DefaultHeaderTemplate, HeaderCell, HeaderRendererParams, RenderedContent, TemplateProvider,
};
pub use crate::services::{
    ColumnController, ControllerWiring, FilterManager, HeaderContext, MenuFactory, NoFilters,
    SortListener,
};
