//! Collaborators a header cell talks to.
//!
//! The header cell owns none of the grid's subsystems. It reaches the column
//! model, the filter subsystem, the drag primitive, the menu factory and the
//! template provider through the traits in this module, bundled into a
//! [`HeaderContext`] shared by every header cell of a grid.
//!
//! ```
//! use lattice_grid::column::{ColumnDef, ColumnSet};
//! use lattice_grid::options::GridOptions;
//! use lattice_grid::services::HeaderContext;
//!
//! let columns = ColumnSet::from_defs([ColumnDef::new("name")]);
//! let context = HeaderContext::builder(columns)
//!     .options(GridOptions {
//!         enable_sorting: true,
//!         ..GridOptions::default()
//!     })
//!     .build();
//! assert!(context.options.enable_sorting);
//! ```

use std::fmt;
use std::sync::Arc;

use lattice_grid_core::Subscription;

use crate::column::{Column, ColumnSet};
use crate::drag::{DragService, PointerDragService};
use crate::element::ElementRef;
use crate::header::move_column::{DragWiring, MoveColumnController};
use crate::header::renderer::ScopedTemplating;
use crate::header::template::{DefaultHeaderTemplate, TemplateProvider};
use crate::options::GridOptions;

/// The column model as seen from a header cell.
pub trait ColumnController: Send + Sync {
    /// The text shown for the column: its header name, else its id.
    fn display_name(&self, column: &Column) -> String;

    /// Requests a new width. The model clamps it to the column's limits.
    ///
    /// `finished` marks the last update of a resize gesture.
    fn set_column_width(&self, column: &Arc<Column>, width: f32, finished: bool);

    /// Requests that the column be fitted to its content.
    fn auto_size_column(&self, column: &Arc<Column>);

    /// Clears the sort state of every column except `column`.
    fn clear_sort_except(&self, column: &Arc<Column>);
}

/// Receives the "user changed the sort" notification.
pub trait SortListener: Send + Sync {
    /// Called after a header click changed sort state.
    fn on_sorting_changed(&self);
}

/// The filter subsystem as seen from a header cell.
pub trait FilterManager: Send + Sync {
    /// Whether a filter is active on the column.
    fn is_filter_present_for_col(&self, col_id: &str) -> bool;
}

/// A filter subsystem with no filters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFilters;

impl FilterManager for NoFilters {
    fn is_filter_present_for_col(&self, _col_id: &str) -> bool {
        false
    }
}

/// Opens column menus.
pub trait MenuFactory: Send + Sync {
    /// Shows the menu for `column`, positioned against `anchor`.
    fn show_menu(&self, column: &Arc<Column>, anchor: &ElementRef);
}

/// Activates sibling controllers a header cell constructs.
pub trait ControllerWiring: Send + Sync {
    /// Activates a move controller. Releasing the returned subscription
    /// detaches it.
    fn wire_move_controller(&self, controller: MoveColumnController) -> Subscription;
}

/// Everything a header cell needs from its grid.
#[derive(Clone)]
pub struct HeaderContext {
    /// Grid-wide configuration.
    pub options: Arc<GridOptions>,
    /// The column model.
    pub columns: Arc<dyn ColumnController>,
    /// Sort change notification.
    pub sort_listener: Arc<dyn SortListener>,
    /// The filter subsystem.
    pub filters: Arc<dyn FilterManager>,
    /// Header template provider.
    pub templates: Arc<dyn TemplateProvider>,
    /// Drag-gesture primitive.
    pub drag: Arc<dyn DragService>,
    /// Sibling controller activation.
    pub wiring: Arc<dyn ControllerWiring>,
    /// Column menu factory, if the grid has menus.
    pub menus: Option<Arc<dyn MenuFactory>>,
    /// Scope-aware templating hook, if the grid has one.
    pub scoped_templating: Option<Arc<dyn ScopedTemplating>>,
}

impl HeaderContext {
    /// Starts building a context around a column set.
    ///
    /// The column set serves as column controller and sort listener unless
    /// replaced on the builder.
    pub fn builder(columns: Arc<ColumnSet>) -> HeaderContextBuilder {
        HeaderContextBuilder {
            options: GridOptions::default(),
            columns: columns.clone(),
            sort_listener: columns,
            filters: Arc::new(NoFilters),
            templates: Arc::new(DefaultHeaderTemplate),
            drag: Arc::new(PointerDragService),
            wiring: None,
            menus: None,
            scoped_templating: None,
        }
    }
}

impl fmt::Debug for HeaderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderContext")
            .field("options", &self.options)
            .field("menus", &self.menus.is_some())
            .field("scoped_templating", &self.scoped_templating.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`HeaderContext`].
pub struct HeaderContextBuilder {
    options: GridOptions,
    columns: Arc<dyn ColumnController>,
    sort_listener: Arc<dyn SortListener>,
    filters: Arc<dyn FilterManager>,
    templates: Arc<dyn TemplateProvider>,
    drag: Arc<dyn DragService>,
    wiring: Option<Arc<dyn ControllerWiring>>,
    menus: Option<Arc<dyn MenuFactory>>,
    scoped_templating: Option<Arc<dyn ScopedTemplating>>,
}

impl HeaderContextBuilder {
    /// Sets the grid options.
    pub fn options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the column controller.
    pub fn column_controller(mut self, columns: Arc<dyn ColumnController>) -> Self {
        self.columns = columns;
        self
    }

    /// Replaces the sort listener.
    pub fn sort_listener(mut self, listener: Arc<dyn SortListener>) -> Self {
        self.sort_listener = listener;
        self
    }

    /// Sets the filter subsystem.
    pub fn filters(mut self, filters: Arc<dyn FilterManager>) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the template provider.
    pub fn templates(mut self, templates: Arc<dyn TemplateProvider>) -> Self {
        self.templates = templates;
        self
    }

    /// Sets the drag primitive.
    pub fn drag(mut self, drag: Arc<dyn DragService>) -> Self {
        self.drag = drag;
        self
    }

    /// Sets the controller wiring. Defaults to attaching move controllers to
    /// the drag primitive.
    pub fn wiring(mut self, wiring: Arc<dyn ControllerWiring>) -> Self {
        self.wiring = Some(wiring);
        self
    }

    /// Sets the menu factory.
    pub fn menus(mut self, menus: Arc<dyn MenuFactory>) -> Self {
        self.menus = Some(menus);
        self
    }

    /// Sets the scope-aware templating hook.
    pub fn scoped_templating(mut self, templating: Arc<dyn ScopedTemplating>) -> Self {
        self.scoped_templating = Some(templating);
        self
    }

    /// Builds the context.
    pub fn build(self) -> HeaderContext {
        let wiring = self
            .wiring
            .unwrap_or_else(|| Arc::new(DragWiring::new(self.drag.clone())));

        HeaderContext {
            options: Arc::new(self.options),
            columns: self.columns,
            sort_listener: self.sort_listener,
            filters: self.filters,
            templates: self.templates,
            drag: self.drag,
            wiring,
            menus: self.menus,
            scoped_templating: self.scoped_templating,
        }
    }
}
