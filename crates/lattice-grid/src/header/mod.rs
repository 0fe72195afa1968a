//! Header cells.
//!
//! A [`HeaderCell`] is the controller behind one column's header. On
//! [`activate`](HeaderCell::activate) it instantiates the header template and
//! wires every interaction the template and configuration allow:
//!
//! - click-to-sort on the label region ([`sorting`])
//! - drag-resizing and double-click auto-sizing on the resize handle
//!   ([`resize`])
//! - dragging the label to reorder columns ([`move_column`])
//! - the column menu and its hover reveal ([`menu`])
//! - custom header content ([`renderer`])
//!
//! The cell follows the column's moving flag, sort state and width, so
//! changes made through the column model (clearing other columns' sort, say)
//! show up without further wiring. Everything the cell attaches to objects it
//! does not own is recorded in a [`Teardown`] registry and released by
//! [`destroy`](HeaderCell::destroy).
//!
//! # Example
//!
//! ```
//! use lattice_grid::column::{ColumnDef, ColumnSet};
//! use lattice_grid::element::{Element, KeyboardModifiers};
//! use lattice_grid::header::{part_ids, HeaderCell};
//! use lattice_grid::options::GridOptions;
//! use lattice_grid::services::HeaderContext;
//! use lattice_grid::sort::SortDirection;
//!
//! let columns = ColumnSet::from_defs([ColumnDef::new("name").with_header_name("Name")]);
//! let column = columns.column("name").unwrap();
//! let context = HeaderContext::builder(columns)
//!     .options(GridOptions { enable_sorting: true, ..GridOptions::default() })
//!     .build();
//!
//! let header_row = Element::new("div");
//! let cell = HeaderCell::new(column.clone(), context, header_row);
//! cell.activate();
//!
//! let label = cell.gui().unwrap().find_by_id(part_ids::LABEL).unwrap();
//! label.dispatch_click(KeyboardModifiers::NONE);
//! assert_eq!(column.sort(), SortDirection::Ascending);
//!
//! cell.destroy();
//! ```

mod menu;
pub mod move_column;
pub mod renderer;
mod resize;
mod sorting;
pub mod template;

pub use menu::HoverReveal;
pub use move_column::{DragWiring, MoveColumnController};
pub use renderer::{
    HeaderRenderer, HeaderRendererParams, RenderScope, RenderedContent, RendererRef,
    ScopedTemplating,
};
pub use template::{
    classes, part_ids, DefaultHeaderTemplate, HeaderParts, TemplateProvider, COL_ID_ATTRIBUTE,
};

use std::fmt;
use std::sync::Arc;

use lattice_grid_core::logging::{span_names, targets};
use lattice_grid_core::Teardown;
use parking_lot::{Mutex, RwLock};

use crate::column::{Column, HeaderClassParams};
use crate::element::ElementRef;
use crate::services::HeaderContext;
use resize::ResizeGesture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Active,
    Destroyed,
}

/// Controller for one column's header cell.
pub struct HeaderCell {
    column: Arc<Column>,
    context: HeaderContext,
    /// The header row container; bounds drags started in this cell.
    header_row: ElementRef,
    parts: RwLock<Option<HeaderParts>>,
    resize: Arc<ResizeGesture>,
    scope: Mutex<Option<Arc<dyn RenderScope>>>,
    teardown: Mutex<Teardown>,
    lifecycle: Mutex<Lifecycle>,
}

impl HeaderCell {
    /// Creates a header cell for `column` inside `header_row`.
    ///
    /// Nothing is built until [`activate`](Self::activate).
    pub fn new(column: Arc<Column>, context: HeaderContext, header_row: ElementRef) -> Arc<Self> {
        Arc::new(Self {
            column,
            context,
            header_row,
            parts: RwLock::new(None),
            resize: Arc::new(ResizeGesture::default()),
            scope: Mutex::new(None),
            teardown: Mutex::new(Teardown::new()),
            lifecycle: Mutex::new(Lifecycle::Created),
        })
    }

    /// The column this cell shows.
    pub fn column(&self) -> &Arc<Column> {
        &self.column
    }

    /// The header cell root, once activated.
    pub fn gui(&self) -> Option<ElementRef> {
        self.parts.read().as_ref().map(|parts| parts.cell.clone())
    }

    /// The resolved template parts, once activated.
    pub fn parts(&self) -> Option<HeaderParts> {
        self.parts.read().clone()
    }

    /// Whether the cell is activated and not yet destroyed.
    pub fn is_active(&self) -> bool {
        *self.lifecycle.lock() == Lifecycle::Active
    }

    /// Builds the header visual and wires its interactions.
    ///
    /// Must be called once. Later calls log a warning and do nothing.
    pub fn activate(self: &Arc<Self>) {
        {
            let mut lifecycle = self.lifecycle.lock();
            if *lifecycle != Lifecycle::Created {
                tracing::warn!(
                    target: targets::HEADER,
                    col_id = self.column.col_id(),
                    state = ?*lifecycle,
                    "header cell already activated"
                );
                return;
            }
            *lifecycle = Lifecycle::Active;
        }

        let span = tracing::debug_span!(
            target: targets::HEADER,
            span_names::HEADER_ACTIVATE,
            col_id = self.column.col_id()
        );
        let _enter = span.enter();

        let def = self.column.col_def();
        let mut teardown = Teardown::new();

        let cell = self.context.templates.instantiate(&self.column);
        let mut parts = HeaderParts::new(cell.clone());

        cell.add_class(classes::HEADER_CELL);
        let scope = self.create_scope(&mut teardown);
        cell.set_attribute(COL_ID_ATTRIBUTE, self.column.col_id());

        self.apply_header_classes(&cell);
        self.track_moving(&cell, &mut teardown);
        self.track_column(&mut teardown);

        if let Some(tooltip) = &def.header_tooltip {
            cell.set_title(tooltip.clone());
        }

        parts.label = parts.find(part_ids::LABEL);
        parts.text = parts.find(part_ids::TEXT);

        self.attach_resize(&mut parts, &mut teardown);
        self.attach_move(&parts, &mut teardown);
        self.attach_menu(&mut parts, &mut teardown);
        self.attach_sort(&mut parts, &mut teardown);

        parts.filter = parts.find(part_ids::FILTER);

        self.render_content(&parts, scope.as_deref());
        cell.set_width(self.column.actual_width());

        *self.parts.write() = Some(parts);
        {
            // A collaborator may have destroyed the cell during assembly.
            let lifecycle = self.lifecycle.lock();
            if *lifecycle != Lifecycle::Active {
                drop(lifecycle);
                let count = teardown.run();
                tracing::debug!(
                    target: targets::HEADER,
                    count,
                    "header cell destroyed during activation"
                );
                return;
            }
            tracing::debug!(
                target: targets::HEADER,
                teardown_actions = teardown.len(),
                "header cell assembled"
            );
            *self.scope.lock() = scope;
            *self.teardown.lock() = teardown;
        }

        self.refresh_filter_indicator();
        self.refresh_sort_indicators();
    }

    /// Releases everything the cell attached, in the order it was attached.
    ///
    /// Does nothing before activation or when called again.
    pub fn destroy(&self) {
        {
            let mut lifecycle = self.lifecycle.lock();
            if *lifecycle != Lifecycle::Active {
                tracing::debug!(target: targets::HEADER, state = ?*lifecycle, "nothing to destroy");
                return;
            }
            *lifecycle = Lifecycle::Destroyed;
        }

        let span = tracing::debug_span!(
            target: targets::HEADER,
            span_names::HEADER_DESTROY,
            col_id = self.column.col_id()
        );
        let _enter = span.enter();

        // Teardown actions may call back into the cell, so run them unlocked.
        let mut teardown = std::mem::take(&mut *self.teardown.lock());
        let count = teardown.run();
        *self.teardown.lock() = teardown;
        self.scope.lock().take();

        tracing::debug!(target: targets::HEADER, count, "header cell destroyed");
    }

    /// Shows or hides the filter indicator and the filtered class to match
    /// the filter subsystem.
    pub fn refresh_filter_indicator(&self) {
        if !self.is_active() {
            return;
        }
        let Some(parts) = self.parts() else {
            return;
        };
        let Some(filter) = &parts.filter else {
            return;
        };

        let present = self
            .context
            .filters
            .is_filter_present_for_col(self.column.col_id());
        parts.cell.set_class_enabled(classes::FILTERED, present);
        filter.set_visible(present);
    }

    /// Applies a new column width to the visual. Ignores other columns.
    pub fn on_column_resized(&self, column: &Arc<Column>) {
        if !Arc::ptr_eq(column, &self.column) || !self.is_active() {
            return;
        }
        if let Some(cell) = self.gui() {
            cell.set_width(column.actual_width());
        }
    }

    /// Opens the column menu anchored at `anchor`.
    pub fn show_menu(&self, anchor: &ElementRef) {
        match &self.context.menus {
            Some(menus) => menus.show_menu(&self.column, anchor),
            None => tracing::debug!(
                target: targets::MENU,
                col_id = self.column.col_id(),
                "no menu factory configured"
            ),
        }
    }

    fn create_scope(&self, teardown: &mut Teardown) -> Option<Arc<dyn RenderScope>> {
        if !self.context.options.scoped_header_templates {
            return None;
        }
        let Some(templating) = &self.context.scoped_templating else {
            tracing::warn!(
                target: targets::CONFIG,
                "scoped header templates enabled without a templating hook, ignoring"
            );
            return None;
        };

        let scope = templating.create_scope(&self.column);
        let released = scope.clone();
        teardown.push(move || released.destroy());
        Some(scope)
    }

    fn apply_header_classes(&self, cell: &ElementRef) {
        let def = self.column.col_def();
        let Some(header_class) = &def.header_class else {
            return;
        };

        let options = &self.context.options;
        let params = HeaderClassParams {
            col_def: def,
            context: options.context.as_ref(),
            api: options.api.as_ref(),
        };
        for class in header_class.classes(&params) {
            cell.add_class(class);
        }
    }

    fn track_moving(&self, cell: &ElementRef, teardown: &mut Teardown) {
        cell.set_class_enabled(classes::MOVING, self.column.is_moving());

        let cell = Arc::downgrade(cell);
        teardown.push_subscription(self.column.moving_changed.subscribe(move |&moving| {
            if let Some(cell) = cell.upgrade() {
                cell.set_class_enabled(classes::MOVING, moving);
            }
        }));
    }

    /// Follows sort and width changes of the column, whoever makes them.
    fn track_column(self: &Arc<Self>, teardown: &mut Teardown) {
        let cell = Arc::downgrade(self);
        teardown.push_subscription(self.column.sort_changed.subscribe(move |_| {
            if let Some(cell) = cell.upgrade() {
                cell.refresh_sort_indicators();
            }
        }));

        let cell = Arc::downgrade(self);
        teardown.push_subscription(self.column.width_changed.subscribe(move |_| {
            if let Some(cell) = cell.upgrade() {
                cell.on_column_resized(&cell.column);
            }
        }));
    }

    fn render_content(&self, parts: &HeaderParts, scope: Option<&dyn RenderScope>) {
        let Some(text) = &parts.text else {
            return;
        };

        let def = self.column.col_def();
        let options = &self.context.options;
        let value = self.context.columns.display_name(&self.column);

        let Some(renderer) = def
            .header_cell_renderer
            .as_ref()
            .or(options.header_cell_renderer.as_ref())
        else {
            text.add_class(classes::TEXT);
            text.set_text(value);
            return;
        };

        let params = HeaderRendererParams {
            col_def: def,
            scope,
            context: options.context.as_ref(),
            value: &value,
            api: options.api.as_ref(),
            header_cell: &parts.cell,
        };
        let content = renderer.render(&params).into_element();
        let content = match (scope, &self.context.scoped_templating) {
            (Some(scope), Some(templating)) => templating.compile(content, scope),
            _ => content,
        };
        text.append_child(content);
    }
}

impl fmt::Debug for HeaderCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderCell")
            .field("col_id", &self.column.col_id())
            .field("lifecycle", &*self.lifecycle.lock())
            .field("teardown", &*self.teardown.lock())
            .finish_non_exhaustive()
    }
}
