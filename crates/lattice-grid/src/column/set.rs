//! The column model shared by the header row and the row renderers.

use std::sync::Arc;

use lattice_grid_core::logging::targets;
use lattice_grid_core::Signal;
use parking_lot::RwLock;

use super::{Column, ColumnDef};
use crate::services::{ColumnController, SortListener};
use crate::sort::SortDirection;

/// Payload of [`ColumnSet::column_resized`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnResized {
    /// The resized column.
    pub col_id: String,
    /// The width after clamping.
    pub width: f32,
    /// Whether this ends a resize gesture.
    pub finished: bool,
}

/// An ordered set of columns.
///
/// Clamps requested widths to each column's limits and announces resizes,
/// auto-size requests and sort changes to the rest of the grid.
#[derive(Debug, Default)]
pub struct ColumnSet {
    columns: RwLock<Vec<Arc<Column>>>,

    /// Emitted when a column width is set, and always at the end of a resize
    /// gesture.
    pub column_resized: Signal<ColumnResized>,

    /// Emitted with the column id when a column asks to be fitted to its
    /// content.
    pub auto_size_requested: Signal<String>,

    /// Emitted when the user changed the sort.
    pub sorting_changed: Signal<()>,
}

impl ColumnSet {
    /// Creates an empty column set.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Creates a column set from definitions.
    ///
    /// Columns without an id or field are named after their position.
    pub fn from_defs(defs: impl IntoIterator<Item = ColumnDef>) -> Arc<Self> {
        let set = Self::new();
        for def in defs {
            set.add_column(def);
        }
        set
    }

    /// Appends a column built from `def` and returns it.
    pub fn add_column(&self, def: ColumnDef) -> Arc<Column> {
        let mut columns = self.columns.write();
        let index = columns.len();
        let col_id = def.resolve_col_id(|| index.to_string());
        let column = Column::new(col_id, def);
        tracing::debug!(target: targets::COLUMN, col_id = column.col_id(), "column added");
        columns.push(column.clone());
        column
    }

    /// Looks up a column by id.
    pub fn column(&self, col_id: &str) -> Option<Arc<Column>> {
        self.columns
            .read()
            .iter()
            .find(|column| column.col_id() == col_id)
            .cloned()
    }

    /// All columns in order.
    pub fn columns(&self) -> Vec<Arc<Column>> {
        self.columns.read().clone()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.read().len()
    }

    /// Whether the set has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.read().is_empty()
    }

    /// The sorted columns, oldest sort first.
    pub fn sort_model(&self) -> Vec<(String, SortDirection)> {
        let mut sorted: Vec<_> = self
            .columns
            .read()
            .iter()
            .filter(|column| column.sort().is_sorted())
            .map(|column| (column.sorted_at(), column.col_id().to_string(), column.sort()))
            .collect();
        sorted.sort_by_key(|(sorted_at, _, _)| *sorted_at);
        sorted
            .into_iter()
            .map(|(_, col_id, sort)| (col_id, sort))
            .collect()
    }
}

impl ColumnController for ColumnSet {
    fn display_name(&self, column: &Column) -> String {
        column
            .col_def()
            .header_name
            .clone()
            .unwrap_or_else(|| column.col_id().to_string())
    }

    fn set_column_width(&self, column: &Arc<Column>, width: f32, finished: bool) {
        let mut clamped = width.max(column.min_width());
        if let Some(max_width) = column.max_width() {
            clamped = clamped.min(max_width);
        }

        let changed = (clamped - column.actual_width()).abs() > f32::EPSILON;
        column.set_actual_width(clamped);
        tracing::trace!(
            target: targets::COLUMN,
            col_id = column.col_id(),
            requested = width,
            width = clamped,
            finished,
            "set column width"
        );

        if changed || finished {
            self.column_resized.emit(ColumnResized {
                col_id: column.col_id().to_string(),
                width: clamped,
                finished,
            });
        }
    }

    fn auto_size_column(&self, column: &Arc<Column>) {
        tracing::debug!(target: targets::COLUMN, col_id = column.col_id(), "auto-size requested");
        self.auto_size_requested.emit(column.col_id().to_string());
    }

    fn clear_sort_except(&self, keep: &Arc<Column>) {
        for column in self.columns() {
            if !Arc::ptr_eq(&column, keep) {
                column.set_sort(SortDirection::Unsorted);
                column.set_sorted_at(None);
            }
        }
    }
}

impl SortListener for ColumnSet {
    fn on_sorting_changed(&self) {
        self.sorting_changed.emit(());
    }
}
