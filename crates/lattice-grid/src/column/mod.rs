//! Columns and their definitions.
//!
//! A [`Column`] is shared (`Arc<Column>`) by the column model, every header
//! cell showing it and the row renderers. It pairs an immutable
//! [`ColumnDef`] with reactive runtime state: actual width, sort state, sort
//! timestamp and the moving flag. Each state change is announced on the
//! column's own signals.

mod set;

pub use set::{ColumnResized, ColumnSet};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lattice_grid_core::{Property, Signal};
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::header::renderer::{HeaderRendererParams, RenderedContent, RendererRef};
use crate::options::{AppContext, GridApi};
use crate::sort::{SortDirection, SortingOrder};

/// Per-column configuration.
///
/// Loadable from configuration files; the renderer and computed class rules
/// are set in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnDef {
    /// Explicit column identity.
    pub col_id: Option<String>,
    /// Data field, used as identity when no `col_id` is given.
    pub field: Option<String>,
    /// Text shown in the header.
    pub header_name: Option<String>,
    /// Initial width in pixels.
    pub width: Option<f32>,
    /// Minimum width in pixels.
    pub min_width: Option<f32>,
    /// Maximum width in pixels.
    pub max_width: Option<f32>,
    /// Initial sort state.
    pub sort: SortDirection,
    /// Column-level sort cycle override.
    pub sorting_order: Option<SortingOrder>,
    /// Disable click-to-sort for this column.
    pub suppress_sorting: bool,
    /// Disable drag-resizing for this column.
    pub suppress_resize: bool,
    /// Disable double-click auto-sizing for this column.
    pub suppress_auto_size: bool,
    /// Disable dragging this column to a new position.
    pub suppress_movable: bool,
    /// Disable the header menu for this column.
    pub suppress_menu: bool,
    /// Show the "not sorted" indicator when unsorted.
    pub unsort_icon: bool,
    /// Tooltip for the header cell.
    pub header_tooltip: Option<String>,
    /// Extra style classes for the header cell.
    pub header_class: Option<HeaderClass>,
    /// Custom header content renderer.
    #[serde(skip)]
    pub header_cell_renderer: Option<RendererRef>,
}

impl ColumnDef {
    /// Creates a definition with the given column id.
    pub fn new(col_id: impl Into<String>) -> Self {
        Self {
            col_id: Some(col_id.into()),
            ..Self::default()
        }
    }

    /// Parses a definition from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the header text.
    pub fn with_header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    /// Sets the initial width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets a custom header content renderer.
    pub fn with_header_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&HeaderRendererParams<'_>) -> RenderedContent + Send + Sync + 'static,
    {
        self.header_cell_renderer = Some(RendererRef::from_fn(render));
        self
    }

    /// Sets the header class rule.
    pub fn with_header_class(mut self, header_class: HeaderClass) -> Self {
        self.header_class = Some(header_class);
        self
    }

    /// The identity a column built from this definition gets: `col_id`, else
    /// `field`, else `fallback`.
    pub fn resolve_col_id(&self, fallback: impl FnOnce() -> String) -> String {
        self.col_id
            .clone()
            .or_else(|| self.field.clone())
            .unwrap_or_else(fallback)
    }
}

/// Parameters passed to a computed header class rule.
pub struct HeaderClassParams<'a> {
    /// The column's definition.
    pub col_def: &'a ColumnDef,
    /// Shared application context from the grid options.
    pub context: Option<&'a AppContext>,
    /// The grid API from the grid options.
    pub api: Option<&'a GridApi>,
}

/// A computed header class rule.
#[derive(Clone)]
pub struct ClassRule(Arc<dyn Fn(&HeaderClassParams<'_>) -> Vec<String> + Send + Sync>);

impl ClassRule {
    /// Wraps a function computing class names.
    pub fn new<F>(rule: F) -> Self
    where
        F: Fn(&HeaderClassParams<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        Self(Arc::new(rule))
    }
}

impl fmt::Debug for ClassRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClassRule(..)")
    }
}

/// Extra style classes for a header cell.
///
/// In configuration this is either a whitespace-separated string or a list
/// of class names.
#[derive(Debug, Clone)]
pub enum HeaderClass {
    /// A fixed list of classes.
    Static(Vec<String>),
    /// Classes computed when the header cell is activated.
    Computed(ClassRule),
}

impl HeaderClass {
    /// Resolves the class names for one header cell.
    pub fn classes(&self, params: &HeaderClassParams<'_>) -> Vec<String> {
        match self {
            Self::Static(classes) => classes.clone(),
            Self::Computed(rule) => (rule.0)(params),
        }
    }
}

impl<'de> Deserialize<'de> for HeaderClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(classes) => {
                Self::Static(classes.split_whitespace().map(String::from).collect())
            }
            Raw::Many(classes) => Self::Static(classes),
        })
    }
}

/// A grid column: definition plus reactive runtime state.
#[derive(Debug)]
pub struct Column {
    col_id: String,
    def: ColumnDef,
    actual_width: Property<f32>,
    sort: Property<SortDirection>,
    sorted_at: Property<Option<DateTime<Utc>>>,
    moving: Property<bool>,

    /// Emitted when the moving flag changes.
    pub moving_changed: Signal<bool>,

    /// Emitted when the sort state changes.
    pub sort_changed: Signal<SortDirection>,

    /// Emitted when the actual width changes.
    pub width_changed: Signal<f32>,
}

impl Column {
    /// Width used when the definition gives none.
    pub const DEFAULT_WIDTH: f32 = 200.0;

    /// Minimum width used when the definition gives none.
    pub const DEFAULT_MIN_WIDTH: f32 = 10.0;

    /// Creates a column.
    pub fn new(col_id: impl Into<String>, def: ColumnDef) -> Arc<Self> {
        let min_width = def.min_width.unwrap_or(Self::DEFAULT_MIN_WIDTH);
        let mut width = def.width.unwrap_or(Self::DEFAULT_WIDTH).max(min_width);
        if let Some(max_width) = def.max_width {
            width = width.min(max_width);
        }
        let sort = def.sort;

        Arc::new(Self {
            col_id: col_id.into(),
            def,
            actual_width: Property::new(width),
            sort: Property::new(sort),
            sorted_at: Property::new(None),
            moving: Property::new(false),
            moving_changed: Signal::new(),
            sort_changed: Signal::new(),
            width_changed: Signal::new(),
        })
    }

    /// The column's identity.
    pub fn col_id(&self) -> &str {
        &self.col_id
    }

    /// The column's definition.
    pub fn col_def(&self) -> &ColumnDef {
        &self.def
    }

    /// Minimum width in pixels.
    pub fn min_width(&self) -> f32 {
        self.def.min_width.unwrap_or(Self::DEFAULT_MIN_WIDTH)
    }

    /// Maximum width in pixels, if limited.
    pub fn max_width(&self) -> Option<f32> {
        self.def.max_width
    }

    // =========================================================================
    // Width
    // =========================================================================

    /// Current width in pixels.
    pub fn actual_width(&self) -> f32 {
        self.actual_width.get()
    }

    /// Sets the width. The column model is responsible for clamping.
    pub fn set_actual_width(&self, width: f32) {
        if self.actual_width.set(width) {
            self.width_changed.emit(width);
        }
    }

    // =========================================================================
    // Sort
    // =========================================================================

    /// Current sort state.
    pub fn sort(&self) -> SortDirection {
        self.sort.get()
    }

    /// Sets the sort state.
    pub fn set_sort(&self, sort: SortDirection) {
        if self.sort.set(sort) {
            self.sort_changed.emit(sort);
        }
    }

    /// When the column was last sorted; orders multi-column sorts.
    pub fn sorted_at(&self) -> Option<DateTime<Utc>> {
        self.sorted_at.get()
    }

    /// Sets or clears the sort timestamp.
    pub fn set_sorted_at(&self, sorted_at: Option<DateTime<Utc>>) {
        self.sorted_at.set(sorted_at);
    }

    // =========================================================================
    // Moving
    // =========================================================================

    /// Whether the column is being dragged to a new position.
    pub fn is_moving(&self) -> bool {
        self.moving.get()
    }

    /// Sets the moving flag.
    pub fn set_moving(&self, moving: bool) {
        if self.moving.set(moving) {
            self.moving_changed.emit(moving);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_width_defaults_and_minimum() {
        let column = Column::new("a", ColumnDef::new("a"));
        assert_eq!(column.actual_width(), Column::DEFAULT_WIDTH);

        let narrow = ColumnDef {
            min_width: Some(50.0),
            ..ColumnDef::new("b").with_width(20.0)
        };
        assert_eq!(Column::new("b", narrow).actual_width(), 50.0);
    }

    #[test]
    fn test_initial_width_capped_at_maximum() {
        let wide = ColumnDef {
            max_width: Some(300.0),
            ..ColumnDef::new("a").with_width(480.0)
        };
        assert_eq!(Column::new("a", wide).actual_width(), 300.0);

        let unset = ColumnDef {
            max_width: Some(120.0),
            ..ColumnDef::new("b")
        };
        assert_eq!(Column::new("b", unset).actual_width(), 120.0);
    }

    #[test]
    fn test_moving_changed_only_on_change() {
        let column = Column::new("a", ColumnDef::new("a"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        column.moving_changed.connect(move |&moving| seen_clone.lock().push(moving));

        column.set_moving(true);
        column.set_moving(true);
        column.set_moving(false);
        assert_eq!(*seen.lock(), vec![true, false]);
    }

    #[test]
    fn test_column_def_from_json() {
        let def = ColumnDef::from_json_str(
            r#"{
                "field": "price",
                "header_name": "Price",
                "sort": "desc",
                "sorting_order": ["desc", null],
                "suppress_menu": true,
                "header_class": "numeric right-aligned"
            }"#,
        )
        .unwrap();

        assert_eq!(def.resolve_col_id(|| "fallback".into()), "price");
        assert_eq!(def.sort, SortDirection::Descending);
        assert!(def.suppress_menu);
        assert!(def.sorting_order.is_some());

        let params = HeaderClassParams {
            col_def: &def,
            context: None,
            api: None,
        };
        let classes = def.header_class.as_ref().unwrap().classes(&params);
        assert_eq!(classes, vec!["numeric", "right-aligned"]);
    }

    #[test]
    fn test_computed_header_class() {
        let rule = HeaderClass::Computed(ClassRule::new(|params| {
            vec![format!("col-{}", params.col_def.col_id.as_deref().unwrap_or("?"))]
        }));
        let def = ColumnDef::new("qty");
        let params = HeaderClassParams {
            col_def: &def,
            context: None,
            api: None,
        };
        assert_eq!(rule.classes(&params), vec!["col-qty"]);
    }
}
