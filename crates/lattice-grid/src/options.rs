//! Grid-wide configuration.
//!
//! [`GridOptions`] holds the toggles and overrides every header cell
//! consults. Plain settings load from TOML or JSON; renderers, the
//! application context and the grid API are set in code.
//!
//! ```
//! use lattice_grid::options::GridOptions;
//!
//! let options = GridOptions::from_toml_str(
//!     r#"
//!     enable_sorting = true
//!     enable_col_resize = true
//!     sorting_order = ["desc", "asc"]
//!     "#,
//! )
//! .unwrap();
//! assert!(options.enable_sorting);
//! assert!(!options.enable_filter);
//! ```

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use lattice_grid_core::logging::targets;
use serde::Deserialize;

use crate::column::ColumnDef;
use crate::error::{ConfigError, Result};
use crate::header::renderer::{HeaderRendererParams, RenderedContent, RendererRef};
use crate::sort::SortingOrder;

/// Shared application context handed to renderers and class rules.
pub type AppContext = Arc<dyn Any + Send + Sync>;

/// Grid API handle handed to renderers and class rules.
pub type GridApi = Arc<dyn Any + Send + Sync>;

/// Grid-wide header configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Allow click-to-sort.
    pub enable_sorting: bool,
    /// Allow drag-resizing columns.
    pub enable_col_resize: bool,
    /// Enable filtering, which also enables the header menu.
    pub enable_filter: bool,
    /// Disable double-click auto-sizing.
    pub suppress_auto_size: bool,
    /// Disable dragging columns to new positions.
    pub suppress_movable_columns: bool,
    /// Always show the menu trigger instead of revealing it on hover.
    pub suppress_menu_hide: bool,
    /// Never treat a click as an additive multi-column sort.
    pub suppress_multi_sort: bool,
    /// Compile custom header content against an isolated scope.
    pub scoped_header_templates: bool,
    /// Non-interactive print layout.
    pub for_print: bool,
    /// Show the "not sorted" indicator on every unsorted column.
    pub unsort_icon: bool,
    /// Grid-level sort cycle override.
    pub sorting_order: Option<SortingOrder>,
    /// Default renderer for header content.
    #[serde(skip)]
    pub header_cell_renderer: Option<RendererRef>,
    /// Application context passed to renderers and class rules.
    #[serde(skip)]
    pub context: Option<AppContext>,
    /// Grid API passed to renderers and class rules.
    #[serde(skip)]
    pub api: Option<GridApi>,
}

impl GridOptions {
    /// Parses options from TOML.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Parses options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let options = Self::from_toml_str(&content).inspect_err(|e| {
            tracing::warn!(target: targets::CONFIG, path = %path.display(), error = %e, "invalid grid options");
        })?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "grid options loaded");
        Ok(options)
    }

    /// Sets the default header content renderer.
    pub fn with_header_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&HeaderRendererParams<'_>) -> RenderedContent + Send + Sync + 'static,
    {
        self.header_cell_renderer = Some(RendererRef::from_fn(render));
        self
    }

    /// Sets the application context.
    pub fn with_context(mut self, context: AppContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the grid API handle.
    pub fn with_api(mut self, api: GridApi) -> Self {
        self.api = Some(api);
        self
    }

    // =========================================================================
    // Per-column Feature Checks
    // =========================================================================

    /// Whether clicking the header sorts the column.
    pub fn sorting_enabled_for(&self, def: &ColumnDef) -> bool {
        self.enable_sorting && !def.suppress_sorting
    }

    /// Whether the column can be drag-resized.
    pub fn resize_enabled_for(&self, def: &ColumnDef) -> bool {
        self.enable_col_resize && !def.suppress_resize
    }

    /// Whether double-clicking the resize handle auto-sizes the column.
    pub fn auto_size_enabled_for(&self, def: &ColumnDef) -> bool {
        !self.suppress_auto_size && !def.suppress_auto_size
    }

    /// Whether the column can be dragged to a new position.
    pub fn move_enabled_for(&self, def: &ColumnDef) -> bool {
        !self.suppress_movable_columns && !def.suppress_movable && !self.for_print
    }

    /// Whether the column wants a header menu.
    pub fn menu_enabled_for(&self, def: &ColumnDef) -> bool {
        self.enable_filter && !def.suppress_menu
    }

    /// Whether the "not sorted" indicator is kept for the column.
    pub fn unsort_icon_for(&self, def: &ColumnDef) -> bool {
        self.unsort_icon || def.unsort_icon
    }

    /// Whether a click with the given shift state adds to the existing sort.
    pub fn is_additive_sort(&self, shift: bool) -> bool {
        shift && !self.suppress_multi_sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{next_sort_direction, SortDirection};

    #[test]
    fn test_defaults() {
        let options = GridOptions::default();
        assert!(!options.enable_sorting);
        assert!(options.sorting_order.is_none());
        assert!(options.move_enabled_for(&ColumnDef::new("a")));
        assert!(options.auto_size_enabled_for(&ColumnDef::new("a")));
    }

    #[test]
    fn test_feature_checks() {
        let options = GridOptions {
            enable_sorting: true,
            enable_col_resize: true,
            enable_filter: true,
            ..GridOptions::default()
        };
        let plain = ColumnDef::new("a");
        let suppressed = ColumnDef {
            suppress_sorting: true,
            suppress_resize: true,
            suppress_menu: true,
            suppress_movable: true,
            ..ColumnDef::new("b")
        };

        assert!(options.sorting_enabled_for(&plain));
        assert!(options.resize_enabled_for(&plain));
        assert!(options.menu_enabled_for(&plain));
        assert!(!options.sorting_enabled_for(&suppressed));
        assert!(!options.resize_enabled_for(&suppressed));
        assert!(!options.menu_enabled_for(&suppressed));
        assert!(!options.move_enabled_for(&suppressed));

        let print = GridOptions {
            for_print: true,
            ..GridOptions::default()
        };
        assert!(!print.move_enabled_for(&plain));
    }

    #[test]
    fn test_additive_sort() {
        let options = GridOptions::default();
        assert!(options.is_additive_sort(true));
        assert!(!options.is_additive_sort(false));

        let single = GridOptions {
            suppress_multi_sort: true,
            ..GridOptions::default()
        };
        assert!(!single.is_additive_sort(true));
    }

    #[test]
    fn test_from_toml() {
        let options = GridOptions::from_toml_str(
            r#"
            enable_sorting = true
            suppress_menu_hide = true
            sorting_order = ["desc", "none"]
            "#,
        )
        .unwrap();
        assert!(options.enable_sorting);
        assert!(options.suppress_menu_hide);

        let order = options.sorting_order.as_ref().unwrap();
        assert_eq!(
            next_sort_direction(SortDirection::Descending, order),
            Ok(SortDirection::Unsorted)
        );
    }

    #[test]
    fn test_malformed_sorting_order_loads() {
        let options = GridOptions::from_json_str(r#"{"sorting_order": 5}"#).unwrap();
        assert!(matches!(
            options.sorting_order,
            Some(SortingOrder::Malformed(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = GridOptions::from_toml_str("enable_sorting = maybe");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = GridOptions::load_toml("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
