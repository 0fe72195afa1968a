//! Header templates and their conventionally named parts.
//!
//! A template is an element tree for one header cell. Features find their
//! affordances by id; any part may be missing, which disables the feature
//! that needs it.

use crate::column::Column;
use crate::element::{Element, ElementRef};

/// Ids of the optional parts a header template may contain.
pub mod part_ids {
    /// Drag handle for resizing.
    pub const RESIZE_BAR: &str = "grid-resize-bar";
    /// Menu trigger.
    pub const MENU: &str = "grid-menu";
    /// Label region: sort click target and move drag handle.
    pub const LABEL: &str = "grid-header-cell-label";
    /// Ascending sort indicator.
    pub const SORT_ASC: &str = "grid-sort-asc";
    /// Descending sort indicator.
    pub const SORT_DESC: &str = "grid-sort-desc";
    /// "Not sorted" indicator.
    pub const SORT_NONE: &str = "grid-no-sort";
    /// Filter indicator.
    pub const FILTER: &str = "grid-filter";
    /// Slot receiving the header content.
    pub const TEXT: &str = "grid-text";
}

/// Style classes set on header cell elements.
pub mod classes {
    /// Every header cell root.
    pub const HEADER_CELL: &str = "grid-header-cell";
    /// Root of a header cell whose column is being moved.
    pub const MOVING: &str = "grid-header-cell-moving";
    /// Root of a header cell sorted ascending.
    pub const SORTED_ASC: &str = "grid-header-cell-sorted-asc";
    /// Root of a header cell sorted descending.
    pub const SORTED_DESC: &str = "grid-header-cell-sorted-desc";
    /// Root of an unsorted header cell.
    pub const SORTED_NONE: &str = "grid-header-cell-sorted-none";
    /// Root of a header cell with an active filter.
    pub const FILTERED: &str = "grid-header-cell-filtered";
    /// Text slot filled by the built-in content renderer.
    pub const TEXT: &str = "grid-header-cell-text";
    /// Icons inside the default template.
    pub const ICON: &str = "grid-header-icon";
    /// Label region of the default template.
    pub const LABEL: &str = "grid-header-cell-label";
    /// Resize handle of the default template.
    pub const RESIZE: &str = "grid-header-cell-resize";
    /// Menu trigger of the default template.
    pub const MENU_BUTTON: &str = "grid-header-cell-menu-button";
}

/// Attribute carrying the column id on a header cell root.
pub const COL_ID_ATTRIBUTE: &str = "col-id";

/// Creates header template instances.
pub trait TemplateProvider: Send + Sync {
    /// Builds a fresh template for `column`. The returned element is the
    /// header cell root.
    fn instantiate(&self, column: &Column) -> ElementRef;
}

impl<F> TemplateProvider for F
where
    F: Fn(&Column) -> ElementRef + Send + Sync,
{
    fn instantiate(&self, column: &Column) -> ElementRef {
        self(column)
    }
}

/// The standard header layout with every part present.
///
/// ```text
/// div (header cell root)
/// ├── div#grid-resize-bar
/// ├── span#grid-menu
/// └── div#grid-header-cell-label
///     ├── span#grid-sort-asc
///     ├── span#grid-sort-desc
///     ├── span#grid-no-sort
///     ├── span#grid-filter
///     └── span#grid-text
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHeaderTemplate;

impl TemplateProvider for DefaultHeaderTemplate {
    fn instantiate(&self, _column: &Column) -> ElementRef {
        let cell = Element::new("div");

        let resize = Element::with_id("div", part_ids::RESIZE_BAR);
        resize.add_class(classes::RESIZE);
        cell.append_child(resize);

        let menu = Element::with_id("span", part_ids::MENU);
        menu.add_class(classes::ICON);
        menu.add_class(classes::MENU_BUTTON);
        cell.append_child(menu);

        let label = Element::with_id("div", part_ids::LABEL);
        label.add_class(classes::LABEL);
        for id in [
            part_ids::SORT_ASC,
            part_ids::SORT_DESC,
            part_ids::SORT_NONE,
            part_ids::FILTER,
        ] {
            let icon = Element::with_id("span", id);
            icon.add_class(classes::ICON);
            label.append_child(icon);
        }
        label.append_child(Element::with_id("span", part_ids::TEXT));
        cell.append_child(label);

        cell
    }
}

/// The parts of an activated header cell.
///
/// Parts are resolved while the cell is assembled. A part the template
/// doesn't have, or that a disabled feature removed, is `None`.
#[derive(Debug, Clone)]
pub struct HeaderParts {
    /// The header cell root.
    pub cell: ElementRef,
    /// Label region.
    pub label: Option<ElementRef>,
    /// Content slot.
    pub text: Option<ElementRef>,
    /// Ascending sort indicator.
    pub sort_asc: Option<ElementRef>,
    /// Descending sort indicator.
    pub sort_desc: Option<ElementRef>,
    /// "Not sorted" indicator.
    pub sort_none: Option<ElementRef>,
    /// Filter indicator.
    pub filter: Option<ElementRef>,
    /// Menu trigger.
    pub menu: Option<ElementRef>,
    /// Resize handle.
    pub resize: Option<ElementRef>,
}

impl HeaderParts {
    /// Parts of a cell before anything is resolved.
    pub fn new(cell: ElementRef) -> Self {
        Self {
            cell,
            label: None,
            text: None,
            sort_asc: None,
            sort_desc: None,
            sort_none: None,
            filter: None,
            menu: None,
            resize: None,
        }
    }

    /// Looks up a part of the cell by id.
    pub fn find(&self, part_id: &str) -> Option<ElementRef> {
        self.cell.find_by_id(part_id)
    }
}
