//! Retained visual elements for grid headers.
//!
//! An [`Element`] is a node in a header's visual tree: it carries an optional
//! id, style classes, attributes, text or markup content, a handful of inline
//! style values (width, visibility, opacity, transition, cursor), a tooltip,
//! and the interaction signals the host event loop emits into.
//!
//! Elements are shared as [`ElementRef`] (`Arc<Element>`). Children are owned
//! by their parent; the parent link is weak. Removing an element from its
//! parent detaches it. All operations on a detached element still succeed, so
//! late notifications against a torn-down header never fail.
//!
//! # Example
//!
//! ```
//! use lattice_grid::element::{Element, KeyboardModifiers};
//!
//! let cell = Element::new("div");
//! let label = Element::with_id("div", "label");
//! cell.append_child(label.clone());
//!
//! let found = cell.find_by_id("label").unwrap();
//! found.clicked.connect(|event| assert!(event.modifiers.shift));
//! found.dispatch_click(KeyboardModifiers::SHIFT);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use lattice_grid_core::Signal;
use parking_lot::RwLock;

/// Shared handle to an [`Element`].
pub type ElementRef = Arc<Element>;

/// Keyboard modifier state attached to pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };
}

/// A click or double-click on an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClickEvent {
    /// Modifiers held when the click happened.
    pub modifiers: KeyboardModifiers,
}

/// A pointer press, move or release.
///
/// Positions are in the host's coordinate space; only differences between
/// positions of one gesture are meaningful to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl PointerEvent {
    /// Creates a pointer event at the given position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

struct ElementState {
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    markup: Option<String>,
    title: Option<String>,
    width: Option<f32>,
    visible: bool,
    opacity: f32,
    transition: Option<String>,
    cursor: Option<String>,
    children: Vec<ElementRef>,
    parent: Weak<Element>,
}

/// A node in a header cell's visual tree.
pub struct Element {
    tag: String,
    state: RwLock<ElementState>,

    /// Emitted when the element is clicked.
    pub clicked: Signal<ClickEvent>,

    /// Emitted when the element is double-clicked.
    pub double_clicked: Signal<ClickEvent>,

    /// Emitted when the pointer enters the element.
    pub pointer_entered: Signal<()>,

    /// Emitted when the pointer leaves the element.
    pub pointer_left: Signal<()>,

    /// Emitted when a pointer button is pressed over the element.
    pub pointer_pressed: Signal<PointerEvent>,

    /// Emitted when the pointer moves over the element.
    pub pointer_moved: Signal<PointerEvent>,

    /// Emitted when a pointer button is released over the element.
    pub pointer_released: Signal<PointerEvent>,
}

impl Element {
    /// Creates a detached element with the given tag.
    pub fn new(tag: impl Into<String>) -> ElementRef {
        Arc::new(Self {
            tag: tag.into(),
            state: RwLock::new(ElementState {
                id: None,
                classes: Vec::new(),
                attributes: BTreeMap::new(),
                text: None,
                markup: None,
                title: None,
                width: None,
                visible: true,
                opacity: 1.0,
                transition: None,
                cursor: None,
                children: Vec::new(),
                parent: Weak::new(),
            }),
            clicked: Signal::new(),
            double_clicked: Signal::new(),
            pointer_entered: Signal::new(),
            pointer_left: Signal::new(),
            pointer_pressed: Signal::new(),
            pointer_moved: Signal::new(),
            pointer_released: Signal::new(),
        })
    }

    /// Creates a detached element with a tag and an id.
    pub fn with_id(tag: impl Into<String>, id: impl Into<String>) -> ElementRef {
        let element = Self::new(tag);
        element.state.write().id = Some(id.into());
        element
    }

    /// Returns the element's tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the element's id.
    pub fn id(&self) -> Option<String> {
        self.state.read().id.clone()
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Appends a child, detaching it from any previous parent first.
    pub fn append_child(self: &Arc<Self>, child: ElementRef) {
        child.remove_from_parent();
        child.state.write().parent = Arc::downgrade(self);
        self.state.write().children.push(child);
    }

    /// Removes this element from its parent. Does nothing when detached.
    pub fn remove_from_parent(&self) {
        let parent = {
            let mut state = self.state.write();
            std::mem::take(&mut state.parent)
        };
        if let Some(parent) = parent.upgrade() {
            let this = self as *const Element;
            parent
                .state
                .write()
                .children
                .retain(|child| !std::ptr::eq(Arc::as_ptr(child), this));
        }
    }

    /// Returns the parent element, if attached.
    pub fn parent(&self) -> Option<ElementRef> {
        self.state.read().parent.upgrade()
    }

    /// Whether the element currently has a parent.
    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// Returns the direct children.
    pub fn children(&self) -> Vec<ElementRef> {
        self.state.read().children.clone()
    }

    /// Finds the first descendant (depth-first, document order) with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<ElementRef> {
        for child in self.children() {
            if child.id().as_deref() == Some(id) {
                return Some(child);
            }
            if let Some(found) = child.find_by_id(id) {
                return Some(found);
            }
        }
        None
    }

    // =========================================================================
    // Classes and Attributes
    // =========================================================================

    /// Adds a style class. Adding a class twice keeps one copy.
    pub fn add_class(&self, class: impl Into<String>) {
        let class = class.into();
        let mut state = self.state.write();
        if !state.classes.contains(&class) {
            state.classes.push(class);
        }
    }

    /// Removes a style class.
    pub fn remove_class(&self, class: &str) {
        self.state.write().classes.retain(|c| c != class);
    }

    /// Adds the class when `enabled`, removes it otherwise.
    pub fn set_class_enabled(&self, class: &str, enabled: bool) {
        if enabled {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Whether the element has the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.state.read().classes.iter().any(|c| c == class)
    }

    /// Returns all classes in insertion order.
    pub fn classes(&self) -> Vec<String> {
        self.state.read().classes.clone()
    }

    /// Sets an attribute.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.state.write().attributes.insert(name.into(), value.into());
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.read().attributes.get(name).cloned()
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Sets plain text content.
    pub fn set_text(&self, text: impl Into<String>) {
        self.state.write().text = Some(text.into());
    }

    /// Returns the plain text content.
    pub fn text(&self) -> Option<String> {
        self.state.read().text.clone()
    }

    /// Sets markup content. Markup is stored verbatim for the host to render.
    pub fn set_markup(&self, markup: impl Into<String>) {
        self.state.write().markup = Some(markup.into());
    }

    /// Returns the markup content.
    pub fn markup(&self) -> Option<String> {
        self.state.read().markup.clone()
    }

    /// Sets the tooltip text.
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.write().title = Some(title.into());
    }

    /// Returns the tooltip text.
    pub fn title(&self) -> Option<String> {
        self.state.read().title.clone()
    }

    // =========================================================================
    // Inline Style
    // =========================================================================

    /// Sets the element width in pixels.
    pub fn set_width(&self, width: f32) {
        self.state.write().width = Some(width);
    }

    /// Returns the element width in pixels, if set.
    pub fn width(&self) -> Option<f32> {
        self.state.read().width
    }

    /// Shows or hides the element.
    pub fn set_visible(&self, visible: bool) {
        self.state.write().visible = visible;
    }

    /// Whether the element is shown.
    pub fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    /// Sets the opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&self, opacity: f32) {
        self.state.write().opacity = opacity.clamp(0.0, 1.0);
    }

    /// Returns the opacity.
    pub fn opacity(&self) -> f32 {
        self.state.read().opacity
    }

    /// Sets the style transition description.
    pub fn set_transition(&self, transition: impl Into<String>) {
        self.state.write().transition = Some(transition.into());
    }

    /// Returns the style transition description.
    pub fn transition(&self) -> Option<String> {
        self.state.read().transition.clone()
    }

    /// Sets the pointer cursor hint.
    pub fn set_cursor(&self, cursor: impl Into<String>) {
        self.state.write().cursor = Some(cursor.into());
    }

    /// Returns the pointer cursor hint.
    pub fn cursor(&self) -> Option<String> {
        self.state.read().cursor.clone()
    }

    // =========================================================================
    // Event Dispatch
    // =========================================================================

    /// Delivers a click to the element.
    pub fn dispatch_click(&self, modifiers: KeyboardModifiers) {
        self.clicked.emit(ClickEvent { modifiers });
    }

    /// Delivers a double-click to the element.
    pub fn dispatch_double_click(&self, modifiers: KeyboardModifiers) {
        self.double_clicked.emit(ClickEvent { modifiers });
    }

    /// Delivers a pointer-enter to the element.
    pub fn dispatch_pointer_enter(&self) {
        self.pointer_entered.emit(());
    }

    /// Delivers a pointer-leave to the element.
    pub fn dispatch_pointer_leave(&self) {
        self.pointer_left.emit(());
    }

    /// Delivers a pointer press to the element.
    pub fn dispatch_pointer_press(&self, event: PointerEvent) {
        self.pointer_pressed.emit(event);
    }

    /// Delivers a pointer move to the element.
    pub fn dispatch_pointer_move(&self, event: PointerEvent) {
        self.pointer_moved.emit(event);
    }

    /// Delivers a pointer release to the element.
    pub fn dispatch_pointer_release(&self, event: PointerEvent) {
        self.pointer_released.emit(event);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("id", &state.id)
            .field("classes", &state.classes)
            .field("visible", &state.visible)
            .field("children", &state.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_find() {
        let root = Element::new("div");
        let label = Element::with_id("div", "label");
        let text = Element::with_id("span", "text");
        label.append_child(text.clone());
        root.append_child(label.clone());

        assert!(Arc::ptr_eq(&root.find_by_id("text").unwrap(), &text));
        assert!(Arc::ptr_eq(&text.parent().unwrap(), &label));
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_remove_from_parent() {
        let root = Element::new("div");
        let child = Element::with_id("span", "child");
        root.append_child(child.clone());

        child.remove_from_parent();
        assert!(!child.is_attached());
        assert!(root.children().is_empty());
        assert!(root.find_by_id("child").is_none());

        // Detached elements stay usable.
        child.remove_from_parent();
        child.set_visible(false);
        assert!(!child.is_visible());
    }

    #[test]
    fn test_reparenting_detaches_from_old_parent() {
        let first = Element::new("div");
        let second = Element::new("div");
        let child = Element::new("span");

        first.append_child(child.clone());
        second.append_child(child.clone());

        assert!(first.children().is_empty());
        assert_eq!(second.children().len(), 1);
    }

    #[test]
    fn test_classes() {
        let element = Element::new("div");
        element.add_class("a");
        element.add_class("a");
        element.add_class("b");
        assert_eq!(element.classes(), vec!["a", "b"]);

        element.set_class_enabled("a", false);
        element.set_class_enabled("c", true);
        assert!(!element.has_class("a"));
        assert!(element.has_class("c"));
    }

    #[test]
    fn test_opacity_is_clamped() {
        let element = Element::new("span");
        element.set_opacity(3.0);
        assert_eq!(element.opacity(), 1.0);
        element.set_opacity(-1.0);
        assert_eq!(element.opacity(), 0.0);
    }
}
