//! Custom header content.
//!
//! A header renderer receives a [`HeaderRendererParams`] bundle and returns
//! either a ready element or markup; both shapes are appended to the text
//! slot, markup wrapped in a `span`. Grids with scope-aware templating create
//! an isolated [`RenderScope`] per header cell and compile rendered content
//! against it.

use std::fmt;
use std::sync::Arc;

use crate::column::{Column, ColumnDef};
use crate::element::{Element, ElementRef};
use crate::options::{AppContext, GridApi};

/// What a header renderer produced.
#[derive(Debug, Clone)]
pub enum RenderedContent {
    /// A ready element.
    Element(ElementRef),
    /// Markup text.
    Markup(String),
}

impl RenderedContent {
    /// The element to append: the element itself, or a `span` holding the
    /// markup.
    pub fn into_element(self) -> ElementRef {
        match self {
            Self::Element(element) => element,
            Self::Markup(markup) => {
                let span = Element::new("span");
                span.set_markup(markup);
                span
            }
        }
    }
}

impl From<ElementRef> for RenderedContent {
    fn from(element: ElementRef) -> Self {
        Self::Element(element)
    }
}

impl From<String> for RenderedContent {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

impl From<&str> for RenderedContent {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

/// Everything a header renderer gets to work with.
pub struct HeaderRendererParams<'a> {
    /// The column's definition.
    pub col_def: &'a ColumnDef,
    /// The cell's isolated scope, with scope-aware templating.
    pub scope: Option<&'a dyn RenderScope>,
    /// Shared application context.
    pub context: Option<&'a AppContext>,
    /// The resolved display name.
    pub value: &'a str,
    /// The grid API.
    pub api: Option<&'a GridApi>,
    /// The header cell root.
    pub header_cell: &'a ElementRef,
}

/// Produces header content.
pub trait HeaderRenderer: Send + Sync {
    /// Renders content for one header cell.
    fn render(&self, params: &HeaderRendererParams<'_>) -> RenderedContent;
}

impl<F> HeaderRenderer for F
where
    F: Fn(&HeaderRendererParams<'_>) -> RenderedContent + Send + Sync,
{
    fn render(&self, params: &HeaderRendererParams<'_>) -> RenderedContent {
        self(params)
    }
}

/// A shareable header renderer, as stored in column definitions and grid
/// options.
#[derive(Clone)]
pub struct RendererRef(Arc<dyn HeaderRenderer>);

impl RendererRef {
    /// Wraps a renderer.
    pub fn new(renderer: impl HeaderRenderer + 'static) -> Self {
        Self(Arc::new(renderer))
    }

    /// Wraps a rendering function.
    pub fn from_fn<F>(render: F) -> Self
    where
        F: Fn(&HeaderRendererParams<'_>) -> RenderedContent + Send + Sync + 'static,
    {
        Self(Arc::new(render))
    }

    /// Renders content.
    pub fn render(&self, params: &HeaderRendererParams<'_>) -> RenderedContent {
        self.0.render(params)
    }
}

impl fmt::Debug for RendererRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RendererRef(..)")
    }
}

/// An isolated data-binding scope owned by one header cell.
pub trait RenderScope: Send + Sync {
    /// Releases the scope. Called once, when the header cell is destroyed.
    fn destroy(&self);
}

/// Hook for grids that compile header content against a data-binding scope.
pub trait ScopedTemplating: Send + Sync {
    /// Creates the isolated scope for a header cell, exposing the column and
    /// its definition.
    fn create_scope(&self, column: &Arc<Column>) -> Arc<dyn RenderScope>;

    /// Compiles rendered content against the scope, returning the element to
    /// append.
    fn compile(&self, content: ElementRef, scope: &dyn RenderScope) -> ElementRef;
}
