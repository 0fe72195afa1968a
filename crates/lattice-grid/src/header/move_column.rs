//! Dragging a header to move its column.
//!
//! The header cell builds one [`MoveColumnController`] per column and hands
//! it to the grid's [`ControllerWiring`]. The default wiring,
//! [`DragWiring`], attaches the controller to the drag primitive: the column
//! is flagged as moving while its label is dragged. Computing the new
//! position is left to the host.

use std::fmt;
use std::sync::Arc;

use lattice_grid_core::logging::targets;
use lattice_grid_core::{Subscription, Teardown};

use super::template::HeaderParts;
use super::HeaderCell;
use crate::column::Column;
use crate::drag::{DragParams, DragService, DEFAULT_START_AFTER_PIXELS};
use crate::element::ElementRef;
use crate::services::ControllerWiring;

/// Cursor shown while moving a column.
const MOVE_CURSOR: &str = "move";

/// Moves a column when its header label is dragged.
pub struct MoveColumnController {
    column: Arc<Column>,
    label: ElementRef,
    header_row: ElementRef,
    header_cell: ElementRef,
}

impl MoveColumnController {
    /// Creates a controller for `column`, dragged by `label` within
    /// `header_row`.
    pub fn new(
        column: Arc<Column>,
        label: ElementRef,
        header_row: ElementRef,
        header_cell: ElementRef,
    ) -> Self {
        Self {
            column,
            label,
            header_row,
            header_cell,
        }
    }

    /// The column being moved.
    pub fn column(&self) -> &Arc<Column> {
        &self.column
    }

    /// The drag handle.
    pub fn label(&self) -> &ElementRef {
        &self.label
    }

    /// The container bounding the drag.
    pub fn header_row(&self) -> &ElementRef {
        &self.header_row
    }

    /// The header cell root of the column.
    pub fn header_cell(&self) -> &ElementRef {
        &self.header_cell
    }

    /// Starts tracking drags of the label. The column is flagged as moving
    /// from the start of a drag until it finishes or the returned
    /// subscription is released.
    pub fn attach(self, drag: &dyn DragService) -> Subscription {
        let started = self.column.clone();
        let progressed = self.column.clone();
        let subscription = drag.add_drag_handling(DragParams {
            draggable: self.label,
            body: self.header_row,
            cursor: MOVE_CURSOR.to_string(),
            start_after_pixels: DEFAULT_START_AFTER_PIXELS,
            on_drag_start: Box::new(move || started.set_moving(true)),
            on_dragging: Box::new(move |delta, finished| {
                tracing::trace!(target: targets::DRAG, col_id = progressed.col_id(), delta, finished, "moving column");
                if finished {
                    progressed.set_moving(false);
                }
            }),
        });

        let column = self.column;
        Subscription::new(move || {
            subscription.unsubscribe();
            column.set_moving(false);
        })
    }
}

impl fmt::Debug for MoveColumnController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveColumnController")
            .field("col_id", &self.column.col_id())
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Wires move controllers onto a drag primitive.
pub struct DragWiring {
    drag: Arc<dyn DragService>,
}

impl DragWiring {
    /// Creates wiring that attaches controllers to `drag`.
    pub fn new(drag: Arc<dyn DragService>) -> Self {
        Self { drag }
    }
}

impl ControllerWiring for DragWiring {
    fn wire_move_controller(&self, controller: MoveColumnController) -> Subscription {
        controller.attach(self.drag.as_ref())
    }
}

impl fmt::Debug for DragWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragWiring").finish_non_exhaustive()
    }
}

impl HeaderCell {
    pub(super) fn attach_move(&self, parts: &HeaderParts, teardown: &mut Teardown) {
        if !self.context.options.move_enabled_for(self.column.col_def()) {
            return;
        }
        let Some(label) = &parts.label else {
            return;
        };

        let controller = MoveColumnController::new(
            self.column.clone(),
            label.clone(),
            self.header_row.clone(),
            parts.cell.clone(),
        );
        teardown.push_subscription(self.context.wiring.wire_move_controller(controller));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDef;
    use crate::drag::PointerDragService;
    use crate::element::{Element, PointerEvent};

    fn fixture() -> (Arc<Column>, ElementRef, ElementRef, ElementRef) {
        let column = Column::new("a", ColumnDef::new("a"));
        let row = Element::new("div");
        let cell = Element::new("div");
        let label = Element::new("div");
        cell.append_child(label.clone());
        row.append_child(cell.clone());
        (column, row, cell, label)
    }

    #[test]
    fn test_drag_flags_column_as_moving() {
        let (column, row, cell, label) = fixture();
        let controller = MoveColumnController::new(column.clone(), label.clone(), row.clone(), cell);
        let _subscription = DragWiring::new(Arc::new(PointerDragService)).wire_move_controller(controller);
        assert_eq!(label.cursor().as_deref(), Some(MOVE_CURSOR));

        label.dispatch_pointer_press(PointerEvent::new(10.0, 0.0));
        row.dispatch_pointer_move(PointerEvent::new(30.0, 0.0));
        assert!(column.is_moving());

        row.dispatch_pointer_release(PointerEvent::new(40.0, 0.0));
        assert!(!column.is_moving());
    }

    #[test]
    fn test_release_mid_drag_clears_moving() {
        let (column, row, cell, label) = fixture();
        let subscription = MoveColumnController::new(column.clone(), label.clone(), row.clone(), cell)
            .attach(&PointerDragService);

        label.dispatch_pointer_press(PointerEvent::new(0.0, 0.0));
        row.dispatch_pointer_move(PointerEvent::new(20.0, 0.0));
        assert!(column.is_moving());

        subscription.unsubscribe();
        assert!(!column.is_moving());
        row.dispatch_pointer_move(PointerEvent::new(60.0, 0.0));
        assert!(!column.is_moving());
    }
}
