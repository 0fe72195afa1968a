//! Drag-resizing and auto-sizing from the resize handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lattice_grid_core::logging::targets;
use lattice_grid_core::Teardown;
use parking_lot::Mutex;

use super::template::{part_ids, HeaderParts};
use super::HeaderCell;
use crate::drag::DragParams;

/// Cursor shown while resizing.
const RESIZE_CURSOR: &str = "col-resize";

/// State of the resize gesture of one header cell.
#[derive(Debug, Default)]
pub(super) struct ResizeGesture {
    start_width: Mutex<Option<f32>>,
    cancelled: AtomicBool,
}

impl ResizeGesture {
    fn begin(&self, width: f32) {
        *self.start_width.lock() = Some(width);
    }

    fn width_for(&self, delta: f32) -> Option<f32> {
        self.start_width.lock().map(|start| start + delta)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.start_width.lock().take();
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl HeaderCell {
    pub(super) fn attach_resize(self: &Arc<Self>, parts: &mut HeaderParts, teardown: &mut Teardown) {
        let Some(handle) = parts.find(part_ids::RESIZE_BAR) else {
            return;
        };

        let options = &self.context.options;
        let def = self.column.col_def();
        if !options.resize_enabled_for(def) {
            handle.remove_from_parent();
            return;
        }

        let on_start = Arc::downgrade(self);
        let on_progress = Arc::downgrade(self);
        let drag = self.context.drag.add_drag_handling(DragParams {
            draggable: handle.clone(),
            body: self.header_row.clone(),
            cursor: RESIZE_CURSOR.to_string(),
            start_after_pixels: 0.0,
            on_drag_start: Box::new(move || {
                if let Some(cell) = on_start.upgrade() {
                    cell.on_drag_start();
                }
            }),
            on_dragging: Box::new(move |delta, finished| {
                if let Some(cell) = on_progress.upgrade() {
                    cell.on_dragging(delta, finished);
                }
            }),
        });
        teardown.push_subscription(drag);

        let gesture = self.resize.clone();
        teardown.push(move || gesture.cancel());

        if options.auto_size_enabled_for(def) {
            let cell = Arc::downgrade(self);
            teardown.push_subscription(handle.double_clicked.subscribe(move |_| {
                if let Some(cell) = cell.upgrade() {
                    cell.context.columns.auto_size_column(&cell.column);
                }
            }));
        }

        parts.resize = Some(handle);
    }

    /// Snapshots the column width at the start of a resize gesture.
    pub fn on_drag_start(&self) {
        if self.resize.is_cancelled() {
            return;
        }
        let width = self.column.actual_width();
        tracing::debug!(target: targets::RESIZE, col_id = self.column.col_id(), width, "resize started");
        self.resize.begin(width);
    }

    /// Requests the snapshot width plus the cumulative `delta` from the column
    /// model. `finished` marks the end of the gesture.
    pub fn on_dragging(&self, delta: f32, finished: bool) {
        if self.resize.is_cancelled() {
            return;
        }
        let Some(width) = self.resize.width_for(delta) else {
            tracing::trace!(target: targets::RESIZE, "resize progress without a start, ignored");
            return;
        };

        tracing::trace!(target: targets::RESIZE, col_id = self.column.col_id(), width, finished, "resizing");
        self.context
            .columns
            .set_column_width(&self.column, width, finished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_needs_a_start() {
        let gesture = ResizeGesture::default();
        assert_eq!(gesture.width_for(10.0), None);
        gesture.begin(100.0);
        assert_eq!(gesture.width_for(-15.0), Some(85.0));
    }

    #[test]
    fn test_cancel_forgets_start() {
        let gesture = ResizeGesture::default();
        gesture.begin(100.0);
        gesture.cancel();
        assert!(gesture.is_cancelled());
        assert_eq!(gesture.width_for(5.0), None);
    }
}
