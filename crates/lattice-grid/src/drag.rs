//! Pointer drag gestures.
//!
//! A [`DragService`] turns raw pointer traffic into two callbacks: one when a
//! drag starts and one per movement carrying the cumulative horizontal delta
//! and whether the gesture just ended. Header cells use it for column
//! resizing, the move controller for column reordering.
//!
//! [`PointerDragService`] implements the contract on top of [`Element`](crate::element::Element)
//! pointer signals: a press on the draggable element arms the gesture, moves
//! and the release are tracked on the bounding body element.

use std::fmt;
use std::sync::Arc;

use lattice_grid_core::logging::targets;
use lattice_grid_core::Subscription;
use parking_lot::Mutex;

use crate::element::{ElementRef, PointerEvent};

/// Default pixel distance the pointer must travel before a drag starts.
pub const DEFAULT_START_AFTER_PIXELS: f32 = 4.0;

/// Called once when a drag starts.
pub type DragStartCallback = Box<dyn Fn() + Send + Sync>;

/// Called with the cumulative delta and whether the gesture finished.
pub type DraggingCallback = Box<dyn Fn(f32, bool) + Send + Sync>;

/// Describes one draggable affordance.
pub struct DragParams {
    /// The element the gesture starts on.
    pub draggable: ElementRef,
    /// The element that receives pointer traffic while dragging.
    pub body: ElementRef,
    /// Cursor shown while dragging.
    pub cursor: String,
    /// Distance the pointer must travel before the drag starts.
    pub start_after_pixels: f32,
    /// Drag start callback.
    pub on_drag_start: DragStartCallback,
    /// Drag progress callback.
    pub on_dragging: DraggingCallback,
}

impl fmt::Debug for DragParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragParams")
            .field("draggable", &self.draggable)
            .field("cursor", &self.cursor)
            .field("start_after_pixels", &self.start_after_pixels)
            .finish_non_exhaustive()
    }
}

/// The drag-gesture primitive.
pub trait DragService: Send + Sync {
    /// Starts tracking drags on `params.draggable`.
    ///
    /// Releasing the returned subscription stops tracking; callbacks of a
    /// gesture in flight are not delivered afterwards.
    fn add_drag_handling(&self, params: DragParams) -> Subscription;
}

#[derive(Debug, Default)]
struct GestureState {
    origin: Option<PointerEvent>,
    started: bool,
}

enum Step {
    Ignore,
    Start(f32),
    Drag(f32),
}

/// Drag tracking on element pointer signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerDragService;

impl PointerDragService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }
}

impl DragService for PointerDragService {
    fn add_drag_handling(&self, params: DragParams) -> Subscription {
        let DragParams {
            draggable,
            body,
            cursor,
            start_after_pixels,
            on_drag_start,
            on_dragging,
        } = params;

        draggable.set_cursor(cursor);
        let state = Arc::new(Mutex::new(GestureState::default()));
        let on_drag_start: Arc<DragStartCallback> = Arc::new(on_drag_start);
        let on_dragging: Arc<DraggingCallback> = Arc::new(on_dragging);

        let pressed = {
            let state = state.clone();
            draggable.pointer_pressed.subscribe(move |event| {
                *state.lock() = GestureState {
                    origin: Some(*event),
                    started: false,
                };
            })
        };

        let moved = {
            let state = state.clone();
            let on_drag_start = on_drag_start.clone();
            let on_dragging = on_dragging.clone();
            body.pointer_moved.subscribe(move |event| {
                let step = {
                    let mut state = state.lock();
                    match state.origin {
                        None => Step::Ignore,
                        Some(origin) => {
                            let delta = event.x - origin.x;
                            if state.started {
                                Step::Drag(delta)
                            } else if exceeds_threshold(origin, *event, start_after_pixels) {
                                state.started = true;
                                Step::Start(delta)
                            } else {
                                Step::Ignore
                            }
                        }
                    }
                };

                match step {
                    Step::Ignore => {}
                    Step::Start(delta) => {
                        tracing::debug!(target: targets::DRAG, "drag started");
                        on_drag_start();
                        on_dragging(delta, false);
                    }
                    Step::Drag(delta) => {
                        tracing::trace!(target: targets::DRAG, delta, "dragging");
                        on_dragging(delta, false);
                    }
                }
            })
        };

        let released = {
            let state = state.clone();
            body.pointer_released.subscribe(move |event| {
                let finished = {
                    let mut state = state.lock();
                    let finished = match state.origin {
                        Some(origin) if state.started => Some(event.x - origin.x),
                        _ => None,
                    };
                    *state = GestureState::default();
                    finished
                };

                if let Some(delta) = finished {
                    tracing::debug!(target: targets::DRAG, delta, "drag finished");
                    on_dragging(delta, true);
                }
            })
        };

        Subscription::new(move || {
            pressed.unsubscribe();
            moved.unsubscribe();
            released.unsubscribe();
        })
    }
}

fn exceeds_threshold(origin: PointerEvent, event: PointerEvent, threshold: f32) -> bool {
    let distance = (event.x - origin.x).abs().max((event.y - origin.y).abs());
    distance >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    type Log = Arc<Mutex<Vec<String>>>;

    fn params(draggable: &ElementRef, body: &ElementRef, threshold: f32, log: &Log) -> DragParams {
        let start_log = log.clone();
        let drag_log = log.clone();
        DragParams {
            draggable: draggable.clone(),
            body: body.clone(),
            cursor: "col-resize".into(),
            start_after_pixels: threshold,
            on_drag_start: Box::new(move || start_log.lock().push("start".into())),
            on_dragging: Box::new(move |delta, finished| {
                drag_log.lock().push(format!("{delta}:{finished}"))
            }),
        }
    }

    fn fixture() -> (ElementRef, ElementRef) {
        let body = Element::new("div");
        let handle = Element::new("div");
        body.append_child(handle.clone());
        (body, handle)
    }

    #[test]
    fn test_drag_reports_cumulative_delta() {
        let (body, handle) = fixture();
        let log = Log::default();
        let _subscription = PointerDragService.add_drag_handling(params(&handle, &body, 0.0, &log));
        assert_eq!(handle.cursor().as_deref(), Some("col-resize"));

        handle.dispatch_pointer_press(PointerEvent::new(100.0, 5.0));
        body.dispatch_pointer_move(PointerEvent::new(110.0, 5.0));
        body.dispatch_pointer_move(PointerEvent::new(125.0, 6.0));
        body.dispatch_pointer_release(PointerEvent::new(130.0, 6.0));

        assert_eq!(
            *log.lock(),
            vec!["start", "10:false", "25:false", "30:true"]
        );
    }

    #[test]
    fn test_threshold_delays_start() {
        let (body, handle) = fixture();
        let log = Log::default();
        let _subscription = PointerDragService.add_drag_handling(params(&handle, &body, 4.0, &log));

        handle.dispatch_pointer_press(PointerEvent::new(0.0, 0.0));
        body.dispatch_pointer_move(PointerEvent::new(2.0, 0.0));
        assert!(log.lock().is_empty());
        body.dispatch_pointer_move(PointerEvent::new(-5.0, 0.0));
        assert_eq!(*log.lock(), vec!["start", "-5:false"]);
    }

    #[test]
    fn test_release_without_drag_reports_nothing() {
        let (body, handle) = fixture();
        let log = Log::default();
        let _subscription = PointerDragService.add_drag_handling(params(&handle, &body, 4.0, &log));

        handle.dispatch_pointer_press(PointerEvent::new(0.0, 0.0));
        body.dispatch_pointer_release(PointerEvent::new(1.0, 0.0));
        body.dispatch_pointer_move(PointerEvent::new(50.0, 0.0));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_tracking() {
        let (body, handle) = fixture();
        let log = Log::default();
        let subscription = PointerDragService.add_drag_handling(params(&handle, &body, 0.0, &log));

        handle.dispatch_pointer_press(PointerEvent::new(0.0, 0.0));
        body.dispatch_pointer_move(PointerEvent::new(5.0, 0.0));
        subscription.unsubscribe();
        body.dispatch_pointer_move(PointerEvent::new(9.0, 0.0));
        body.dispatch_pointer_release(PointerEvent::new(9.0, 0.0));

        assert_eq!(*log.lock(), vec!["start", "5:false"]);
        assert_eq!(handle.pointer_pressed.connection_count(), 0);
        assert_eq!(body.pointer_moved.connection_count(), 0);
    }
}
