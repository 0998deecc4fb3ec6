//! Drag-to-resize sessions for rows and columns.
//!
//! A session starts on a resize edge with the anchor at the leading edge of
//! the object being resized. Pointer moves track a candidate position that is
//! clamped to the viewport and never falls below the anchor; the grid paints
//! a guide line there. Releasing the pointer commits `position - anchor` as
//! the new size, unless the release lands before the anchor.

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Point, Rect};

use crate::error::Axis;
use crate::model::ObjectRef;

/// A transient line drawn while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideLine {
    pub from: Point,
    pub to: Point,
}

/// A size to apply once a drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeCommit {
    pub target: ObjectRef,
    pub size: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession {
    target: ObjectRef,
    anchor: i32,
    position: i32,
    viewport: Rect,
}

impl DragSession {
    fn axis(&self) -> Axis {
        self.target.axis()
    }

    fn coordinate(&self, point: Point) -> i32 {
        match self.axis() {
            Axis::Column => point.x,
            Axis::Row => point.y,
        }
    }

    /// Clamp a pointer coordinate into the viewport along the drag axis.
    fn clamp_to_viewport(&self, pos: i32) -> i32 {
        let (lo, hi) = match self.axis() {
            Axis::Column => (self.viewport.left(), self.viewport.right() - 1),
            Axis::Row => (self.viewport.top(), self.viewport.bottom() - 1),
        };
        pos.clamp(lo, hi.max(lo))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Runs one resize drag at a time and owns pointer capture while it does.
///
/// # Signals
///
/// - `capture_changed(bool)`: `true` when a drag captures the pointer,
///   `false` when it releases it
#[derive(Debug, Default)]
pub struct ResizeDragController {
    state: DragState,
    /// Emitted when pointer capture is acquired or released.
    pub capture_changed: Signal<bool>,
}

impl ResizeDragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The object being resized, if a drag is in progress.
    pub fn target(&self) -> Option<ObjectRef> {
        match self.state {
            DragState::Dragging(session) => Some(session.target),
            DragState::Idle => None,
        }
    }

    /// Start resizing `target`, capturing the pointer.
    ///
    /// `anchor` is the leading edge of the target; `viewport` bounds the
    /// guide line. A drag already in progress is aborted first.
    pub fn begin_drag(&mut self, target: ObjectRef, anchor: Point, viewport: Rect) {
        if self.is_dragging() {
            self.abort();
        }
        let mut session = DragSession {
            target,
            anchor: 0,
            position: 0,
            viewport,
        };
        session.anchor = session.coordinate(anchor);
        session.position = session.anchor;
        self.state = DragState::Dragging(session);

        tracing::debug!(target: targets::RESIZE, axis = %target.axis(), anchor = session.anchor, "resize drag started");
        self.capture_changed.emit(true);
    }

    /// Track the pointer. Returns the guide line to draw, or `None` if idle.
    pub fn drag(&mut self, point: Point) -> Option<GuideLine> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        let pos = session.clamp_to_viewport(session.coordinate(point));
        session.position = pos.max(session.anchor);
        tracing::trace!(target: targets::RESIZE, position = session.position, "resize drag moved");
        self.guide_line()
    }

    /// Finish the drag at `point` and release pointer capture.
    ///
    /// Returns the size to commit when the release position is at or past
    /// the anchor. A release before the anchor commits nothing.
    pub fn end_drag(&mut self, point: Point) -> Option<ResizeCommit> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.capture_changed.emit(false);

        let pos = session.clamp_to_viewport(session.coordinate(point));
        if pos < session.anchor {
            tracing::debug!(target: targets::RESIZE, position = pos, anchor = session.anchor, "resize released before anchor; nothing committed");
            return None;
        }
        let commit = ResizeCommit {
            target: session.target,
            size: pos - session.anchor,
        };
        tracing::debug!(target: targets::RESIZE, axis = %session.axis(), size = commit.size, "resize committed");
        Some(commit)
    }

    /// Drop the drag without committing, releasing pointer capture.
    pub fn abort(&mut self) {
        if let DragState::Dragging(session) = std::mem::take(&mut self.state) {
            tracing::debug!(target: targets::RESIZE, axis = %session.axis(), "resize drag aborted");
            self.capture_changed.emit(false);
        }
    }

    /// The guide line at the current candidate position.
    pub fn guide_line(&self) -> Option<GuideLine> {
        let DragState::Dragging(session) = self.state else {
            return None;
        };
        let v = session.viewport;
        Some(match session.axis() {
            Axis::Column => GuideLine {
                from: Point::new(session.position, v.top()),
                to: Point::new(session.position, v.bottom()),
            },
            Axis::Row => GuideLine {
                from: Point::new(v.left(), session.position),
                to: Point::new(v.right(), session.position),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridModel;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn column_target() -> ObjectRef {
        let mut m = GridModel::new();
        m.add_column(40);
        m.object_ref(Axis::Column, 0).unwrap()
    }

    fn row_target() -> ObjectRef {
        let mut m = GridModel::new();
        m.add_row(20);
        m.object_ref(Axis::Row, 0).unwrap()
    }

    const VIEWPORT: Rect = Rect::new(0, 0, 200, 100);

    #[test]
    fn test_drag_commits_distance_from_anchor() {
        let mut ctl = ResizeDragController::new();
        let target = column_target();
        ctl.begin_drag(target, Point::new(30, 5), VIEWPORT);
        assert!(ctl.is_dragging());

        ctl.drag(Point::new(90, 5));
        let commit = ctl.end_drag(Point::new(95, 50)).unwrap();

        assert_eq!(commit, ResizeCommit { target, size: 65 });
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_release_before_anchor_commits_nothing() {
        let mut ctl = ResizeDragController::new();
        ctl.begin_drag(column_target(), Point::new(30, 5), VIEWPORT);
        assert_eq!(ctl.end_drag(Point::new(10, 5)), None);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_guide_line_is_clamped() {
        let mut ctl = ResizeDragController::new();
        ctl.begin_drag(row_target(), Point::new(5, 20), VIEWPORT);

        let line = ctl.drag(Point::new(5, 4)).unwrap();
        assert_eq!(line.from, Point::new(0, 20));
        assert_eq!(line.to, Point::new(200, 20));

        let line = ctl.drag(Point::new(5, 500)).unwrap();
        assert_eq!(line.from.y, 99);
    }

    #[test]
    fn test_capture_released_on_end_and_abort() {
        let mut ctl = ResizeDragController::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        ctl.capture_changed
            .connect(move |&captured| events_clone.lock().push(captured));

        ctl.begin_drag(column_target(), Point::new(30, 5), VIEWPORT);
        ctl.end_drag(Point::new(0, 5));
        ctl.begin_drag(column_target(), Point::new(30, 5), VIEWPORT);
        ctl.abort();
        ctl.abort();

        assert_eq!(*events.lock(), vec![true, false, true, false]);
        assert_eq!(ctl.drag(Point::new(50, 5)), None);
    }
}
