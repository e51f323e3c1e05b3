use crate::core::{Axis, Point};

/// The transient interaction state of a mounted overlay.
///
/// One explicit struct owned by the component instance and mutated only by
/// its own handlers; `scrolling` is exclusive with the idle state, while
/// `dragging` and `track_hovered` are independent flags layered on top.
#[derive(Debug, Default)]
pub struct Interaction {
    /// Whether a thumb is currently being dragged.
    pub dragging: bool,
    /// Whether the pointer is over one of the tracks.
    pub track_hovered: bool,
    /// Whether the view is currently scrolling.
    pub scrolling: bool,
    /// The horizontal drag origin: the distance from the grab point to the
    /// thumb's trailing edge. Set on drag start, cleared on drag end.
    pub drag_origin_x: Option<f32>,
    /// The vertical drag origin.
    pub drag_origin_y: Option<f32>,
    /// The scroll position observed by the most recent frame pass.
    pub view_scroll: Point,
    /// The scroll position at the previous poll tick.
    pub last_view_scroll: Point,
}

impl Interaction {
    /// The drag origin along the given [`Axis`], if that axis is being
    /// dragged.
    pub fn drag_origin(&self, axis: Axis) -> Option<f32> {
        axis.pick(self.drag_origin_x, self.drag_origin_y)
    }

    /// Records the drag origin for the given [`Axis`].
    pub fn set_drag_origin(&mut self, axis: Axis, origin: f32) {
        match axis {
            Axis::Horizontal => self.drag_origin_x = Some(origin),
            Axis::Vertical => self.drag_origin_y = Some(origin),
        }
    }

    /// Ends any drag, clearing both axis origins.
    pub fn clear_drag(&mut self) {
        self.dragging = false;
        self.drag_origin_x = None;
        self.drag_origin_y = None;
    }

    /// Whether the tracks may be hidden right now: hiding is a no-op while
    /// dragging, scrolling, or hovering a track.
    pub fn may_hide_tracks(&self) -> bool {
        !self.dragging && !self.scrolling && !self.track_hovered
    }
}
