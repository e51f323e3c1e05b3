use crate::Axis;

/// A snapshot of a scrollable element's offsets and dimensions.
///
/// Read from the host element whenever geometry is needed and never
/// persisted; the element's native scroll position is the single source of
/// truth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// The horizontal scroll offset.
    pub scroll_left: f32,
    /// The vertical scroll offset.
    pub scroll_top: f32,
    /// The total content width.
    pub scroll_width: f32,
    /// The total content height.
    pub scroll_height: f32,
    /// The visible viewport width.
    pub client_width: f32,
    /// The visible viewport height.
    pub client_height: f32,
}

impl ScrollMetrics {
    /// The scroll offset along the given [`Axis`].
    pub fn scroll_offset(self, axis: Axis) -> f32 {
        axis.pick(self.scroll_left, self.scroll_top)
    }

    /// The content size along the given [`Axis`].
    pub fn scroll_size(self, axis: Axis) -> f32 {
        axis.pick(self.scroll_width, self.scroll_height)
    }

    /// The viewport size along the given [`Axis`].
    pub fn client_size(self, axis: Axis) -> f32 {
        axis.pick(self.client_width, self.client_height)
    }

    /// The largest reachable scroll offset along the given [`Axis`].
    pub fn max_scroll_offset(self, axis: Axis) -> f32 {
        (self.scroll_size(axis) - self.client_size(axis)).max(0.0)
    }

    /// Returns whether the content overflows the viewport along the given
    /// [`Axis`].
    pub fn overflows(self, axis: Axis) -> bool {
        self.scroll_size(axis) > self.client_size(axis)
    }

    /// The scrolled fraction along the given [`Axis`], in `[0, 1]` under
    /// normal content.
    ///
    /// 0 when the content does not overflow, so a degenerate denominator
    /// never produces `NaN` or infinity.
    pub fn fraction(self, axis: Axis) -> f32 {
        let range = self.scroll_size(axis) - self.client_size(axis);

        if range > 0.0 {
            self.scroll_offset(axis) / range
        } else {
            0.0
        }
    }

    /// The scrolled fraction of the horizontal axis.
    pub fn left(self) -> f32 {
        self.fraction(Axis::Horizontal)
    }

    /// The scrolled fraction of the vertical axis.
    pub fn top(self) -> f32 {
        self.fraction(Axis::Vertical)
    }
}
