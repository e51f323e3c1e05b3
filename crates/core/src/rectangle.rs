use crate::{Axis, Point, Size};

/// An axis-aligned rectangle in host pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// The X coordinate of the top-left corner.
    pub x: f32,
    /// The Y coordinate of the top-left corner.
    pub y: f32,
    /// The width of the rectangle.
    pub width: f32,
    /// The height of the rectangle.
    pub height: f32,
}

impl Rectangle {
    /// Creates a new [`Rectangle`] with its top-left corner at the given
    /// [`Point`] and with the given [`Size`].
    pub fn new(top_left: Point, size: Size) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.width,
            height: size.height,
        }
    }

    /// The position of the top-left corner.
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The [`Size`] of the rectangle.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The leading edge coordinate along the given [`Axis`].
    pub fn start(self, axis: Axis) -> f32 {
        axis.pick(self.x, self.y)
    }

    /// The extent along the given [`Axis`].
    pub fn length(self, axis: Axis) -> f32 {
        axis.pick(self.width, self.height)
    }

    /// The trailing edge coordinate along the given [`Axis`].
    pub fn end(self, axis: Axis) -> f32 {
        self.start(axis) + self.length(axis)
    }

    /// Returns whether the given [`Point`] lies inside the rectangle.
    pub fn contains(self, point: Point) -> bool {
        self.x <= point.x
            && point.x < self.x + self.width
            && self.y <= point.y
            && point.y < self.y + self.height
    }
}
