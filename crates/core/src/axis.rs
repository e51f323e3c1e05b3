/// An axis of scrollable motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The horizontal axis; offsets grow to the right.
    Horizontal,
    /// The vertical axis; offsets grow downwards.
    Vertical,
}

impl Axis {
    /// Both axes, in the order the overlay processes them.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Selects the value matching this axis.
    pub fn pick<T>(self, horizontal: T, vertical: T) -> T {
        match self {
            Axis::Horizontal => horizontal,
            Axis::Vertical => vertical,
        }
    }
}
