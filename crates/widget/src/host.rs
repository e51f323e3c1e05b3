//! The seam between the overlay and its embedding environment.
//!
//! The overlay core never depends on a concrete rendering stack: it talks to
//! a [`Host`] that can create [`Node`]s, schedule frame callbacks and
//! timers, and register document/window-level listeners. Any environment
//! with overflow-based native scrolling, box measurement, event subscription
//! and inline style mutation can implement these traits.
use std::rc::Rc;

use crate::core::time::Duration;
use crate::core::{Axis, Point, Rectangle, ScrollMetrics};
use crate::style::StyleMap;

/// A pointer event in host window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// The pointer position.
    pub position: Point,
}

impl PointerEvent {
    /// Creates a new [`PointerEvent`] at the given position.
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

/// Whether a handler consumed the event it was given.
///
/// A captured event stops propagating to enclosing surfaces and suppresses
/// the environment's default behavior (text selection, native drag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was not consumed; keep dispatching.
    Ignored,
    /// The event was consumed; stop dispatching and suppress defaults.
    Captured,
}

/// Events observable on an individual [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeEvent {
    /// The node's scroll offset changed.
    ///
    /// Hosts deliver this asynchronously: a [`Node::set_scroll_offset`] call
    /// never invokes scroll listeners before it returns.
    Scroll,
    /// A pointer button was pressed over the node.
    PointerDown,
    /// The pointer entered the node. Does not propagate.
    PointerEnter,
    /// The pointer left the node. Does not propagate.
    PointerLeave,
}

/// Events observable at the document/window level, used while the pointer is
/// outside the overlay's own surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// The pointer moved anywhere in the window.
    PointerMove,
    /// A pointer button was released anywhere in the window.
    PointerUp,
    /// The window was resized.
    Resize,
}

/// A registered event handler.
pub type EventHandler = Rc<dyn Fn(PointerEvent) -> EventStatus>;

/// A one-shot callback scheduled on a frame or timeout.
pub type FrameCallback = Box<dyn FnOnce()>;

/// A repeating callback driven by an interval.
pub type IntervalCallback = Box<dyn FnMut()>;

/// Identifies a registered listener for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Identifies a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Identifies a pending timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// A DOM-like surface provided by a [`Host`].
///
/// Values are cheap handles onto shared state; cloning a [`Node`] clones the
/// handle, not the surface.
pub trait Node: Clone + 'static {
    /// The scroll offset along the given [`Axis`].
    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Writes the scroll offset along the given [`Axis`], clamped to the
    /// scrollable range.
    ///
    /// Scroll listeners observe the change asynchronously; see
    /// [`NodeEvent::Scroll`].
    fn set_scroll_offset(&self, axis: Axis, offset: f32);

    /// The total content size along the given [`Axis`].
    fn scroll_size(&self, axis: Axis) -> f32;

    /// The viewport size along the given [`Axis`].
    fn client_size(&self, axis: Axis) -> f32;

    /// The border-box size along the given [`Axis`], including any native
    /// scrollbar.
    fn offset_size(&self, axis: Axis) -> f32;

    /// The usable track length along the given [`Axis`]: the padding-box
    /// extent.
    fn inner_length(&self, axis: Axis) -> f32;

    /// The node's bounding rectangle in window coordinates.
    fn bounding_rect(&self) -> Rectangle;

    /// Applies an inline style patch, property by property.
    fn apply_style(&self, patch: &StyleMap);

    /// Appends `child` to this node, detaching it from any previous parent.
    fn append_child(&self, child: &Self);

    /// Detaches this node from its parent, if any.
    fn remove(&self);

    /// Registers a listener for the given event.
    ///
    /// Hosts must tolerate listener removal while a dispatch is in
    /// progress; a handler may tear down the very registration that invoked
    /// it.
    fn add_listener(&self, event: NodeEvent, handler: EventHandler) -> ListenerId;

    /// Removes a previously registered listener.
    fn remove_listener(&self, id: ListenerId);

    /// Reads a full [`ScrollMetrics`] snapshot of this node.
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_left: self.scroll_offset(Axis::Horizontal),
            scroll_top: self.scroll_offset(Axis::Vertical),
            scroll_width: self.scroll_size(Axis::Horizontal),
            scroll_height: self.scroll_size(Axis::Vertical),
            client_width: self.client_size(Axis::Horizontal),
            client_height: self.client_size(Axis::Vertical),
        }
    }
}

/// An embedding environment.
///
/// All scheduling primitives are cooperative and single-threaded: callbacks
/// run on the same thread that mutates overlay state, never concurrently.
pub trait Host: 'static {
    /// The node type this host produces.
    type Node: Node;

    /// Creates a detached element with the given tag.
    fn create_element(&self, tag: &str) -> Self::Node;

    /// The root node new surfaces and measurement probes attach to.
    fn root(&self) -> Self::Node;

    /// The thickness of the environment's native scrollbars.
    ///
    /// Measured once per host — an environment's native scrollbar width does
    /// not change at runtime — and memoized; [`crate::probe::measure`] is
    /// the reference measurement. 0 means overlay-style native scrollbars
    /// (common on touch platforms), which disables the visual tracks
    /// entirely.
    fn scrollbar_width(&self) -> f32;

    /// Schedules `callback` to run on the next animation frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameId;

    /// Cancels a pending frame request. A no-op if it already fired.
    fn cancel_frame(&self, id: FrameId);

    /// Schedules `callback` to run once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: FrameCallback) -> TimerId;

    /// Cancels a pending timeout. A no-op if it already fired.
    fn clear_timeout(&self, id: TimerId);

    /// Schedules `callback` to run repeatedly every `period`.
    fn set_interval(&self, period: Duration, callback: IntervalCallback) -> TimerId;

    /// Cancels an interval, also from within its own callback.
    fn clear_interval(&self, id: TimerId);

    /// Registers a document/window-level listener.
    ///
    /// The same removal-during-dispatch tolerance as
    /// [`Node::add_listener`] applies.
    fn add_listener(&self, event: HostEvent, handler: EventHandler) -> ListenerId;

    /// Removes a previously registered document/window-level listener.
    fn remove_listener(&self, id: ListenerId);

    /// Enables or disables text selection, used to suppress selection while
    /// a thumb is dragged.
    fn set_selection_enabled(&self, enabled: bool);
}
