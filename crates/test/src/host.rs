//! The deterministic in-memory host.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use scrollbars_core::time::{Duration, Instant};
use scrollbars_core::{Axis, Point, Rectangle, Size};
use scrollbars_widget::host::{
    EventHandler, EventStatus, FrameCallback, FrameId, Host, HostEvent, IntervalCallback,
    ListenerId, Node, NodeEvent, PointerEvent, TimerId,
};
use scrollbars_widget::style::{self, StyleMap, StyleValue};

use crate::Error;

struct Timeout {
    id: TimerId,
    due: Instant,
    callback: FrameCallback,
}

struct Interval {
    id: TimerId,
    period: Duration,
    next: Instant,
    callback: IntervalCallback,
}

struct HostListener {
    id: ListenerId,
    event: HostEvent,
    handler: EventHandler,
}

struct Core {
    now: Cell<Instant>,
    next_id: Cell<u64>,
    native_scrollbar_width: f32,
    frames: RefCell<Vec<(FrameId, FrameCallback)>>,
    timeouts: RefCell<Vec<Timeout>>,
    intervals: RefCell<Vec<Interval>>,
    cancelled_intervals: RefCell<FxHashSet<TimerId>>,
    listeners: RefCell<Vec<HostListener>>,
    scroll_queue: RefCell<Vec<TestNode>>,
    selection_enabled: Cell<bool>,
}

impl Core {
    fn mint(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

enum Due {
    Timeout(TimerId),
    Interval(TimerId),
}

/// A deterministic, headless [`Host`].
///
/// Time only moves through [`advance`](Sandbox::advance) and frames only run
/// through [`run_frames`](Sandbox::run_frames), so every test drives the
/// exact schedule it wants to observe. Scroll events are delivered
/// asynchronously — queued by offset writes and dispatched by
/// [`flush_scroll_events`](Sandbox::flush_scroll_events) — matching the
/// [`Node::set_scroll_offset`] contract.
#[derive(Clone)]
pub struct Sandbox {
    core: Rc<Core>,
    root: TestNode,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Creates a sandbox with classic 17px native scrollbars.
    pub fn new() -> Self {
        Self::with_scrollbar_width(17.0)
    }

    /// Creates a sandbox whose native scrollbars have the given width; 0
    /// simulates an overlay-scrollbar (touch) environment.
    pub fn with_scrollbar_width(width: f32) -> Self {
        let core = Rc::new(Core {
            now: Cell::new(Instant::now()),
            next_id: Cell::new(1),
            native_scrollbar_width: width,
            frames: RefCell::new(Vec::new()),
            timeouts: RefCell::new(Vec::new()),
            intervals: RefCell::new(Vec::new()),
            cancelled_intervals: RefCell::new(FxHashSet::default()),
            listeners: RefCell::new(Vec::new()),
            scroll_queue: RefCell::new(Vec::new()),
            selection_enabled: Cell::new(true),
        });

        let root = TestNode::new(Rc::downgrade(&core), "body");

        Self { core, root }
    }

    /// The sandbox's current instant.
    pub fn now(&self) -> Instant {
        self.core.now.get()
    }

    /// Returns whether text selection is currently enabled.
    pub fn selection_enabled(&self) -> bool {
        self.core.selection_enabled.get()
    }

    /// The number of registered document/window-level listeners.
    pub fn listener_count(&self) -> usize {
        self.core.listeners.borrow().len()
    }

    /// The number of pending animation-frame requests.
    pub fn pending_frame_count(&self) -> usize {
        self.core.frames.borrow().len()
    }

    /// Runs every pending animation-frame callback. Frames requested while
    /// the batch runs land in the next batch.
    pub fn run_frames(&self) {
        let batch = self.core.frames.take();

        for (_, callback) in batch {
            callback();
        }
    }

    /// Delivers every queued scroll event to its node's listeners.
    pub fn flush_scroll_events(&self) {
        let queue = self.core.scroll_queue.take();

        for node in queue {
            let _ = deliver(&node, NodeEvent::Scroll, PointerEvent::default());
        }
    }

    /// Alternates scroll delivery and frame execution until both queues are
    /// empty.
    pub fn settle(&self) {
        for _ in 0..32 {
            let idle = self.core.scroll_queue.borrow().is_empty()
                && self.core.frames.borrow().is_empty();

            if idle {
                break;
            }

            self.flush_scroll_events();
            self.run_frames();
        }
    }

    /// Moves the clock forward, firing every timeout and interval tick that
    /// falls due, in chronological order. Timers scheduled by a firing
    /// callback fire too if they fall within the window.
    pub fn advance(&self, elapsed: Duration) {
        let target = self.core.now.get() + elapsed;

        while let Some((when, due)) = self.due_before(target) {
            self.core.now.set(when);

            match due {
                Due::Timeout(id) => {
                    let fired = {
                        let mut timeouts = self.core.timeouts.borrow_mut();
                        timeouts
                            .iter()
                            .position(|timeout| timeout.id == id)
                            .map(|index| timeouts.remove(index))
                    };

                    if let Some(timeout) = fired {
                        (timeout.callback)();
                    }
                }
                Due::Interval(id) => {
                    let fired = {
                        let mut intervals = self.core.intervals.borrow_mut();
                        intervals
                            .iter()
                            .position(|interval| interval.id == id)
                            .map(|index| intervals.remove(index))
                    };

                    if let Some(mut interval) = fired {
                        interval.next = when + interval.period;
                        (interval.callback)();

                        let cancelled = self.core.cancelled_intervals.borrow_mut().remove(&id);

                        if !cancelled {
                            self.core.intervals.borrow_mut().push(interval);
                        }
                    }
                }
            }
        }

        self.core.now.set(target);
    }

    fn due_before(&self, target: Instant) -> Option<(Instant, Due)> {
        let timeouts = self.core.timeouts.borrow();
        let intervals = self.core.intervals.borrow();

        let timeout = timeouts
            .iter()
            .filter(|timeout| timeout.due <= target)
            .min_by_key(|timeout| timeout.due)
            .map(|timeout| (timeout.due, Due::Timeout(timeout.id)));

        let interval = intervals
            .iter()
            .filter(|interval| interval.next <= target)
            .min_by_key(|interval| interval.next)
            .map(|interval| (interval.next, Due::Interval(interval.id)));

        match (timeout, interval) {
            (Some(t), Some(i)) => Some(if t.0 <= i.0 { t } else { i }),
            (Some(t), None) => Some(t),
            (None, Some(i)) => Some(i),
            (None, None) => None,
        }
    }

    /// Presses the pointer down over `node`, bubbling up through its
    /// ancestors until some handler captures the event.
    pub fn pointer_down(&self, node: &TestNode, position: Point) -> Result<EventStatus, Error> {
        self.ensure_attached(node)?;

        let event = PointerEvent::new(position);
        let mut current = Some(node.clone());

        while let Some(target) = current {
            if deliver(&target, NodeEvent::PointerDown, event) == EventStatus::Captured {
                return Ok(EventStatus::Captured);
            }

            current = target.parent();
        }

        Ok(EventStatus::Ignored)
    }

    /// Moves the pointer into `node`. Enter events do not propagate.
    pub fn pointer_enter(&self, node: &TestNode) -> Result<EventStatus, Error> {
        self.ensure_attached(node)?;
        Ok(deliver(node, NodeEvent::PointerEnter, PointerEvent::default()))
    }

    /// Moves the pointer out of `node`. Leave events do not propagate.
    pub fn pointer_leave(&self, node: &TestNode) -> Result<EventStatus, Error> {
        self.ensure_attached(node)?;
        Ok(deliver(node, NodeEvent::PointerLeave, PointerEvent::default()))
    }

    /// Moves the pointer anywhere in the window, reaching document-level
    /// listeners.
    pub fn pointer_move(&self, position: Point) -> EventStatus {
        self.dispatch_host(HostEvent::PointerMove, PointerEvent::new(position))
    }

    /// Releases the pointer anywhere in the window.
    pub fn pointer_up(&self, position: Point) -> EventStatus {
        self.dispatch_host(HostEvent::PointerUp, PointerEvent::new(position))
    }

    /// Fires a window resize.
    pub fn resize(&self) -> EventStatus {
        self.dispatch_host(HostEvent::Resize, PointerEvent::default())
    }

    fn dispatch_host(&self, event: HostEvent, pointer: PointerEvent) -> EventStatus {
        let handlers: Vec<EventHandler> = self
            .core
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.event == event)
            .map(|listener| Rc::clone(&listener.handler))
            .collect();

        let mut status = EventStatus::Ignored;

        for handler in handlers {
            if handler(pointer) == EventStatus::Captured {
                status = EventStatus::Captured;
            }
        }

        status
    }

    fn ensure_attached(&self, node: &TestNode) -> Result<(), Error> {
        let mut current = node.clone();

        while let Some(parent) = current.parent() {
            current = parent;
        }

        if current.ptr_eq(&self.root) {
            Ok(())
        } else {
            Err(Error::DetachedNode)
        }
    }
}

impl Host for Sandbox {
    type Node = TestNode;

    fn create_element(&self, tag: &str) -> TestNode {
        TestNode::new(Rc::downgrade(&self.core), tag)
    }

    fn root(&self) -> TestNode {
        self.root.clone()
    }

    fn scrollbar_width(&self) -> f32 {
        self.core.native_scrollbar_width
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.core.mint());
        self.core.frames.borrow_mut().push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        self.core.frames.borrow_mut().retain(|(frame, _)| *frame != id);
    }

    fn set_timeout(&self, delay: Duration, callback: FrameCallback) -> TimerId {
        let id = TimerId(self.core.mint());
        self.core.timeouts.borrow_mut().push(Timeout {
            id,
            due: self.core.now.get() + delay,
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.core.timeouts.borrow_mut().retain(|timeout| timeout.id != id);
    }

    fn set_interval(&self, period: Duration, callback: IntervalCallback) -> TimerId {
        let id = TimerId(self.core.mint());
        self.core.intervals.borrow_mut().push(Interval {
            id,
            period,
            next: self.core.now.get() + period,
            callback,
        });
        id
    }

    fn clear_interval(&self, id: TimerId) {
        self.core
            .intervals
            .borrow_mut()
            .retain(|interval| interval.id != id);
        let _ = self.core.cancelled_intervals.borrow_mut().insert(id);
    }

    fn add_listener(&self, event: HostEvent, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.core.mint());
        self.core
            .listeners
            .borrow_mut()
            .push(HostListener { id, event, handler });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.core
            .listeners
            .borrow_mut()
            .retain(|listener| listener.id != id);
    }

    fn set_selection_enabled(&self, enabled: bool) {
        self.core.selection_enabled.set(enabled);
        self.root.apply_style(&if enabled {
            style::restore_select()
        } else {
            style::disable_select()
        });
    }
}

fn deliver(node: &TestNode, event: NodeEvent, pointer: PointerEvent) -> EventStatus {
    let handlers: Vec<EventHandler> = {
        let data = node.data.borrow();
        data.listeners
            .iter()
            .filter(|listener| listener.event == event)
            .map(|listener| Rc::clone(&listener.handler))
            .collect()
    };

    for handler in handlers {
        if handler(pointer) == EventStatus::Captured {
            return EventStatus::Captured;
        }
    }

    EventStatus::Ignored
}

struct NodeListener {
    id: ListenerId,
    event: NodeEvent,
    handler: EventHandler,
}

struct NodeData {
    core: Weak<Core>,
    tag: SmolStr,
    styles: StyleMap,
    listeners: Vec<NodeListener>,
    next_listener: u64,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<TestNode>,
    scroll: Point,
    content: Size,
    viewport: Size,
    border_box: Size,
    rect: Option<Rectangle>,
}

/// A DOM-like node living in a [`Sandbox`].
///
/// Geometry is assigned, not computed: tests give nodes explicit layout
/// rectangles and viewport/content sizes (see [`crate::layout`]), while
/// thumbs derive their rectangle from their track plus their own size and
/// translation styles, so drag math sees the styles the overlay wrote.
#[derive(Clone)]
pub struct TestNode {
    data: Rc<RefCell<NodeData>>,
}

impl PartialEq for TestNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl TestNode {
    fn new(core: Weak<Core>, tag: &str) -> Self {
        Self {
            data: Rc::new(RefCell::new(NodeData {
                core,
                tag: SmolStr::new(tag),
                styles: StyleMap::default(),
                listeners: Vec::new(),
                next_listener: 1,
                parent: Weak::new(),
                children: Vec::new(),
                scroll: Point::ORIGIN,
                content: Size::ZERO,
                viewport: Size::ZERO,
                border_box: Size::ZERO,
                rect: None,
            })),
        }
    }

    /// Returns whether two handles refer to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// The node's tag.
    pub fn tag(&self) -> SmolStr {
        self.data.borrow().tag.clone()
    }

    /// The current value of an inline style property, if set.
    pub fn style(&self, property: &str) -> Option<StyleValue> {
        self.data.borrow().styles.get(property).cloned()
    }

    /// The node's parent, if attached.
    pub fn parent(&self) -> Option<TestNode> {
        self.data
            .borrow()
            .parent
            .upgrade()
            .map(|data| TestNode { data })
    }

    /// The number of listeners registered on this node.
    pub fn listener_count(&self) -> usize {
        self.data.borrow().listeners.len()
    }

    /// Assigns the node's layout rectangle in window coordinates.
    pub fn set_layout_rect(&self, rect: Rectangle) {
        self.data.borrow_mut().rect = Some(rect);
    }

    /// Assigns the node's viewport (client) size.
    pub fn set_viewport_size(&self, size: Size) {
        self.data.borrow_mut().viewport = size;
    }

    /// Assigns the node's scrollable content size.
    pub fn set_content_size(&self, size: Size) {
        self.data.borrow_mut().content = size;
    }
}

impl Node for TestNode {
    fn scroll_offset(&self, axis: Axis) -> f32 {
        self.data.borrow().scroll.along(axis)
    }

    fn set_scroll_offset(&self, axis: Axis, offset: f32) {
        let changed = {
            let mut data = self.data.borrow_mut();
            let range = (data.content.along(axis) - data.viewport.along(axis)).max(0.0);
            let clamped = offset.clamp(0.0, range);
            let previous = data.scroll.along(axis);

            match axis {
                Axis::Horizontal => data.scroll.x = clamped,
                Axis::Vertical => data.scroll.y = clamped,
            }

            previous != clamped
        };

        if changed && let Some(core) = self.data.borrow().core.upgrade() {
            let mut queue = core.scroll_queue.borrow_mut();

            if !queue.iter().any(|queued| queued.ptr_eq(self)) {
                queue.push(self.clone());
            }
        }
    }

    fn scroll_size(&self, axis: Axis) -> f32 {
        self.data.borrow().content.along(axis)
    }

    fn client_size(&self, axis: Axis) -> f32 {
        self.data.borrow().viewport.along(axis)
    }

    fn offset_size(&self, axis: Axis) -> f32 {
        let data = self.data.borrow();

        if data.border_box == Size::ZERO {
            data.viewport.along(axis)
        } else {
            data.border_box.along(axis)
        }
    }

    fn inner_length(&self, axis: Axis) -> f32 {
        let viewport = self.data.borrow().viewport.along(axis);

        if viewport > 0.0 {
            viewport
        } else {
            self.bounding_rect().length(axis)
        }
    }

    fn bounding_rect(&self) -> Rectangle {
        let data = self.data.borrow();

        if let Some(rect) = data.rect {
            return rect;
        }

        let parent = data
            .parent
            .upgrade()
            .map(|data| TestNode { data }.bounding_rect())
            .unwrap_or_default();

        let mut rect = parent;

        for axis in Axis::BOTH {
            if let Some(StyleValue::Px(length)) = data.styles.get(axis.pick("width", "height")) {
                match axis {
                    Axis::Horizontal => rect.width = *length,
                    Axis::Vertical => rect.height = *length,
                }
            }

            if let Some(StyleValue::Translate(translated, offset)) = data.styles.get("transform")
                && *translated == axis
            {
                match axis {
                    Axis::Horizontal => rect.x = parent.x + offset,
                    Axis::Vertical => rect.y = parent.y + offset,
                }
            }
        }

        rect
    }

    fn apply_style(&self, patch: &StyleMap) {
        let mut data = self.data.borrow_mut();
        data.styles.extend(patch.clone());

        // Probe support: a fixed-size element with scrolling overflow gets a
        // border box of its styled size and loses the native scrollbar width
        // from its viewport.
        let scrolls = matches!(
            data.styles.get("overflow"),
            Some(StyleValue::Keyword(keyword)) if keyword.as_str() == "scroll"
        );

        if scrolls
            && let (Some(StyleValue::Px(width)), Some(StyleValue::Px(height))) =
                (data.styles.get("width").cloned(), data.styles.get("height").cloned())
            && let Some(core) = data.core.upgrade()
        {
            let native = core.native_scrollbar_width;
            data.border_box = Size::new(width, height);
            data.viewport = Size::new((width - native).max(0.0), (height - native).max(0.0));
        }
    }

    fn append_child(&self, child: &Self) {
        child.remove();

        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        self.data.borrow_mut().children.push(child.clone());
    }

    fn remove(&self) {
        let parent = self.data.borrow().parent.upgrade();

        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|child| !child.ptr_eq(self));
        }

        self.data.borrow_mut().parent = Weak::new();
    }

    fn add_listener(&self, event: NodeEvent, handler: EventHandler) -> ListenerId {
        let mut data = self.data.borrow_mut();
        let id = ListenerId(data.next_listener);
        data.next_listener += 1;
        data.listeners.push(NodeListener { id, event, handler });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.data
            .borrow_mut()
            .listeners
            .retain(|listener| listener.id != id);
    }
}
