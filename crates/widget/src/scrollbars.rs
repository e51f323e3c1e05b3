//! The overlay component: configuration, mounting, and the mounted handle.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::core::{Axis, Point, ScrollMetrics, Settings, Thumb, thumb};
use crate::gesture::GestureSession;
use crate::host::{
    EventHandler, EventStatus, Host, HostEvent, ListenerId, Node, NodeEvent, PointerEvent, TimerId,
};
use crate::interaction::Interaction;
use crate::scheduler::FrameScheduler;
use crate::style::{self, StyleMap};
use crate::surface::{Renderers, SurfaceFactory, Surfaces};

type UpdateCallback = Box<dyn FnOnce(ScrollMetrics)>;

#[derive(Default)]
struct Callbacks {
    on_scroll: Option<Box<dyn Fn()>>,
    on_scroll_frame: Option<Box<dyn Fn(ScrollMetrics)>>,
    on_scroll_start: Option<Box<dyn Fn()>>,
    on_scroll_stop: Option<Box<dyn Fn()>>,
    on_update: Option<Box<dyn Fn(ScrollMetrics)>>,
}

/// A configured, not yet mounted scrollbar overlay.
///
/// # Example
/// ```no_run
/// use std::rc::Rc;
///
/// use scrollbars_widget::core::Settings;
/// use scrollbars_widget::{Host, Scrollbars};
///
/// fn embed<H: Host>(host: Rc<H>) {
///     let parent = host.root();
///
///     let handle = Scrollbars::new(Settings::new().auto_hide(true))
///         .on_scroll_stop(|| println!("done scrolling"))
///         .mount(host, &parent);
///
///     handle.set_scroll_top(120.0);
/// }
/// ```
pub struct Scrollbars<H: Host> {
    settings: Settings,
    renderers: Renderers<H>,
    callbacks: Callbacks,
    tag_name: SmolStr,
    container_style: StyleMap,
}

impl<H: Host> Scrollbars<H> {
    /// Creates a new overlay with the given [`Settings`].
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            renderers: Renderers::default(),
            callbacks: Callbacks::default(),
            tag_name: SmolStr::new("div"),
            container_style: StyleMap::default(),
        }
    }

    /// Sets a callback fired on every native scroll event, before the frame
    /// pass runs.
    pub fn on_scroll(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_scroll = Some(Box::new(f));
        self
    }

    /// Sets a callback fired once per frame pass triggered by scrolling,
    /// with the fresh [`ScrollMetrics`].
    pub fn on_scroll_frame(mut self, f: impl Fn(ScrollMetrics) + 'static) -> Self {
        self.callbacks.on_scroll_frame = Some(Box::new(f));
        self
    }

    /// Sets a callback fired when the view transitions from idle to
    /// scrolling.
    pub fn on_scroll_start(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_scroll_start = Some(Box::new(f));
        self
    }

    /// Sets a callback fired when scrolling is detected to have stopped.
    pub fn on_scroll_stop(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_scroll_stop = Some(Box::new(f));
        self
    }

    /// Sets a callback fired after every update pass, with the fresh
    /// [`ScrollMetrics`].
    pub fn on_update(mut self, f: impl Fn(ScrollMetrics) + 'static) -> Self {
        self.callbacks.on_update = Some(Box::new(f));
        self
    }

    /// Sets the tag of the container element.
    pub fn tag_name(mut self, tag: impl Into<SmolStr>) -> Self {
        self.tag_name = tag.into();
        self
    }

    /// Patches the container style on top of the defaults.
    #[must_use]
    pub fn style(mut self, patch: StyleMap) -> Self {
        self.container_style = patch;
        self
    }

    /// Replaces the factory for the view element.
    pub fn render_view(mut self, f: impl Fn(&H, StyleMap) -> H::Node + 'static) -> Self {
        self.renderers.view = Box::new(f);
        self
    }

    /// Replaces the factory for the horizontal track.
    pub fn render_track_horizontal(mut self, f: impl Fn(&H, StyleMap) -> H::Node + 'static) -> Self {
        self.renderers.track_horizontal = Box::new(f);
        self
    }

    /// Replaces the factory for the vertical track.
    pub fn render_track_vertical(mut self, f: impl Fn(&H, StyleMap) -> H::Node + 'static) -> Self {
        self.renderers.track_vertical = Box::new(f);
        self
    }

    /// Replaces the factory for the horizontal thumb.
    pub fn render_thumb_horizontal(mut self, f: impl Fn(&H, StyleMap) -> H::Node + 'static) -> Self {
        self.renderers.thumb_horizontal = Box::new(f);
        self
    }

    /// Replaces the factory for the vertical thumb.
    pub fn render_thumb_vertical(mut self, f: impl Fn(&H, StyleMap) -> H::Node + 'static) -> Self {
        self.renderers.thumb_vertical = Box::new(f);
        self
    }

    /// Mounts the overlay under `parent`, attaching all listeners and
    /// scheduling the first update pass.
    pub fn mount(self, host: Rc<H>, parent: &H::Node) -> Handle<H> {
        let scrollbar_width = host.scrollbar_width();
        let universal_pending = self.settings.universal;

        let render = |factory: &SurfaceFactory<H>, style: StyleMap| factory(host.as_ref(), style);

        let container = host.create_element(self.tag_name.as_str());
        let mut container_style = style::container(&self.settings);
        container_style.extend(self.container_style.clone());
        container.apply_style(&container_style);

        let surfaces: Surfaces<H> = Surfaces {
            view: render(
                &self.renderers.view,
                style::view(&self.settings, scrollbar_width, universal_pending),
            ),
            track_horizontal: render(
                &self.renderers.track_horizontal,
                style::track(
                    Axis::Horizontal,
                    &self.settings,
                    scrollbar_width,
                    universal_pending,
                ),
            ),
            track_vertical: render(
                &self.renderers.track_vertical,
                style::track(
                    Axis::Vertical,
                    &self.settings,
                    scrollbar_width,
                    universal_pending,
                ),
            ),
            thumb_horizontal: render(
                &self.renderers.thumb_horizontal,
                style::thumb(Axis::Horizontal),
            ),
            thumb_vertical: render(&self.renderers.thumb_vertical, style::thumb(Axis::Vertical)),
            container,
        };

        surfaces.container.append_child(&surfaces.view);
        surfaces
            .track_horizontal
            .append_child(&surfaces.thumb_horizontal);
        surfaces
            .track_vertical
            .append_child(&surfaces.thumb_vertical);
        surfaces.container.append_child(&surfaces.track_horizontal);
        surfaces.container.append_child(&surfaces.track_vertical);
        parent.append_child(&surfaces.container);

        let component = Rc::new(Component {
            host,
            settings: self.settings,
            callbacks: self.callbacks,
            state: RefCell::new(State {
                surfaces: Some(surfaces),
                node_listeners: Vec::new(),
                host_listeners: Vec::new(),
                frame: FrameScheduler::new(),
                interaction: Interaction::default(),
                gesture: None,
                hide_tracks_timer: None,
                detect_interval: None,
                universal_pending,
            }),
        });

        attach_listeners(&component);
        schedule_update(&component, None);

        log::debug!("scrollbar overlay mounted");

        Handle { component }
    }
}

struct State<H: Host> {
    surfaces: Option<Surfaces<H>>,
    node_listeners: Vec<(H::Node, ListenerId)>,
    host_listeners: Vec<ListenerId>,
    frame: FrameScheduler,
    interaction: Interaction,
    gesture: Option<GestureSession<H>>,
    hide_tracks_timer: Option<TimerId>,
    detect_interval: Option<TimerId>,
    universal_pending: bool,
}

struct Component<H: Host> {
    host: Rc<H>,
    settings: Settings,
    callbacks: Callbacks,
    state: RefCell<State<H>>,
}

impl<H: Host> Component<H> {
    fn surfaces(&self) -> Option<Surfaces<H>> {
        self.state.borrow().surfaces.clone()
    }

    fn teardown(&self) {
        let mut state = self.state.borrow_mut();

        for (node, id) in state.node_listeners.drain(..) {
            node.remove_listener(id);
        }

        for id in state.host_listeners.drain(..) {
            self.host.remove_listener(id);
        }

        state.frame.cancel(self.host.as_ref());

        if let Some(id) = state.hide_tracks_timer.take() {
            self.host.clear_timeout(id);
        }

        if let Some(id) = state.detect_interval.take() {
            self.host.clear_interval(id);
        }

        state.gesture = None;
        state.interaction = Interaction::default();

        if let Some(surfaces) = state.surfaces.take() {
            surfaces.container.remove();
        }
    }
}

impl<H: Host> Drop for Component<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// A mounted overlay: imperative scroll operations, geometry queries, and
/// access to the generated surfaces.
///
/// Cloning shares the same mounted instance. Every operation is a no-op (or
/// returns 0) once the overlay is unmounted.
pub struct Handle<H: Host> {
    component: Rc<Component<H>>,
}

impl<H: Host> Clone for Handle<H> {
    fn clone(&self) -> Self {
        Self {
            component: Rc::clone(&self.component),
        }
    }
}

impl<H: Host> Handle<H> {
    /// The horizontal scroll offset, or 0 when unmounted.
    pub fn scroll_left(&self) -> f32 {
        self.metrics().scroll_left
    }

    /// The vertical scroll offset, or 0 when unmounted.
    pub fn scroll_top(&self) -> f32 {
        self.metrics().scroll_top
    }

    /// The total content width, or 0 when unmounted.
    pub fn scroll_width(&self) -> f32 {
        self.metrics().scroll_width
    }

    /// The total content height, or 0 when unmounted.
    pub fn scroll_height(&self) -> f32 {
        self.metrics().scroll_height
    }

    /// The viewport width, or 0 when unmounted.
    pub fn client_width(&self) -> f32 {
        self.metrics().client_width
    }

    /// The viewport height, or 0 when unmounted.
    pub fn client_height(&self) -> f32 {
        self.metrics().client_height
    }

    /// A full [`ScrollMetrics`] snapshot; all zeros when unmounted.
    pub fn metrics(&self) -> ScrollMetrics {
        self.component
            .surfaces()
            .map(|surfaces| surfaces.view.metrics())
            .unwrap_or_default()
    }

    /// Writes the horizontal scroll offset.
    pub fn set_scroll_left(&self, offset: f32) {
        self.set_scroll_offset(Axis::Horizontal, offset);
    }

    /// Writes the vertical scroll offset.
    pub fn set_scroll_top(&self, offset: f32) {
        self.set_scroll_offset(Axis::Vertical, offset);
    }

    /// Scrolls to the left edge.
    pub fn scroll_to_left(&self) {
        self.set_scroll_offset(Axis::Horizontal, 0.0);
    }

    /// Scrolls to the top edge.
    pub fn scroll_to_top(&self) {
        self.set_scroll_offset(Axis::Vertical, 0.0);
    }

    /// Scrolls to the right edge.
    pub fn scroll_to_right(&self) {
        if let Some(surfaces) = self.component.surfaces() {
            let width = surfaces.view.scroll_size(Axis::Horizontal);
            surfaces.view.set_scroll_offset(Axis::Horizontal, width);
        }
    }

    /// Scrolls to the bottom edge.
    pub fn scroll_to_bottom(&self) {
        if let Some(surfaces) = self.component.surfaces() {
            let height = surfaces.view.scroll_size(Axis::Vertical);
            surfaces.view.set_scroll_offset(Axis::Vertical, height);
        }
    }

    fn set_scroll_offset(&self, axis: Axis, offset: f32) {
        if let Some(surfaces) = self.component.surfaces() {
            surfaces.view.set_scroll_offset(axis, offset);
        }
    }

    /// Schedules an update pass on the next frame.
    ///
    /// Call after the content size may have changed without a scroll event;
    /// the pass runs unconditionally and re-derives all thumb geometry.
    pub fn update(&self) {
        schedule_update(&self.component, None);
    }

    /// Like [`update`](Self::update), additionally invoking `callback` with
    /// the fresh [`ScrollMetrics`] at the end of the pass.
    pub fn update_with(&self, callback: impl FnOnce(ScrollMetrics) + 'static) {
        schedule_update(&self.component, Some(Box::new(callback)));
    }

    /// The container element, while mounted.
    pub fn container(&self) -> Option<H::Node> {
        self.component
            .surfaces()
            .map(|surfaces| surfaces.container.clone())
    }

    /// The natively scrolling view element, while mounted.
    pub fn view(&self) -> Option<H::Node> {
        self.component
            .surfaces()
            .map(|surfaces| surfaces.view.clone())
    }

    /// The track of the given [`Axis`], while mounted.
    pub fn track(&self, axis: Axis) -> Option<H::Node> {
        self.component
            .surfaces()
            .map(|surfaces| surfaces.track(axis).clone())
    }

    /// The thumb of the given [`Axis`], while mounted.
    pub fn thumb(&self, axis: Axis) -> Option<H::Node> {
        self.component
            .surfaces()
            .map(|surfaces| surfaces.thumb(axis).clone())
    }

    /// Returns whether the overlay is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.component.state.borrow().surfaces.is_some()
    }

    /// Unmounts the overlay: detaches every listener, cancels the pending
    /// frame request, hide timer and scroll poll, ends any live drag, and
    /// removes the container from its parent.
    pub fn unmount(&self) {
        self.component.teardown();
        log::debug!("scrollbar overlay unmounted");
    }
}

fn on<H: Host>(
    component: &Rc<Component<H>>,
    f: impl Fn(&Rc<Component<H>>, PointerEvent) -> EventStatus + 'static,
) -> EventHandler {
    let weak = Rc::downgrade(component);

    Rc::new(move |event| match weak.upgrade() {
        Some(component) => f(&component, event),
        None => EventStatus::Ignored,
    })
}

fn attach_listeners<H: Host>(component: &Rc<Component<H>>) {
    let Some(surfaces) = component.surfaces() else {
        return;
    };

    let mut node_listeners = Vec::new();
    let mut host_listeners = Vec::new();

    let scroll = surfaces.view.add_listener(
        NodeEvent::Scroll,
        on(component, |component, _event| {
            handle_scroll(component);
            EventStatus::Ignored
        }),
    );
    node_listeners.push((surfaces.view.clone(), scroll));

    // Overlay-style native scrollbars leave no thumb surface to interact
    // with; only the scroll listener is attached then.
    if component.host.scrollbar_width() > 0.0 {
        for axis in Axis::BOTH {
            let track = surfaces.track(axis).clone();

            let enter = track.add_listener(
                NodeEvent::PointerEnter,
                on(component, |component, _event| handle_track_enter(component)),
            );
            let leave = track.add_listener(
                NodeEvent::PointerLeave,
                on(component, |component, _event| handle_track_leave(component)),
            );
            let press = track.add_listener(
                NodeEvent::PointerDown,
                on(component, move |component, event| {
                    handle_track_press(component, axis, event)
                }),
            );

            node_listeners.push((track.clone(), enter));
            node_listeners.push((track.clone(), leave));
            node_listeners.push((track, press));

            let thumb = surfaces.thumb(axis).clone();
            let grab = thumb.add_listener(
                NodeEvent::PointerDown,
                on(component, move |component, event| {
                    handle_thumb_press(component, axis, event)
                }),
            );
            node_listeners.push((thumb, grab));
        }

        host_listeners.push(component.host.add_listener(
            HostEvent::Resize,
            on(component, |component, _event| {
                schedule_update(component, None);
                EventStatus::Ignored
            }),
        ));
    }

    let mut state = component.state.borrow_mut();
    state.node_listeners = node_listeners;
    state.host_listeners = host_listeners;
}

fn schedule_update<H: Host>(component: &Rc<Component<H>>, callback: Option<UpdateCallback>) {
    let weak = Rc::downgrade(component);

    let frame = Box::new(move || {
        if let Some(component) = weak.upgrade() {
            component.state.borrow_mut().frame.acknowledge();
            update_pass(&component, callback);
        }
    });

    let mut state = component.state.borrow_mut();
    state.frame.schedule(component.host.as_ref(), frame);
}

fn update_pass<H: Host>(component: &Rc<Component<H>>, callback: Option<UpdateCallback>) {
    let metrics = {
        let mut state = component.state.borrow_mut();

        let Some(surfaces) = state.surfaces.clone() else {
            return;
        };

        let scrollbar_width = component.host.scrollbar_width();

        if state.universal_pending {
            state.universal_pending = false;
            surfaces
                .view
                .apply_style(&style::view(&component.settings, scrollbar_width, false));

            for axis in Axis::BOTH {
                surfaces.track(axis).apply_style(&style::track(
                    axis,
                    &component.settings,
                    scrollbar_width,
                    false,
                ));
            }

            log::debug!("universal mount pass complete");
        }

        let metrics = surfaces.view.metrics();

        if scrollbar_width > 0.0 {
            for axis in Axis::BOTH {
                let track = surfaces.track(axis);
                let track_length = track.inner_length(axis);
                let thumb = Thumb::compute(metrics, axis, track_length, &component.settings);

                surfaces
                    .thumb(axis)
                    .apply_style(&style::thumb_update(axis, thumb));

                if component.settings.hide_tracks_when_not_needed {
                    track.apply_style(&style::visibility(metrics.overflows(axis)));
                }
            }
        }

        metrics
    };

    if let Some(on_update) = &component.callbacks.on_update {
        on_update(metrics);
    }

    if let Some(callback) = callback {
        callback(metrics);
    }
}

fn handle_scroll<H: Host>(component: &Rc<Component<H>>) {
    if let Some(on_scroll) = &component.callbacks.on_scroll {
        on_scroll();
    }

    let weak = Rc::downgrade(component);
    schedule_update(
        component,
        Some(Box::new(move |metrics: ScrollMetrics| {
            if let Some(component) = weak.upgrade() {
                {
                    let mut state = component.state.borrow_mut();
                    state.interaction.view_scroll =
                        Point::new(metrics.scroll_left, metrics.scroll_top);
                }

                if let Some(on_scroll_frame) = &component.callbacks.on_scroll_frame {
                    on_scroll_frame(metrics);
                }
            }
        })),
    );

    detect_scrolling(component);
}

fn detect_scrolling<H: Host>(component: &Rc<Component<H>>) {
    {
        let mut state = component.state.borrow_mut();

        if state.interaction.scrolling {
            return;
        }

        state.interaction.scrolling = true;
    }

    log::trace!("scrolling started");

    if let Some(on_scroll_start) = &component.callbacks.on_scroll_start {
        on_scroll_start();
    }

    if component.settings.auto_hide {
        show_tracks(component);
    }

    let weak = Rc::downgrade(component);
    let tick = Box::new(move || {
        let Some(component) = weak.upgrade() else {
            return;
        };

        let stopped = {
            let mut state = component.state.borrow_mut();
            let stopped = state.interaction.last_view_scroll == state.interaction.view_scroll;

            if stopped {
                if let Some(id) = state.detect_interval.take() {
                    component.host.clear_interval(id);
                }

                state.interaction.scrolling = false;
            }

            state.interaction.last_view_scroll = state.interaction.view_scroll;
            stopped
        };

        if stopped {
            log::trace!("scrolling stopped");

            if let Some(on_scroll_stop) = &component.callbacks.on_scroll_stop {
                on_scroll_stop();
            }

            if component.settings.auto_hide {
                hide_tracks(&component);
            }
        }
    });

    let id = component
        .host
        .set_interval(component.settings.scroll_stop_poll_interval, tick);

    let mut state = component.state.borrow_mut();
    state.detect_interval = Some(id);
}

fn show_tracks<H: Host>(component: &Rc<Component<H>>) {
    let mut state = component.state.borrow_mut();

    if let Some(id) = state.hide_tracks_timer.take() {
        component.host.clear_timeout(id);
    }

    if let Some(surfaces) = &state.surfaces {
        surfaces.track_horizontal.apply_style(&style::opacity(1.0));
        surfaces.track_vertical.apply_style(&style::opacity(1.0));
    }
}

fn hide_tracks<H: Host>(component: &Rc<Component<H>>) {
    let mut state = component.state.borrow_mut();

    if !state.interaction.may_hide_tracks() {
        return;
    }

    if let Some(id) = state.hide_tracks_timer.take() {
        component.host.clear_timeout(id);
    }

    let weak = Rc::downgrade(component);
    let id = component.host.set_timeout(
        component.settings.auto_hide_timeout,
        Box::new(move || {
            let Some(component) = weak.upgrade() else {
                return;
            };

            let surfaces = {
                let mut state = component.state.borrow_mut();
                state.hide_tracks_timer = None;
                state.surfaces.clone()
            };

            if let Some(surfaces) = surfaces {
                surfaces.track_horizontal.apply_style(&style::opacity(0.0));
                surfaces.track_vertical.apply_style(&style::opacity(0.0));
            }
        }),
    );

    state.hide_tracks_timer = Some(id);
}

fn handle_track_enter<H: Host>(component: &Rc<Component<H>>) -> EventStatus {
    component.state.borrow_mut().interaction.track_hovered = true;

    if component.settings.auto_hide {
        show_tracks(component);
    }

    EventStatus::Ignored
}

fn handle_track_leave<H: Host>(component: &Rc<Component<H>>) -> EventStatus {
    component.state.borrow_mut().interaction.track_hovered = false;

    if component.settings.auto_hide {
        hide_tracks(component);
    }

    EventStatus::Ignored
}

fn handle_track_press<H: Host>(
    component: &Rc<Component<H>>,
    axis: Axis,
    event: PointerEvent,
) -> EventStatus {
    let Some(surfaces) = component.surfaces() else {
        return EventStatus::Ignored;
    };

    let track = surfaces.track(axis);
    let rect = track.bounding_rect();
    let metrics = surfaces.view.metrics();
    let track_length = track.inner_length(axis);
    let thumb_length = thumb::thumb_length(metrics, axis, track_length, &component.settings);

    // Centre the thumb under the press point.
    let offset = (rect.start(axis) - event.position.along(axis)).abs() - thumb_length / 2.0;

    surfaces.view.set_scroll_offset(
        axis,
        thumb::scroll_offset_for(metrics, axis, track_length, thumb_length, offset),
    );

    EventStatus::Captured
}

fn handle_thumb_press<H: Host>(
    component: &Rc<Component<H>>,
    axis: Axis,
    event: PointerEvent,
) -> EventStatus {
    let Some(surfaces) = component.surfaces() else {
        return EventStatus::Ignored;
    };

    let rect = surfaces.thumb(axis).bounding_rect();
    let origin = rect.length(axis) - (event.position.along(axis) - rect.start(axis));

    let on_move = on(component, |component, event| {
        handle_drag_move(component, event)
    });
    let on_up = on(component, |component, _event| handle_drag_end(component));

    {
        let mut state = component.state.borrow_mut();
        state.interaction.dragging = true;
        state.interaction.set_drag_origin(axis, origin);

        if state.gesture.is_none() {
            state.gesture = Some(GestureSession::begin(
                Rc::clone(&component.host),
                on_move,
                on_up,
            ));
        }
    }

    log::trace!("thumb drag started on {axis:?}");

    if component.settings.auto_hide {
        show_tracks(component);
    }

    EventStatus::Captured
}

fn handle_drag_move<H: Host>(component: &Rc<Component<H>>, event: PointerEvent) -> EventStatus {
    let Some(surfaces) = component.surfaces() else {
        return EventStatus::Ignored;
    };

    let origins = {
        let state = component.state.borrow();
        (
            state.interaction.drag_origin_x,
            state.interaction.drag_origin_y,
        )
    };

    for axis in Axis::BOTH {
        let Some(origin) = axis.pick(origins.0, origins.1) else {
            continue;
        };

        let track = surfaces.track(axis);
        let rect = track.bounding_rect();
        let metrics = surfaces.view.metrics();
        let track_length = track.inner_length(axis);
        let thumb_length = thumb::thumb_length(metrics, axis, track_length, &component.settings);

        let offset = event.position.along(axis) - rect.start(axis) - (thumb_length - origin);

        surfaces.view.set_scroll_offset(
            axis,
            thumb::scroll_offset_for(metrics, axis, track_length, thumb_length, offset),
        );
    }

    EventStatus::Captured
}

fn handle_drag_end<H: Host>(component: &Rc<Component<H>>) -> EventStatus {
    {
        let mut state = component.state.borrow_mut();
        state.interaction.clear_drag();
        state.gesture = None;
    }

    log::trace!("thumb drag ended");

    if component.settings.auto_hide {
        hide_tracks(component);
    }

    EventStatus::Captured
}
