//! The scrollbar overlay component of `scrollbars`.
//!
//! A [`Scrollbars`] value describes an overlay — callbacks, surface
//! factories, and [`Settings`](core::Settings) — and [`Scrollbars::mount`]
//! turns it into a live [`Handle`] bound to a [`Host`]. The host is the seam
//! to the embedding environment: anything that can create DOM-like nodes,
//! schedule frame callbacks and timers, and report pointer events can drive
//! the overlay.
pub use scrollbars_core as core;

pub mod gesture;
pub mod host;
pub mod probe;
pub mod scheduler;
pub mod style;
pub mod surface;

mod interaction;
mod scrollbars;

pub use host::{
    EventHandler, EventStatus, FrameCallback, FrameId, Host, HostEvent, IntervalCallback,
    ListenerId, Node, NodeEvent, PointerEvent, TimerId,
};
pub use scheduler::FrameScheduler;
pub use scrollbars::{Handle, Scrollbars};
pub use style::{StyleMap, StyleValue};
pub use surface::{Renderers, SurfaceFactory, Surfaces};
