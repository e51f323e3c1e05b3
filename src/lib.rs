//! A cross-platform custom scrollbar overlay.
//!
//! `scrollbars` renders thumb/track surfaces on top of a natively scrolling
//! element and keeps them in sync with its scroll position: it measures the
//! environment's native scrollbar width, derives thumb geometry from content
//! and viewport dimensions, translates pointer drags and track presses into
//! scroll offsets, and manages transient visual state (auto-hide, scrolling
//! detection) through timers and animation-frame batching.
//!
//! The crate is split the usual way:
//! * [`core`] holds the pure geometry and configuration types;
//! * [`widget`] holds the stateful component and the [`Host`] seam to the
//!   embedding environment.
//!
//! # Example
//! ```no_run
//! use std::rc::Rc;
//!
//! use scrollbars::{Host, Scrollbars, Settings};
//!
//! fn embed<H: Host>(host: Rc<H>) {
//!     let parent = host.root();
//!
//!     let handle = Scrollbars::new(Settings::new().auto_hide(true))
//!         .on_scroll_frame(|metrics| println!("scrolled to {}", metrics.scroll_top))
//!         .mount(host, &parent);
//!
//!     handle.scroll_to_bottom();
//! }
//! ```
pub use scrollbars_core as core;
pub use scrollbars_widget as widget;

pub use crate::core::{
    AutoHeight, Axis, Pixels, Point, Rectangle, ScrollMetrics, Settings, Size, Thumb,
};
pub use crate::widget::{Handle, Host, Node, Scrollbars};
