//! Measurement of the native scrollbar width.
use crate::core::Axis;
use crate::host::{Host, Node};
use crate::style;

/// Measures the thickness of the environment's native scrollbars.
///
/// Attaches a fixed-size offscreen element with overflow enabled to the host
/// root and compares its border-box width against its scrollable content
/// width. Hosts memoize the result behind [`Host::scrollbar_width`]; a width
/// of 0 indicates overlay-style native scrollbars.
pub fn measure<H: Host>(host: &H) -> f32 {
    let probe = host.create_element("div");
    probe.apply_style(&style::probe());

    host.root().append_child(&probe);
    let width = probe.offset_size(Axis::Horizontal) - probe.client_size(Axis::Horizontal);
    probe.remove();

    width.max(0.0)
}
