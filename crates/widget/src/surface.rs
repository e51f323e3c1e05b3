//! The generated surfaces of an overlay and the pluggable factories that
//! produce them.
use crate::core::Axis;
use crate::host::{Host, Node};
use crate::style::StyleMap;

/// A factory producing one of the overlay's surfaces from its base style.
///
/// The geometry and gesture core does not depend on what the factory
/// produces beyond the [`Node`] contract, so embedders can swap in any
/// element kind or decoration.
pub type SurfaceFactory<H> = Box<dyn Fn(&H, StyleMap) -> <H as Host>::Node>;

fn div<H: Host>() -> SurfaceFactory<H> {
    Box::new(|host, style| {
        let node = host.create_element("div");
        node.apply_style(&style);
        node
    })
}

/// The factories for the five generated surfaces.
pub struct Renderers<H: Host> {
    /// Produces the natively scrolling view element.
    pub view: SurfaceFactory<H>,
    /// Produces the horizontal track.
    pub track_horizontal: SurfaceFactory<H>,
    /// Produces the vertical track.
    pub track_vertical: SurfaceFactory<H>,
    /// Produces the horizontal thumb.
    pub thumb_horizontal: SurfaceFactory<H>,
    /// Produces the vertical thumb.
    pub thumb_vertical: SurfaceFactory<H>,
}

impl<H: Host> Default for Renderers<H> {
    fn default() -> Self {
        Self {
            view: div(),
            track_horizontal: div(),
            track_vertical: div(),
            thumb_horizontal: div(),
            thumb_vertical: div(),
        }
    }
}

/// The mounted surfaces of an overlay.
pub struct Surfaces<H: Host> {
    /// The outer container.
    pub container: H::Node,
    /// The natively scrolling view.
    pub view: H::Node,
    /// The horizontal track.
    pub track_horizontal: H::Node,
    /// The vertical track.
    pub track_vertical: H::Node,
    /// The horizontal thumb.
    pub thumb_horizontal: H::Node,
    /// The vertical thumb.
    pub thumb_vertical: H::Node,
}

impl<H: Host> Surfaces<H> {
    /// The track of the given [`Axis`].
    pub fn track(&self, axis: Axis) -> &H::Node {
        axis.pick(&self.track_horizontal, &self.track_vertical)
    }

    /// The thumb of the given [`Axis`].
    pub fn thumb(&self, axis: Axis) -> &H::Node {
        axis.pick(&self.thumb_horizontal, &self.thumb_vertical)
    }
}

impl<H: Host> Clone for Surfaces<H> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            view: self.view.clone(),
            track_horizontal: self.track_horizontal.clone(),
            track_vertical: self.track_vertical.clone(),
            thumb_horizontal: self.thumb_horizontal.clone(),
            thumb_vertical: self.thumb_vertical.clone(),
        }
    }
}
