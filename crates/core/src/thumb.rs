//! The geometry engine mapping between scroll offsets, track pixel space and
//! thumb pixel space.
//!
//! All functions are pure and total: degenerate inputs (zero-sized tracks,
//! non-overflowing content, empty viewports) yield `0.0` instead of `NaN` or
//! infinity.
use crate::{Axis, ScrollMetrics, Settings};

/// Thumb geometry along one axis, in track pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thumb {
    /// The length of the thumb along its track.
    pub length: f32,
    /// The offset of the thumb's leading edge from the track's leading edge.
    pub offset: f32,
}

impl Thumb {
    /// Computes the thumb geometry for one axis.
    pub fn compute(
        metrics: ScrollMetrics,
        axis: Axis,
        track_length: f32,
        settings: &Settings,
    ) -> Self {
        let length = thumb_length(metrics, axis, track_length, settings);

        Self {
            length,
            offset: thumb_offset(metrics, axis, track_length, length),
        }
    }
}

/// The length of the thumb along the given axis.
///
/// Proportional to the visible fraction of the content, rounded up, and never
/// smaller than [`Settings::thumb_min_size`] nor larger than the track. A
/// configured [`Settings::thumb_fixed_size`] replaces the proportional value.
/// 0 when the axis does not overflow, hiding the thumb.
pub fn thumb_length(
    metrics: ScrollMetrics,
    axis: Axis,
    track_length: f32,
    settings: &Settings,
) -> f32 {
    let scroll_size = metrics.scroll_size(axis);
    let client_size = metrics.client_size(axis);

    if track_length <= 0.0 || scroll_size <= 0.0 || scroll_size <= client_size {
        return 0.0;
    }

    let proportional = (client_size / scroll_size * track_length).ceil();

    if proportional >= track_length {
        return 0.0;
    }

    if let Some(fixed) = settings.thumb_fixed_size {
        return fixed.min(track_length);
    }

    proportional.max(settings.thumb_min_size).min(track_length)
}

/// The offset of the thumb's leading edge within its track.
pub fn thumb_offset(metrics: ScrollMetrics, axis: Axis, track_length: f32, thumb_length: f32) -> f32 {
    let range = metrics.max_scroll_offset(axis);
    let span = track_length - thumb_length;

    if range <= 0.0 || span <= 0.0 {
        return 0.0;
    }

    metrics.scroll_offset(axis) / range * span
}

/// The inverse mapping: the scroll offset corresponding to a pixel offset of
/// the thumb's leading edge within the track.
///
/// Used by drag and track-press handling; the result is unclamped, the
/// element's own offset write clamps.
pub fn scroll_offset_for(
    metrics: ScrollMetrics,
    axis: Axis,
    track_length: f32,
    thumb_length: f32,
    track_offset: f32,
) -> f32 {
    let span = track_length - thumb_length;

    if span <= 0.0 {
        return 0.0;
    }

    track_offset / span * metrics.max_scroll_offset(axis)
}
