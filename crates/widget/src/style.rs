//! The inline style model and the default style tables of the overlay
//! surfaces.
use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};

use crate::core::{Axis, Settings, Thumb};

/// A single inline style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A length in pixels.
    Px(f32),
    /// A percentage of the parent dimension.
    Percent(f32),
    /// A unitless number.
    Number(f32),
    /// A translation along one axis, in pixels.
    Translate(Axis, f32),
    /// A keyword or any other raw value.
    Keyword(SmolStr),
}

/// An inline style patch, applied property by property. Later patches
/// overwrite earlier values of the same property.
pub type StyleMap = FxHashMap<SmolStr, StyleValue>;

fn keyword(value: &str) -> StyleValue {
    StyleValue::Keyword(SmolStr::new(value))
}

fn table<const N: usize>(entries: [(&str, StyleValue); N]) -> StyleMap {
    entries
        .into_iter()
        .map(|(property, value)| (SmolStr::new(property), value))
        .collect()
}

/// The container style: the positioning context clipping the overlay.
pub fn container(settings: &Settings) -> StyleMap {
    let mut style = table([
        ("position", keyword("relative")),
        ("overflow", keyword("hidden")),
        ("width", StyleValue::Percent(100.0)),
        ("height", StyleValue::Percent(100.0)),
    ]);

    if let Some(bounds) = settings.auto_height {
        style.extend(table([
            ("height", keyword("auto")),
            ("min-height", StyleValue::Px(bounds.min)),
            ("max-height", StyleValue::Px(bounds.max)),
        ]));
    }

    style
}

/// The view style: the natively scrolling element.
///
/// The native scrollbars are pushed out of the visible box with negative
/// margins of exactly their own thickness. While a universal mount is
/// pending, the view keeps an environment-independent shape instead: hidden
/// overflow and no margin compensation.
pub fn view(settings: &Settings, scrollbar_width: f32, universal_pending: bool) -> StyleMap {
    let margin = if scrollbar_width > 0.0 {
        -scrollbar_width
    } else {
        0.0
    };

    let mut style = table([
        ("position", keyword("absolute")),
        ("top", StyleValue::Px(0.0)),
        ("left", StyleValue::Px(0.0)),
        ("right", StyleValue::Px(0.0)),
        ("bottom", StyleValue::Px(0.0)),
        ("overflow", keyword("scroll")),
        ("margin-right", StyleValue::Px(margin)),
        ("margin-bottom", StyleValue::Px(margin)),
    ]);

    if let Some(bounds) = settings.auto_height {
        let compensation = if universal_pending {
            0.0
        } else {
            scrollbar_width
        };

        style.extend(table([
            ("position", keyword("relative")),
            ("top", keyword("auto")),
            ("left", keyword("auto")),
            ("right", keyword("auto")),
            ("bottom", keyword("auto")),
            ("min-height", StyleValue::Px(bounds.min + compensation)),
            ("max-height", StyleValue::Px(bounds.max + compensation)),
        ]));
    }

    if universal_pending {
        style.extend(table([
            ("overflow", keyword("hidden")),
            ("margin-right", StyleValue::Px(0.0)),
            ("margin-bottom", StyleValue::Px(0.0)),
        ]));
    }

    style
}

/// The default track style for the given [`Axis`]: a 6px rail inset 2px from
/// the container edges.
pub fn track(
    axis: Axis,
    settings: &Settings,
    scrollbar_width: f32,
    universal_pending: bool,
) -> StyleMap {
    let mut style = table([
        ("position", keyword("absolute")),
        ("border-radius", StyleValue::Px(3.0)),
        ("right", StyleValue::Px(2.0)),
        ("bottom", StyleValue::Px(2.0)),
    ]);

    match axis {
        Axis::Horizontal => style.extend(table([
            ("height", StyleValue::Px(6.0)),
            ("left", StyleValue::Px(2.0)),
        ])),
        Axis::Vertical => style.extend(table([
            ("width", StyleValue::Px(6.0)),
            ("top", StyleValue::Px(2.0)),
        ])),
    }

    if settings.auto_hide {
        style.extend(table([
            (
                "transition",
                StyleValue::Keyword(format_smolstr!(
                    "opacity {}ms",
                    settings.auto_hide_duration.as_millis()
                )),
            ),
            ("opacity", StyleValue::Number(0.0)),
        ]));
    }

    if scrollbar_width <= 0.0 || universal_pending {
        style.extend(table([("display", keyword("none"))]));
    } else {
        // Patches merge, so a universal flip must reset the initial `none`.
        style.extend(table([("display", keyword(""))]));
    }

    style
}

/// The default thumb style for the given [`Axis`].
pub fn thumb(axis: Axis) -> StyleMap {
    let mut style = table([
        ("position", keyword("relative")),
        ("display", keyword("block")),
        ("cursor", keyword("pointer")),
        ("border-radius", keyword("inherit")),
        ("background-color", keyword("rgba(0, 0, 0, 0.2)")),
    ]);

    style.extend(table([(
        axis.pick("height", "width"),
        StyleValue::Percent(100.0),
    )]));

    style
}

/// The per-frame thumb patch: its length along the track and its translation
/// within it.
pub fn thumb_update(axis: Axis, thumb: Thumb) -> StyleMap {
    table([
        (axis.pick("width", "height"), StyleValue::Px(thumb.length)),
        ("transform", StyleValue::Translate(axis, thumb.offset)),
    ])
}

/// The offscreen probe style used to measure the native scrollbar width.
pub fn probe() -> StyleMap {
    table([
        ("width", StyleValue::Px(100.0)),
        ("height", StyleValue::Px(100.0)),
        ("position", keyword("absolute")),
        ("top", StyleValue::Px(-9999.0)),
        ("overflow", keyword("scroll")),
    ])
}

/// An opacity patch, used to show and hide tracks.
pub fn opacity(value: f32) -> StyleMap {
    table([("opacity", StyleValue::Number(value))])
}

/// A visibility patch, used by `hide_tracks_when_not_needed`.
pub fn visibility(visible: bool) -> StyleMap {
    table([(
        "visibility",
        keyword(if visible { "visible" } else { "hidden" }),
    )])
}

/// The body patch that disables text selection during a drag.
pub fn disable_select() -> StyleMap {
    table([("user-select", keyword("none"))])
}

/// The body patch that restores text selection after a drag.
pub fn restore_select() -> StyleMap {
    table([("user-select", keyword(""))])
}
