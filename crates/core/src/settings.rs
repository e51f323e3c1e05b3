use crate::Pixels;
use crate::time::Duration;

/// Configuration of a scrollbar overlay, immutable once mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Whether tracks fade out after inactivity and reappear on interaction.
    pub auto_hide: bool,
    /// How long after the last interaction tracks stay visible.
    pub auto_hide_timeout: Duration,
    /// How long the opacity fade takes.
    pub auto_hide_duration: Duration,
    /// A fixed thumb length overriding the proportional computation.
    pub thumb_fixed_size: Option<f32>,
    /// The smallest length a proportional thumb may shrink to.
    pub thumb_min_size: f32,
    /// Whether tracks of non-overflowing axes are made invisible.
    pub hide_tracks_when_not_needed: bool,
    /// Bounds for automatic container height, if enabled.
    pub auto_height: Option<AutoHeight>,
    /// Whether to start from environment-independent styling and only switch
    /// to full interactive styling after the first mount pass.
    pub universal: bool,
    /// How often the scroll position is polled to detect that scrolling has
    /// stopped.
    pub scroll_stop_poll_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_hide: false,
            auto_hide_timeout: Duration::from_millis(1000),
            auto_hide_duration: Duration::from_millis(200),
            thumb_fixed_size: None,
            thumb_min_size: 30.0,
            hide_tracks_when_not_needed: false,
            auto_height: None,
            universal: false,
            scroll_stop_poll_interval: Duration::from_millis(100),
        }
    }
}

impl Settings {
    /// Creates a new [`Settings`] with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether tracks auto-hide after inactivity.
    pub fn auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    /// Sets how long tracks stay visible after the last interaction.
    pub fn auto_hide_timeout(mut self, timeout: Duration) -> Self {
        self.auto_hide_timeout = timeout;
        self
    }

    /// Sets how long the opacity fade takes.
    pub fn auto_hide_duration(mut self, duration: Duration) -> Self {
        self.auto_hide_duration = duration;
        self
    }

    /// Fixes the thumb length, overriding the proportional computation.
    pub fn thumb_fixed_size(mut self, size: impl Into<Pixels>) -> Self {
        self.thumb_fixed_size = Some(size.into().0);
        self
    }

    /// Sets the smallest length a proportional thumb may shrink to.
    pub fn thumb_min_size(mut self, size: impl Into<Pixels>) -> Self {
        self.thumb_min_size = size.into().0;
        self
    }

    /// Sets whether tracks of non-overflowing axes are made invisible.
    pub fn hide_tracks_when_not_needed(mut self, hide: bool) -> Self {
        self.hide_tracks_when_not_needed = hide;
        self
    }

    /// Enables automatic container height within the given bounds.
    pub fn auto_height(mut self, bounds: AutoHeight) -> Self {
        self.auto_height = Some(bounds);
        self
    }

    /// Sets whether to defer environment-dependent styling to the first
    /// mount pass.
    pub fn universal(mut self, universal: bool) -> Self {
        self.universal = universal;
        self
    }

    /// Sets the scroll-stop polling interval.
    pub fn scroll_stop_poll_interval(mut self, interval: Duration) -> Self {
        self.scroll_stop_poll_interval = interval;
        self
    }
}

/// Bounds for automatic container height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoHeight {
    /// The smallest height the container may take.
    pub min: f32,
    /// The largest height the container may take.
    pub max: f32,
}

impl AutoHeight {
    /// Creates new [`AutoHeight`] bounds.
    pub fn new(min: impl Into<Pixels>, max: impl Into<Pixels>) -> Self {
        Self {
            min: min.into().0,
            max: max.into().0,
        }
    }
}

impl Default for AutoHeight {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 200.0,
        }
    }
}
