//! Tunables for layout, hit-testing and drag interaction.

use crate::types::{
    DEFAULT_BORDER_PERCENT, DEFAULT_GRIP_SIZE, DEFAULT_MIN_RESIZE_FRACTION, DEFAULT_SPLIT_GAP,
    DEFAULT_SPLIT_RATIO, DEFAULT_TAB_BAR_HEIGHT, DEFAULT_TAB_MAX_WIDTH, DEFAULT_TAB_MIN_WIDTH,
    DRAG_TRIGGER_DISTANCE, SizingMode,
};

/// Centralized configuration for a [`DockingContext`](crate::DockingContext).
///
/// Setters clamp their input into the valid range instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingConfig {
    /// Width of the resize grip band across a split boundary, in pixels.
    pub grip_size: f32,
    /// Fraction of a target's extent classified as an edge drop, in `(0, 0.5]`.
    pub border_percent: f32,
    /// Smallest fraction either sibling can be resized down to.
    pub min_resize_fraction: f32,
    /// Cursor travel before a tab drag shows previews.
    pub drag_trigger_distance: f32,
    /// Gap between split children, in pixels.
    pub split_gap: f32,
    pub tab_bar_height: f32,
    pub tab_min_width: f32,
    pub tab_max_width: f32,
    /// Whether dragging a tab into empty space creates a new root window.
    pub allow_undock: bool,
    pub sizing: SizingMode,
    /// Share of the target a new sibling takes under [`SizingMode::FixedRatio`].
    pub split_ratio: f32,
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            grip_size: DEFAULT_GRIP_SIZE,
            border_percent: DEFAULT_BORDER_PERCENT,
            min_resize_fraction: DEFAULT_MIN_RESIZE_FRACTION,
            drag_trigger_distance: DRAG_TRIGGER_DISTANCE,
            split_gap: DEFAULT_SPLIT_GAP,
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
            tab_min_width: DEFAULT_TAB_MIN_WIDTH,
            tab_max_width: DEFAULT_TAB_MAX_WIDTH,
            allow_undock: true,
            sizing: SizingMode::Proportional,
            split_ratio: DEFAULT_SPLIT_RATIO,
        }
    }
}

impl DockingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grip band width.
    pub fn grip_size(mut self, size: f32) -> Self {
        self.grip_size = size.max(0.0);
        self
    }

    /// Set the edge band fraction used by side classification.
    pub fn border_percent(mut self, percent: f32) -> Self {
        self.border_percent = percent.clamp(0.01, 0.5);
        self
    }

    /// Set the minimum sibling fraction during resize drags.
    pub fn min_resize_fraction(mut self, fraction: f32) -> Self {
        self.min_resize_fraction = fraction.clamp(0.0, 0.5);
        self
    }

    pub fn drag_trigger_distance(mut self, distance: f32) -> Self {
        self.drag_trigger_distance = distance.max(0.0);
        self
    }

    pub fn split_gap(mut self, gap: f32) -> Self {
        self.split_gap = gap.max(0.0);
        self
    }

    pub fn tab_bar_height(mut self, height: f32) -> Self {
        self.tab_bar_height = height.max(0.0);
        self
    }

    /// Set the tab width range. `max` is raised to `min` if smaller.
    pub fn tab_width(mut self, min: f32, max: f32) -> Self {
        self.tab_min_width = min.max(1.0);
        self.tab_max_width = max.max(self.tab_min_width);
        self
    }

    pub fn allow_undock(mut self, allow: bool) -> Self {
        self.allow_undock = allow;
        self
    }

    pub fn sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the share taken by a new sibling in fixed-ratio sizing.
    pub fn split_ratio(mut self, ratio: f32) -> Self {
        self.split_ratio = ratio.clamp(0.05, 0.95);
        self
    }
}
