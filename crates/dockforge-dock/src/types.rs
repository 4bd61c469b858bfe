//! Shared types for the docking system.

/// Direction of a split container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitDirection {
    /// Children stacked left to right.
    Horizontal,
    /// Children stacked top to bottom.
    Vertical,
}

impl SplitDirection {
    /// Get the perpendicular direction.
    pub fn perpendicular(&self) -> Self {
        match self {
            SplitDirection::Horizontal => SplitDirection::Vertical,
            SplitDirection::Vertical => SplitDirection::Horizontal,
        }
    }

    /// The node kind of a split container along this direction.
    pub fn node_kind(&self) -> DockNodeKind {
        match self {
            SplitDirection::Horizontal => DockNodeKind::Horizontal,
            SplitDirection::Vertical => DockNodeKind::Vertical,
        }
    }
}

/// Kind of a dock node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DockNodeKind {
    /// Empty leaf. Only valid for an emptied root.
    #[default]
    None,
    /// Leaf holding views as tab pages.
    Tabs,
    /// Children stacked top to bottom.
    Vertical,
    /// Children stacked left to right.
    Horizontal,
}

impl DockNodeKind {
    pub fn is_split(&self) -> bool {
        matches!(self, DockNodeKind::Vertical | DockNodeKind::Horizontal)
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_split()
    }

    pub fn split_direction(&self) -> Option<SplitDirection> {
        match self {
            DockNodeKind::Horizontal => Some(SplitDirection::Horizontal),
            DockNodeKind::Vertical => Some(SplitDirection::Vertical),
            DockNodeKind::None | DockNodeKind::Tabs => None,
        }
    }

    pub(crate) fn to_raw(self) -> u8 {
        match self {
            DockNodeKind::None => 0,
            DockNodeKind::Tabs => 1,
            DockNodeKind::Vertical => 2,
            DockNodeKind::Horizontal => 3,
        }
    }

    pub(crate) fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(DockNodeKind::None),
            1 => Some(DockNodeKind::Tabs),
            2 => Some(DockNodeKind::Vertical),
            3 => Some(DockNodeKind::Horizontal),
            _ => None,
        }
    }
}

/// Requested placement of docked content relative to a target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockSide {
    Left,
    Right,
    Top,
    Bottom,
    /// Insert as a tab page of the target.
    AsTab,
}

impl DockSide {
    /// Get the split direction for this side.
    pub fn split_direction(&self) -> Option<SplitDirection> {
        match self {
            DockSide::Left | DockSide::Right => Some(SplitDirection::Horizontal),
            DockSide::Top | DockSide::Bottom => Some(SplitDirection::Vertical),
            DockSide::AsTab => None,
        }
    }

    /// Check if this side places new content before the existing content.
    pub fn is_before(&self) -> bool {
        matches!(self, DockSide::Left | DockSide::Top)
    }
}

/// How a spatial dock sizes the new sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// New siblings start unset and receive an even share from the layout solver.
    #[default]
    Proportional,
    /// New siblings take `split_ratio` of the target's prior size hint.
    FixedRatio,
}

/// Cursor shape suggested by the hit-test layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over a grip between horizontally stacked children.
    ResizeHorizontal,
    /// Over a grip between vertically stacked children.
    ResizeVertical,
}

/// Hit-test band around a split boundary, in pixels.
pub const DEFAULT_GRIP_SIZE: f32 = 8.0;

/// Fraction of a target's width/height classified as an edge drop.
pub const DEFAULT_BORDER_PERCENT: f32 = 0.25;

/// Smallest fraction a resize drag can leave either sibling with.
pub const DEFAULT_MIN_RESIZE_FRACTION: f32 = 0.1;

/// Cursor travel in pixels before a tab drag produces previews.
pub const DRAG_TRIGGER_DISTANCE: f32 = 3.0;

/// Gap reserved between split children, in pixels.
pub const DEFAULT_SPLIT_GAP: f32 = 4.0;

/// Height of a tab strip, in pixels.
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 24.0;

pub const DEFAULT_TAB_MIN_WIDTH: f32 = 48.0;
pub const DEFAULT_TAB_MAX_WIDTH: f32 = 200.0;

/// Share of the target a new sibling takes in [`SizingMode::FixedRatio`].
pub const DEFAULT_SPLIT_RATIO: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_directions() {
        assert_eq!(DockSide::Left.split_direction(), Some(SplitDirection::Horizontal));
        assert_eq!(DockSide::Bottom.split_direction(), Some(SplitDirection::Vertical));
        assert_eq!(DockSide::AsTab.split_direction(), None);
        assert!(DockSide::Top.is_before());
        assert!(!DockSide::Right.is_before());
    }

    #[test]
    fn test_kind_raw_roundtrip() {
        for kind in [
            DockNodeKind::None,
            DockNodeKind::Tabs,
            DockNodeKind::Vertical,
            DockNodeKind::Horizontal,
        ] {
            assert_eq!(DockNodeKind::from_raw(kind.to_raw()), Some(kind));
        }
        assert_eq!(DockNodeKind::from_raw(9), None);
    }

    #[test]
    fn test_perpendicular() {
        assert_eq!(
            SplitDirection::Horizontal.perpendicular().node_kind(),
            DockNodeKind::Vertical
        );
    }
}
