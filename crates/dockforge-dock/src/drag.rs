//! Drag state for border resizing and tab re-docking.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::math::Vec2;

use crate::hit_test::ResizeGrip;
use crate::node::{NodeId, ViewId};
use crate::platform::NativeWindowHandle;
use crate::types::{DockSide, SplitDirection};

/// An outcome a tab drag would commit if released now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockPreview {
    /// Swap the dragged tab with another tab of the same node.
    Reorder { node: NodeId, from: usize, to: usize },
    /// Insert the dragged view as a tab of another node.
    InsertTab { node: NodeId, index: usize },
    /// Dock the dragged view at a side of a leaf.
    Split { node: NodeId, side: DockSide },
    /// Move the dragged view into a new top-level window.
    Undock { rect: LayoutRect },
}

/// A border resize in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub grip: ResizeGrip,
    pub start_pos: Vec2,
    pub current_pos: Vec2,
    /// Rectangles of both siblings when the drag started.
    pub first_rect: LayoutRect,
    pub second_rect: LayoutRect,
    /// Hints of both siblings when the drag started. Their sum is
    /// redistributed on every move and restored on cancel.
    pub first_hint: f32,
    pub second_hint: f32,
    pub window: Option<NativeWindowHandle>,
}

impl ResizeDrag {
    /// Fraction of the pair the first sibling gets at `pos`.
    pub fn fraction_at(&self, pos: Vec2, min_fraction: f32) -> f32 {
        resize_fraction(
            self.first_rect,
            self.second_rect,
            pos - self.start_pos,
            self.grip.direction,
            min_fraction,
        )
    }
}

/// A tab drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct TabDrag {
    /// Node the view was grabbed from.
    pub source: NodeId,
    pub view: ViewId,
    pub start_index: usize,
    pub start_pos: Vec2,
    pub current_pos: Vec2,
    /// Whether the cursor has travelled past the trigger distance.
    pub is_active: bool,
    /// Cursor offset from the source leaf origin, kept when undocking.
    pub grab_offset: Vec2,
    /// Size of the source leaf when grabbed.
    pub source_size: Vec2,
    pub preview: Option<DockPreview>,
    pub window: Option<NativeWindowHandle>,
}

impl TabDrag {
    /// Move the cursor. Returns true once the drag is active.
    pub fn update(&mut self, pos: Vec2, trigger_distance: f32) -> bool {
        self.current_pos = pos;
        if !self.is_active && (pos - self.start_pos).length() >= trigger_distance {
            self.is_active = true;
        }
        self.is_active
    }

    pub fn delta(&self) -> Vec2 {
        self.current_pos - self.start_pos
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    ResizingBorder(ResizeDrag),
    DraggingTab(TabDrag),
}

/// Owns the current [`DragState`].
#[derive(Debug, Default)]
pub struct DragManager {
    state: DragState,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut DragState {
        &mut self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn start_resize(&mut self, drag: ResizeDrag) {
        self.state = DragState::ResizingBorder(drag);
    }

    pub fn start_tab_drag(&mut self, drag: TabDrag) {
        self.state = DragState::DraggingTab(drag);
    }

    /// Whether a tab drag has passed its trigger distance.
    pub fn is_dragging_tab(&self) -> bool {
        matches!(&self.state, DragState::DraggingTab(drag) if drag.is_active)
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, DragState::ResizingBorder(_))
    }

    pub fn tab_drag(&self) -> Option<&TabDrag> {
        match &self.state {
            DragState::DraggingTab(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn resize_drag(&self) -> Option<&ResizeDrag> {
        match &self.state {
            DragState::ResizingBorder(drag) => Some(drag),
            _ => None,
        }
    }

    /// The preview a release would commit.
    pub fn preview(&self) -> Option<DockPreview> {
        self.tab_drag().and_then(|drag| drag.preview)
    }

    /// End the current drag and return its final state.
    pub fn end_drag(&mut self) -> DragState {
        std::mem::take(&mut self.state)
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Fraction of the combined extent of two adjacent siblings taken by the
/// first one after the boundary moved by `delta`, clamped to `[min, 1 - min]`.
///
/// Only the siblings' own extents count; the gap between them is not part
/// of the space the layout solver distributes.
pub fn resize_fraction(
    first: LayoutRect,
    second: LayoutRect,
    delta: Vec2,
    direction: SplitDirection,
    min_fraction: f32,
) -> f32 {
    let (first_extent, second_extent, travel) = match direction {
        SplitDirection::Horizontal => (first.width, second.width, delta.x),
        SplitDirection::Vertical => (first.height, second.height, delta.y),
    };
    let span = first_extent + second_extent;
    let min = min_fraction.clamp(0.0, 0.5);
    if span <= 0.0 {
        return 0.5;
    }
    ((first_extent + travel) / span).clamp(min, 1.0 - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockforge_core::alloc::Arena;

    #[test]
    fn test_resize_fraction_clamps() {
        let first = LayoutRect::new(0.0, 0.0, 100.0, 50.0);
        let second = LayoutRect::new(104.0, 0.0, 100.0, 50.0);
        let h = SplitDirection::Horizontal;

        assert_eq!(resize_fraction(first, second, Vec2::new(-50.0, 0.0), h, 0.1), 0.25);
        assert_eq!(resize_fraction(first, second, Vec2::new(-99.0, 0.0), h, 0.1), 0.1);
        assert_eq!(resize_fraction(first, second, Vec2::new(400.0, 0.0), h, 0.1), 0.9);
    }

    #[test]
    fn test_resize_fraction_ignores_gap() {
        let first = LayoutRect::new(0.0, 0.0, 398.0, 600.0);
        let second = LayoutRect::new(402.0, 0.0, 398.0, 600.0);
        let fraction = resize_fraction(first, second, Vec2::ZERO, SplitDirection::Horizontal, 0.1);
        assert_eq!(fraction, 0.5);
    }

    #[test]
    fn test_vertical_fraction_uses_y() {
        let first = LayoutRect::new(0.0, 0.0, 50.0, 100.0);
        let second = LayoutRect::new(0.0, 100.0, 50.0, 300.0);
        let fraction = resize_fraction(first, second, Vec2::new(999.0, 100.0), SplitDirection::Vertical, 0.1);
        assert_eq!(fraction, 0.5);
    }

    #[test]
    fn test_tab_drag_trigger() {
        let mut arena = Arena::new();
        let mut drag = TabDrag {
            source: NodeId(arena.insert(())),
            view: ViewId(arena.insert(())),
            start_index: 0,
            start_pos: Vec2::new(10.0, 10.0),
            current_pos: Vec2::new(10.0, 10.0),
            is_active: false,
            grab_offset: Vec2::ZERO,
            source_size: Vec2::new(100.0, 100.0),
            preview: None,
            window: None,
        };
        assert!(!drag.update(Vec2::new(11.0, 11.0), 3.0));
        assert!(drag.update(Vec2::new(13.0, 10.0), 3.0));
        // Stays active when the cursor returns.
        assert!(drag.update(Vec2::new(10.0, 10.0), 3.0));

        let mut manager = DragManager::new();
        manager.start_tab_drag(drag);
        assert!(manager.is_dragging_tab());
        manager.cancel();
        assert!(manager.is_idle());
    }
}
