//! Pointer-driven drag state machine.
//!
//! `Idle -> ResizingBorder -> Idle` on grips, and
//! `Idle -> DraggingTab -> Idle` on tabs. A tab drag commits at most one
//! [`DockPreview`] on release; a cancelled or invalidated drag commits nothing.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::math::Vec2;
use dockforge_core::profiling::profile_function;

use crate::context::DockingContext;
use crate::drag::{DockPreview, DragState, ResizeDrag, TabDrag};
use crate::error::DockResult;
use crate::hit_test::preview_bounds;
use crate::input::{DockInput, PointerButton};
use crate::layout::tab_rects;
use crate::node::{DockNodeFlags, NodeId, ViewId};
use crate::platform::WindowProvider;
use crate::tree::even_share;
use crate::types::{CursorHint, DockNodeKind, DockSide, SplitDirection};

/// What handling one input did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputResponse {
    /// The docking layer used the input; it should not reach view content.
    pub consumed: bool,
    /// Preview committed by a release.
    pub committed: Option<DockPreview>,
    /// Size hints or structure changed.
    pub layout_changed: bool,
    pub cursor: CursorHint,
}

impl DockingContext {
    /// Feed one input event through the drag state machine.
    pub fn handle_input(&mut self, platform: &mut dyn WindowProvider, input: DockInput) -> InputResponse {
        profile_function!();
        self.invalidate_stale_drag(platform);

        if let Some(position) = input.position() {
            self.frame.cursor = Some(position);
        }

        let mut response = match input {
            DockInput::PointerDown {
                position,
                button: PointerButton::Primary,
            } => self.pointer_down(platform, position),
            DockInput::PointerMove { position } => self.pointer_move(platform, position),
            DockInput::PointerUp {
                position,
                button: PointerButton::Primary,
            } => self.pointer_up(platform, position),
            DockInput::Cancel => self.cancel_drag(platform),
            DockInput::PointerDown { .. } | DockInput::PointerUp { .. } => InputResponse::default(),
        };

        response.cursor = match self.drag.state() {
            DragState::ResizingBorder(drag) => match drag.grip.direction {
                SplitDirection::Horizontal => CursorHint::ResizeHorizontal,
                SplitDirection::Vertical => CursorHint::ResizeVertical,
            },
            _ => self
                .frame
                .cursor
                .map_or(CursorHint::Default, |cursor| self.cursor_hint_at(cursor)),
        };
        self.frame.cursor_hint = response.cursor;
        response
    }

    fn pointer_down(&mut self, platform: &mut dyn WindowProvider, position: Vec2) -> InputResponse {
        if !self.drag.is_idle() {
            return InputResponse {
                consumed: true,
                ..Default::default()
            };
        }

        if let Some(grip) = self.find_resize_node_at(position) {
            self.normalize_child_hints(grip.parent);
            let (Some(first), Some(second)) = (self.tree.node(grip.first), self.tree.node(grip.second)) else {
                return InputResponse::default();
            };
            let window = self.window_of(grip.parent);
            let drag = ResizeDrag {
                grip,
                start_pos: position,
                current_pos: position,
                first_rect: first.rect,
                second_rect: second.rect,
                first_hint: first.size_hint,
                second_hint: second.size_hint,
                window,
            };
            if let Some(window) = window {
                platform.set_capture(window);
            }
            tracing::debug!("resize started on {:?}", grip.parent);
            self.drag.start_resize(drag);
            return InputResponse {
                consumed: true,
                ..Default::default()
            };
        }

        if let Some((node, index)) = self.find_tab_at(position) {
            let Some(leaf) = self.tree.node(node) else {
                return InputResponse::default();
            };
            let Some(&view) = leaf.views.get(index) else {
                return InputResponse::default();
            };
            let rect = leaf.rect;
            let window = self.window_of(node);
            let drag = TabDrag {
                source: node,
                view,
                start_index: index,
                start_pos: position,
                current_pos: position,
                is_active: false,
                grab_offset: position - rect.position(),
                source_size: rect.size(),
                preview: None,
                window,
            };
            // A click without travel just selects the tab.
            if let Err(err) = self.select_tab(node, index) {
                tracing::warn!("failed to select tab: {err}");
            }
            if let Some(window) = window {
                platform.set_capture(window);
            }
            self.drag.start_tab_drag(drag);
            return InputResponse {
                consumed: true,
                ..Default::default()
            };
        }

        InputResponse::default()
    }

    fn pointer_move(&mut self, platform: &mut dyn WindowProvider, position: Vec2) -> InputResponse {
        let min_fraction = self.config.min_resize_fraction;
        let trigger = self.config.drag_trigger_distance;

        match self.drag.state_mut() {
            DragState::Idle => InputResponse::default(),
            DragState::ResizingBorder(drag) => {
                drag.current_pos = position;
                let fraction = drag.fraction_at(position, min_fraction);
                let pair = drag.first_hint + drag.second_hint;
                let (first, second) = (drag.grip.first, drag.grip.second);
                self.apply_resize(first, second, fraction, pair);
                self.compute_layout(&*platform);
                InputResponse {
                    consumed: true,
                    layout_changed: true,
                    ..Default::default()
                }
            }
            DragState::DraggingTab(drag) => {
                if drag.update(position, trigger) {
                    let drag = drag.clone();
                    let preview = self.resolve_preview(&drag, position);
                    if let DragState::DraggingTab(drag) = self.drag.state_mut() {
                        drag.preview = preview;
                    }
                }
                InputResponse {
                    consumed: true,
                    ..Default::default()
                }
            }
        }
    }

    fn pointer_up(&mut self, platform: &mut dyn WindowProvider, position: Vec2) -> InputResponse {
        match self.drag.end_drag() {
            DragState::Idle => InputResponse::default(),
            DragState::ResizingBorder(drag) => {
                platform.release_capture();
                tracing::debug!("resize finished on {:?}", drag.grip.parent);
                InputResponse {
                    consumed: true,
                    layout_changed: true,
                    ..Default::default()
                }
            }
            DragState::DraggingTab(mut drag) => {
                platform.release_capture();
                if drag.update(position, self.config.drag_trigger_distance) {
                    drag.preview = self.resolve_preview(&drag, position);
                }
                let Some(preview) = drag.preview else {
                    return InputResponse {
                        consumed: true,
                        ..Default::default()
                    };
                };

                match self.commit_preview(platform, drag.view, preview) {
                    Ok(()) => {
                        self.compute_layout(&*platform);
                        InputResponse {
                            consumed: true,
                            committed: Some(preview),
                            layout_changed: true,
                            ..Default::default()
                        }
                    }
                    Err(err) => {
                        tracing::warn!("drop of {:?} rejected: {err}", drag.view);
                        InputResponse {
                            consumed: true,
                            ..Default::default()
                        }
                    }
                }
            }
        }
    }

    fn cancel_drag(&mut self, platform: &mut dyn WindowProvider) -> InputResponse {
        match self.drag.end_drag() {
            DragState::Idle => InputResponse::default(),
            DragState::ResizingBorder(drag) => {
                platform.release_capture();
                for (node, hint) in [
                    (drag.grip.first, drag.first_hint),
                    (drag.grip.second, drag.second_hint),
                ] {
                    if let Some(node) = self.tree.node_mut(node) {
                        node.size_hint = hint;
                    }
                }
                self.compute_layout(&*platform);
                tracing::debug!("resize cancelled");
                InputResponse {
                    consumed: true,
                    layout_changed: true,
                    ..Default::default()
                }
            }
            DragState::DraggingTab(_) => {
                platform.release_capture();
                tracing::debug!("tab drag cancelled");
                InputResponse {
                    consumed: true,
                    ..Default::default()
                }
            }
        }
    }

    /// Drop a drag whose nodes or view no longer exist in the expected shape.
    pub(crate) fn invalidate_stale_drag(&mut self, platform: &mut dyn WindowProvider) {
        let stale = match self.drag.state() {
            DragState::Idle => false,
            DragState::ResizingBorder(drag) => {
                let grip = drag.grip;
                !self.tree.node(grip.parent).is_some_and(|parent| {
                    parent
                        .children
                        .windows(2)
                        .any(|pair| pair[0] == grip.first && pair[1] == grip.second)
                })
            }
            DragState::DraggingTab(drag) => {
                !self.tree.contains_node(drag.source)
                    || self.tree.view(drag.view).and_then(|v| v.node) != Some(drag.source)
            }
        };

        if stale {
            tracing::debug!("drag source vanished, returning to idle");
            self.drag.cancel();
            platform.release_capture();
            return;
        }

        let preview_target = match self.drag.preview() {
            Some(DockPreview::Reorder { node, .. })
            | Some(DockPreview::InsertTab { node, .. })
            | Some(DockPreview::Split { node, .. }) => Some(node),
            _ => None,
        };
        if let Some(node) = preview_target
            && !self.tree.contains_node(node)
            && let DragState::DraggingTab(drag) = self.drag.state_mut()
        {
            drag.preview = None;
        }
    }

    /// Rescale the hints of a split's children to sum to one.
    fn normalize_child_hints(&mut self, parent: NodeId) {
        let children = self.tree.node(parent).map(|n| n.children.clone()).unwrap_or_default();
        let hints: Vec<f32> = children
            .iter()
            .map(|&c| self.tree.node(c).map_or(0.0, |n| n.size_hint))
            .collect();
        let fill = even_share(hints.iter().copied());
        let total: f32 = hints.iter().map(|&h| if h > 0.0 { h } else { fill }).sum();
        if total <= 0.0 {
            return;
        }
        for (child, hint) in children.into_iter().zip(hints) {
            if let Some(node) = self.tree.node_mut(child) {
                let hint = if hint > 0.0 { hint } else { fill };
                node.size_hint = hint / total;
            }
        }
    }

    fn apply_resize(&mut self, first: NodeId, second: NodeId, fraction: f32, pair: f32) {
        let first_hint = fraction * pair;
        if let Some(node) = self.tree.node_mut(first) {
            node.size_hint = first_hint;
        }
        if let Some(node) = self.tree.node_mut(second) {
            node.size_hint = pair - first_hint;
        }
    }

    /// Decide what releasing the drag at `position` would do.
    fn resolve_preview(&self, drag: &TabDrag, position: Vec2) -> Option<DockPreview> {
        let source = self.tree.node(drag.source)?;

        if let Some((node, index)) = self.find_tab_at(position) {
            if node == drag.source {
                let from = source.tab_index_of(drag.view)?;
                return (from != index).then_some(DockPreview::Reorder { node, from, to: index });
            }
            return self.insert_preview(node, index);
        }

        if let Some(node) = self.find_tab_bar_at(position) {
            if node == drag.source {
                return None;
            }
            let len = self.tree.node(node)?.views.len();
            return self.insert_preview(node, len);
        }

        if let Some(target) = self.find_target_node_at(position) {
            let node = self.tree.node(target)?;
            if node.kind == DockNodeKind::None {
                return Some(DockPreview::InsertTab { node: target, index: 0 });
            }
            return match self.classify_dock_side(target, position)? {
                DockSide::AsTab if target == drag.source => None,
                DockSide::AsTab => self.insert_preview(target, node.views.len()),
                _ if target == drag.source && source.views.len() == 1 => None,
                _ if node.flags.contains(DockNodeFlags::NO_SPLIT) => None,
                side => Some(DockPreview::Split { node: target, side }),
            };
        }

        if self.config.allow_undock && !source.flags.contains(DockNodeFlags::NO_UNDOCK) {
            let origin = position - drag.grab_offset;
            return Some(DockPreview::Undock {
                rect: LayoutRect::new(origin.x, origin.y, drag.source_size.x, drag.source_size.y),
            });
        }
        None
    }

    fn insert_preview(&self, node: NodeId, index: usize) -> Option<DockPreview> {
        let flags = self.tree.node(node)?.flags;
        (!flags.contains(DockNodeFlags::NO_TAB_INSERT)).then_some(DockPreview::InsertTab { node, index })
    }

    fn commit_preview(
        &mut self,
        platform: &mut dyn WindowProvider,
        view: ViewId,
        preview: DockPreview,
    ) -> DockResult<()> {
        let source_root = self.view_node(view).and_then(|n| self.tree.root_of(n));
        tracing::debug!("committing {preview:?} for {view:?}");

        match preview {
            DockPreview::Reorder { node, from, to } => self.swap_tabs(node, from, to)?,
            DockPreview::InsertTab { node, index } => self.dock(platform, view, node, DockSide::AsTab, index)?,
            DockPreview::Split { node, side } => self.dock(platform, view, node, side, 0)?,
            DockPreview::Undock { rect } => {
                self.undock(platform, view, rect)?;
            }
        }

        let target_root = self.view_node(view).and_then(|n| self.tree.root_of(n));
        if target_root != source_root
            && let Some(root) = target_root
            && let Some(handle) = self.tree.node(root).and_then(|n| n.native_window)
        {
            self.registry.bring_to_front(handle);
            platform.focus_window(handle);
        }
        Ok(())
    }

    /// Outline to highlight for a preview.
    pub fn preview_outline(&self, preview: DockPreview) -> Option<LayoutRect> {
        match preview {
            DockPreview::Reorder { node, to, .. } => tab_rects(&self.tree, node, &self.config).get(to).copied(),
            DockPreview::InsertTab { node, .. } => self.tree.node(node).map(|n| n.rect),
            DockPreview::Split { node, side } => self
                .tree
                .node(node)
                .map(|n| preview_bounds(side, n.rect, self.config.border_percent)),
            DockPreview::Undock { rect } => Some(rect),
        }
    }
}
