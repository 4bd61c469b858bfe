//! Structural mutations of the dock tree.
//!
//! Every public operation validates its arguments before touching the tree,
//! so a returned error means nothing changed. Redundancy collapse runs after
//! every structural change, leaving the tree normalized on return.

use dockforge_core::geometry::LayoutRect;

use crate::context::DockingContext;
use crate::error::{DockError, DockResult};
use crate::node::{DockNode, DockNodeFlags, DockView, NodeId, ViewId};
use crate::platform::{WindowDescriptor, WindowProvider};
use crate::tree::{DockTree, even_share};
use crate::types::{DockNodeKind, DockSide, SizingMode, SplitDirection};

impl DockTree {
    /// Place `leaf` next to `target` along `direction`.
    ///
    /// If the target's parent already splits along `direction`, the leaf
    /// becomes an adjacent sibling. Otherwise the target's content moves one
    /// level down into a new node and the target turns into the split.
    pub(crate) fn insert_sibling(
        &mut self,
        target: NodeId,
        leaf: NodeId,
        direction: SplitDirection,
        before: bool,
        sizing: SizingMode,
        ratio: f32,
    ) -> DockResult<()> {
        let kind = direction.node_kind();
        let parent = self.try_node(target)?.parent;

        if let Some(parent) = parent
            && self.try_node(parent)?.kind == kind
        {
            let siblings = self.try_node(parent)?.children.clone();
            let index = siblings
                .iter()
                .position(|&c| c == target)
                .ok_or(DockError::InvalidTarget(target))?;

            if sizing == SizingMode::FixedRatio {
                let hints = siblings.iter().filter_map(|&c| self.node(c)).map(|n| n.size_hint);
                let fill = even_share(hints);
                let node = self.try_node_mut(target)?;
                let prior = if node.size_hint > 0.0 { node.size_hint } else { fill };
                node.size_hint = prior * (1.0 - ratio);
                self.try_node_mut(leaf)?.size_hint = prior * ratio;
            }

            let index = if before { index } else { index + 1 };
            return self.attach_child(parent, index, leaf);
        }

        let content = self.insert_node(DockNode::new(DockNodeKind::None));
        self.relocate_contents(target, content)?;
        self.try_node_mut(target)?.kind = kind;

        if sizing == SizingMode::FixedRatio {
            self.try_node_mut(content)?.size_hint = 1.0 - ratio;
            self.try_node_mut(leaf)?.size_hint = ratio;
        }

        let (first, second) = if before { (leaf, content) } else { (content, leaf) };
        self.attach_child(target, 0, first)?;
        self.attach_child(target, 1, second)
    }

    /// Remove `view` from whatever node hosts it. Returns that node.
    pub(crate) fn detach_view(&mut self, view: ViewId) -> Option<NodeId> {
        let node = self.view(view)?.node?;
        if let Some(host) = self.node_mut(node) {
            host.take_view(view);
        }
        if let Some(view) = self.view_mut(view) {
            view.node = None;
        }
        Some(node)
    }

    /// Insert `view` as a tab of `node` and select it.
    pub(crate) fn attach_view(&mut self, node: NodeId, index: usize, view: ViewId) -> DockResult<usize> {
        self.try_view(view)?;
        let host = self.try_node_mut(node)?;
        if host.kind == DockNodeKind::None {
            host.kind = DockNodeKind::Tabs;
        }
        let index = host.insert_view(index, view);
        if let Some(view) = self.view_mut(view) {
            view.node = Some(node);
        }
        Ok(index)
    }
}

impl DockingContext {
    /// Dock `view` at `target` on `side`.
    ///
    /// `tab_index` is only used for [`DockSide::AsTab`] and is clamped to
    /// the number of tabs. An empty root target turns into a `Tabs` leaf
    /// holding just `view`, whatever the side.
    pub fn dock(
        &mut self,
        platform: &mut dyn WindowProvider,
        view: ViewId,
        target: NodeId,
        side: DockSide,
        tab_index: usize,
    ) -> DockResult<()> {
        let source = self.tree.try_view(view)?.node;
        let target_node = self.tree.try_node(target)?;
        if !target_node.kind.is_leaf() || !self.is_live(target) {
            return Err(DockError::InvalidTarget(target));
        }

        if target_node.kind == DockNodeKind::None {
            tracing::debug!("docking {view:?} into empty root {target:?}");
            self.tree.detach_view(view);
            self.tree.attach_view(target, 0, view)?;
            return self.finish_dock(platform, source);
        }

        let flags = target_node.flags;
        let target_len = target_node.views.len();

        let Some(direction) = side.split_direction() else {
            if source == Some(target) {
                let from = target_node.tab_index_of(view).ok_or(DockError::ViewNotFound(view))?;
                return self.move_tab(target, from, tab_index.min(target_len - 1));
            }
            if flags.contains(DockNodeFlags::NO_TAB_INSERT) {
                return Err(DockError::DockingDisabled);
            }
            tracing::debug!("docking {view:?} as tab {tab_index} of {target:?}");
            self.tree.detach_view(view);
            self.tree.attach_view(target, tab_index, view)?;
            return self.finish_dock(platform, source);
        };

        if source == Some(target) && target_len == 1 {
            return Err(DockError::DockOntoSelf);
        }
        if flags.contains(DockNodeFlags::NO_SPLIT) {
            return Err(DockError::DockingDisabled);
        }

        tracing::debug!("docking {view:?} {side:?} of {target:?}");
        self.tree.detach_view(view);
        let leaf = self.tree.insert_node(DockNode::new(DockNodeKind::Tabs));
        self.tree.attach_view(leaf, 0, view)?;
        self.tree.insert_sibling(
            target,
            leaf,
            direction,
            side.is_before(),
            self.config.sizing,
            self.config.split_ratio,
        )?;
        self.tree.check_redundancy(leaf);
        self.finish_dock(platform, source)
    }

    /// Remove the former host of a docked view if that left it empty.
    fn finish_dock(&mut self, platform: &mut dyn WindowProvider, source: Option<NodeId>) -> DockResult<()> {
        if let Some(source) = source
            && self.tree.node(source).is_some_and(|n| n.is_empty())
        {
            self.remove_from_parent(platform, source)?;
        }
        self.debug_validate();
        Ok(())
    }

    /// Move `view` into a new top-level window at `rect`.
    pub fn undock(
        &mut self,
        platform: &mut dyn WindowProvider,
        view: ViewId,
        rect: LayoutRect,
    ) -> DockResult<NodeId> {
        let source = self.tree.try_view(view)?.node;
        if let Some(source) = source
            && self.tree.try_node(source)?.flags.contains(DockNodeFlags::NO_UNDOCK)
        {
            return Err(DockError::DockingDisabled);
        }

        let title = self.tree.try_view(view)?.title.clone();
        let root = self.create_root_window(platform, &WindowDescriptor::new(title, rect))?;
        tracing::debug!("undocking {view:?} into root {root:?}");

        self.tree.detach_view(view);
        self.tree.attach_view(root, 0, view)?;
        self.finish_dock(platform, source)?;
        Ok(root)
    }

    /// Detach `node` from its parent and delete it with its subtree.
    ///
    /// A root loses its native window and registry entry instead, unless it
    /// is the main root, which is emptied in place. Views inside the removed
    /// subtree are orphaned.
    pub fn remove_from_parent(&mut self, platform: &mut dyn WindowProvider, node: NodeId) -> DockResult<()> {
        let Some(parent) = self.tree.try_node(node)?.parent else {
            self.teardown_root(platform, node);
            self.debug_validate();
            return Ok(());
        };

        self.tree.detach(node);
        self.tree.delete_subtree(node);
        let changes = self.tree.check_redundancy(parent);
        tracing::trace!("removed {node:?}, collapsed {changes} redundant nodes");
        self.debug_validate();
        Ok(())
    }

    /// Remove `view` from `node`, removing the node too if it becomes empty.
    pub fn remove_view(&mut self, platform: &mut dyn WindowProvider, node: NodeId, view: ViewId) -> DockResult<()> {
        self.tree.try_view(view)?;
        if self.tree.try_node(node)?.tab_index_of(view).is_none() {
            return Err(DockError::ViewNotFound(view));
        }

        self.tree.detach_view(view);
        if self.tree.node(node).is_some_and(|n| n.is_empty()) {
            self.remove_from_parent(platform, node)?;
        }
        self.debug_validate();
        Ok(())
    }

    /// Destroy a view, undocking it first. Cancels any drag holding it.
    pub fn destroy_view(&mut self, platform: &mut dyn WindowProvider, view: ViewId) -> DockResult<DockView> {
        if let Some(node) = self.tree.try_view(view)?.node {
            self.remove_view(platform, node, view)?;
        }
        if self.drag.tab_drag().is_some_and(|drag| drag.view == view) {
            tracing::debug!("dragged view {view:?} destroyed, cancelling drag");
            self.drag.cancel();
            platform.release_capture();
        }
        self.tree.remove_view_entity(view).ok_or(DockError::ViewNotFound(view))
    }

    pub fn select_tab(&mut self, node: NodeId, index: usize) -> DockResult<()> {
        let host = self.tree.try_node_mut(node)?;
        let len = host.views.len();
        if index >= len {
            return Err(DockError::InvalidTabIndex { index, len });
        }
        host.selected_tab = Some(index);
        Ok(())
    }

    /// Swap two tabs. The selection stays on the same view.
    pub fn swap_tabs(&mut self, node: NodeId, a: usize, b: usize) -> DockResult<()> {
        let host = self.tree.try_node_mut(node)?;
        let len = host.views.len();
        for index in [a, b] {
            if index >= len {
                return Err(DockError::InvalidTabIndex { index, len });
            }
        }
        let selected = host.selected_view();
        host.views.swap(a, b);
        host.selected_tab = selected.and_then(|v| host.tab_index_of(v));
        Ok(())
    }

    /// Move a tab to a new position, shifting the tabs in between.
    pub fn move_tab(&mut self, node: NodeId, from: usize, to: usize) -> DockResult<()> {
        let host = self.tree.try_node_mut(node)?;
        let len = host.views.len();
        for index in [from, to] {
            if index >= len {
                return Err(DockError::InvalidTabIndex { index, len });
            }
        }
        let selected = host.selected_view();
        let view = host.views.remove(from);
        host.views.insert(to, view);
        host.selected_tab = selected.and_then(|v| host.tab_index_of(v));
        Ok(())
    }
}
