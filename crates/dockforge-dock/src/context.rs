//! The docking session.
//!
//! [`DockingContext`] owns everything the engine mutates: the node tree, the
//! window registry, drag state and queued input. It is passed explicitly to
//! every docking call; there is no global state.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::math::Vec2;
use dockforge_core::profiling::profile_function;

use crate::config::DockingConfig;
use crate::drag::DragManager;
use crate::error::{DockError, DockResult};
use crate::hit_test::{self, ResizeGrip};
use crate::input::{DockInput, InputQueue};
use crate::layout::{self, content_rect};
use crate::node::{DockNode, DockNodeFlags, DockView, IconId, NodeId, ViewId};
use crate::platform::{NativeWindowHandle, WindowDescriptor, WindowProvider};
use crate::registry::WindowRegistry;
use crate::tree::{DockTree, InvariantIssue, InvariantReport};
use crate::types::{CursorHint, DockNodeKind, DockSide};

/// Per-frame bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameState {
    /// Number of frames run so far.
    pub index: u64,
    /// Last known cursor position in screen coordinates.
    pub cursor: Option<Vec2>,
    pub cursor_hint: CursorHint,
}

#[derive(Default)]
pub struct DockingContext {
    pub(crate) tree: DockTree,
    pub(crate) registry: WindowRegistry,
    pub(crate) config: DockingConfig,
    pub(crate) drag: DragManager,
    pub(crate) input: InputQueue,
    pub(crate) frame: FrameState,
}

impl DockingContext {
    pub fn new(config: DockingConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DockingConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DockingConfig) {
        self.config = config;
    }

    pub fn drag(&self) -> &DragManager {
        &self.drag
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.frame.cursor_hint
    }

    /// Queue input for [`pump`](Self::pump).
    pub fn push_input(&mut self, input: DockInput) {
        self.input.push(input);
    }

    pub fn input_queue(&self) -> &InputQueue {
        &self.input
    }

    // Views

    /// Register a view. It stays undocked until passed to a dock operation.
    pub fn create_view(&mut self, view: DockView) -> ViewId {
        let mut view = view;
        view.node = None;
        self.tree.insert_view(view)
    }

    pub fn view(&self, view: ViewId) -> Option<&DockView> {
        self.tree.view(view)
    }

    pub fn view_node(&self, view: ViewId) -> Option<NodeId> {
        self.tree.view(view).and_then(|v| v.node)
    }

    /// Content area of the node hosting `view`.
    pub fn view_rect(&self, view: ViewId) -> Option<LayoutRect> {
        let node = self.tree.node(self.view_node(view)?)?;
        Some(content_rect(node.rect, &self.config))
    }

    pub fn view_title(&self, view: ViewId) -> Option<&str> {
        self.tree.view(view).map(|v| v.title.as_str())
    }

    pub fn set_view_title(&mut self, view: ViewId, title: impl Into<String>) -> DockResult<()> {
        self.view_entry(view)?.title = title.into();
        Ok(())
    }

    pub fn view_icon(&self, view: ViewId) -> Option<IconId> {
        self.tree.view(view).and_then(|v| v.icon)
    }

    pub fn set_view_icon(&mut self, view: ViewId, icon: Option<IconId>) -> DockResult<()> {
        self.view_entry(view)?.icon = icon;
        Ok(())
    }

    pub fn view_user_data(&self, view: ViewId) -> Option<u64> {
        self.tree.view(view).map(|v| v.user_data)
    }

    pub fn set_view_user_data(&mut self, view: ViewId, user_data: u64) -> DockResult<()> {
        self.view_entry(view)?.user_data = user_data;
        Ok(())
    }

    pub fn view_content_type(&self, view: ViewId) -> Option<u32> {
        self.tree.view(view).map(|v| v.content_type)
    }

    fn view_entry(&mut self, view: ViewId) -> DockResult<&mut DockView> {
        self.tree.view_mut(view).ok_or(DockError::ViewNotFound(view))
    }

    // Nodes and containers

    pub fn node(&self, node: NodeId) -> Option<&DockNode> {
        self.tree.node(node)
    }

    /// Views of a leaf, in tab order.
    pub fn tabs(&self, node: NodeId) -> &[ViewId] {
        self.tree.node(node).map_or(&[], |n| n.views())
    }

    /// All `Tabs` leaves of a container, in pre-order.
    pub fn panes(&self, root: NodeId) -> Vec<NodeId> {
        self.tree
            .leaves(root)
            .into_iter()
            .filter(|&id| self.tree.node(id).is_some_and(|n| n.kind == DockNodeKind::Tabs))
            .collect()
    }

    /// Registered roots, bottom-most first.
    pub fn roots(&self) -> Vec<NodeId> {
        self.registry.iter().map(|(_, root)| root).collect()
    }

    pub(crate) fn roots_top_down(&self) -> Vec<NodeId> {
        self.registry.iter_top_down().map(|(_, root)| root).collect()
    }

    pub fn main_root(&self) -> Option<NodeId> {
        self.registry.main_root()
    }

    /// Native window backing the root that contains `node`.
    pub fn window_of(&self, node: NodeId) -> Option<NativeWindowHandle> {
        let root = self.tree.root_of(node)?;
        self.tree.node(root).and_then(|n| n.native_window)
    }

    pub(crate) fn is_live(&self, node: NodeId) -> bool {
        self.tree
            .root_of(node)
            .is_some_and(|root| self.registry.contains_root(root))
    }

    /// Set the docking restrictions of a node.
    pub fn set_node_flags(&mut self, node: NodeId, flags: DockNodeFlags) -> DockResult<()> {
        self.tree.try_node_mut(node)?.flags = flags;
        Ok(())
    }

    // Root windows

    /// Adopt an externally created window as the main window.
    ///
    /// The main root is never destroyed; emptying it leaves a `None` leaf.
    pub fn register_main_window(&mut self, handle: NativeWindowHandle) -> DockResult<NodeId> {
        if let Some(root) = self.registry.root_for(handle) {
            self.registry.set_main(handle);
            return Ok(root);
        }
        let root = self.new_root(handle);
        self.registry.set_main(handle);
        tracing::info!("registered main window {handle:?} as root {root:?}");
        Ok(root)
    }

    /// Create a native window and an empty root node for it.
    pub fn create_root_window(
        &mut self,
        platform: &mut dyn WindowProvider,
        descriptor: &WindowDescriptor,
    ) -> DockResult<NodeId> {
        let handle = platform.create_window(descriptor)?;
        let root = self.new_root(handle);
        tracing::info!("created root {root:?} for window {handle:?}");
        Ok(root)
    }

    fn new_root(&mut self, handle: NativeWindowHandle) -> NodeId {
        let mut node = DockNode::new(DockNodeKind::None);
        node.native_window = Some(handle);
        let root = self.tree.insert_node(node);
        self.registry.register(handle, root);
        root
    }

    /// Delete a root container and everything docked in it.
    ///
    /// Views hosted by the container are orphaned, not destroyed. The main
    /// root is emptied instead of deleted.
    pub fn delete_root(&mut self, platform: &mut dyn WindowProvider, root: NodeId) -> DockResult<()> {
        if !self.tree.try_node(root)?.is_root() {
            return Err(DockError::NotARoot(root));
        }
        self.teardown_root(platform, root);
        self.debug_validate();
        Ok(())
    }

    /// Clear a root. Non-main roots lose their native window and mapping.
    pub(crate) fn teardown_root(&mut self, platform: &mut dyn WindowProvider, root: NodeId) {
        let handle = self.tree.node(root).and_then(|n| n.native_window);
        let is_main = handle.is_some_and(|h| self.registry.is_main(h));

        let children = self.tree.node(root).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            self.tree.detach(child);
            self.tree.delete_subtree(child);
        }

        if is_main {
            let views = self
                .tree
                .node_mut(root)
                .map(|n| std::mem::take(&mut n.views))
                .unwrap_or_default();
            for view in views {
                if let Some(view) = self.tree.view_mut(view) {
                    view.node = None;
                }
            }
            if let Some(node) = self.tree.node_mut(root) {
                node.kind = DockNodeKind::None;
                node.selected_tab = None;
                node.flags = Default::default();
            }
            tracing::debug!("main root {root:?} emptied");
            return;
        }

        self.tree.delete_subtree(root);
        if let Some(handle) = handle {
            self.registry.unregister(handle);
            platform.destroy_window(handle);
            tracing::info!("destroyed root {root:?} and window {handle:?}");
        }
    }

    // Layout

    /// Recompute every rectangle from the native client areas.
    pub fn compute_layout(&mut self, platform: &dyn WindowProvider) {
        profile_function!();
        let roots: Vec<_> = self.registry.iter().collect();
        for (handle, root) in roots {
            let Some(rect) = platform.client_rect(handle) else {
                tracing::warn!("no client area for window {handle:?}");
                continue;
            };
            layout::layout_subtree(&mut self.tree, root, rect, &self.config);
        }
    }

    // Hit-testing

    pub fn find_node_at(&self, point: Vec2) -> Option<NodeId> {
        hit_test::find_node_at(&self.tree, &self.roots_top_down(), point)
    }

    pub fn find_target_node_at(&self, point: Vec2) -> Option<NodeId> {
        hit_test::find_target_node_at(&self.tree, &self.roots_top_down(), point)
    }

    pub fn find_resize_node_at(&self, point: Vec2) -> Option<ResizeGrip> {
        hit_test::find_resize_node_at(&self.tree, &self.roots_top_down(), point, self.config.grip_size)
    }

    pub fn find_tab_at(&self, point: Vec2) -> Option<(NodeId, usize)> {
        hit_test::find_tab_at(&self.tree, &self.roots_top_down(), point, &self.config)
    }

    pub fn find_tab_bar_at(&self, point: Vec2) -> Option<NodeId> {
        hit_test::find_tab_bar_at(&self.tree, &self.roots_top_down(), point, &self.config)
    }

    pub fn classify_dock_side(&self, target: NodeId, point: Vec2) -> Option<DockSide> {
        let rect = self.tree.node(target)?.rect;
        hit_test::classify_dock_side(rect, point, self.config.border_percent)
    }

    pub fn cursor_hint_at(&self, point: Vec2) -> CursorHint {
        hit_test::cursor_hint(&self.tree, &self.roots_top_down(), point, &self.config)
    }

    // Invariants

    /// Check tree invariants and the root/window mapping.
    pub fn validate(&self) -> InvariantReport {
        let mut report = self.tree.validate();
        for (id, node) in self.tree.nodes() {
            if !node.is_root() {
                continue;
            }
            match node.native_window {
                None => report.push(InvariantIssue::MissingNativeWindow(id)),
                Some(handle) if self.registry.root_for(handle) != Some(id) => {
                    report.push(InvariantIssue::UnregisteredRoot(id))
                }
                Some(_) => {}
            }
        }
        report
    }

    pub(crate) fn debug_validate(&self) {
        if cfg!(debug_assertions) {
            let report = self.validate();
            debug_assert!(report.is_ok(), "dock tree invariants violated:\n{report}");
        }
    }
}
