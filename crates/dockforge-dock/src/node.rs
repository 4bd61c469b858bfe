//! Dock nodes and the views they host.

use dockforge_core::alloc::Handle;
use dockforge_core::geometry::LayoutRect;

use crate::platform::NativeWindowHandle;
use crate::types::DockNodeKind;

/// Stable handle to a [`DockNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) Handle);

/// Stable handle to a [`DockView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub(crate) Handle);

/// Opaque icon reference, resolved by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

bitflags::bitflags! {
    /// Per-node docking restrictions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DockNodeFlags: u32 {
        /// Side docking onto this node is rejected.
        const NO_SPLIT = 1 << 0;
        /// Inserting tabs into this node is rejected.
        const NO_TAB_INSERT = 1 << 1;
        /// Grips adjoining this node do not start resize drags.
        const NO_RESIZE = 1 << 2;
        /// Tabs of this node cannot be undocked into a new window.
        const NO_UNDOCK = 1 << 3;
    }
}

/// A node in the layout tree.
#[derive(Debug, Clone)]
pub struct DockNode {
    pub(crate) kind: DockNodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) views: Vec<ViewId>,
    pub(crate) rect: LayoutRect,
    pub(crate) size_hint: f32,
    pub(crate) selected_tab: Option<usize>,
    pub(crate) native_window: Option<NativeWindowHandle>,
    pub(crate) flags: DockNodeFlags,
}

impl DockNode {
    pub(crate) fn new(kind: DockNodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            views: Vec::new(),
            rect: LayoutRect::ZERO,
            size_hint: 0.0,
            selected_tab: None,
            native_window: None,
            flags: DockNodeFlags::empty(),
        }
    }

    pub fn kind(&self) -> DockNodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    /// Last computed screen rectangle. Recomputed on every layout pass.
    pub fn rect(&self) -> LayoutRect {
        self.rect
    }

    /// Proportional weight along the parent's split axis. `<= 0` means unset.
    pub fn size_hint(&self) -> f32 {
        self.size_hint
    }

    pub fn selected_tab(&self) -> Option<usize> {
        self.selected_tab
    }

    pub fn selected_view(&self) -> Option<ViewId> {
        self.selected_tab.and_then(|index| self.views.get(index).copied())
    }

    pub fn native_window(&self) -> Option<NativeWindowHandle> {
        self.native_window
    }

    pub fn flags(&self) -> DockNodeFlags {
        self.flags
    }

    /// No views and no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.views.is_empty()
    }

    pub fn tab_index_of(&self, view: ViewId) -> Option<usize> {
        self.views.iter().position(|&v| v == view)
    }

    pub fn child_index_of(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }

    /// Insert a view at `index` (clamped) and select it.
    pub(crate) fn insert_view(&mut self, index: usize, view: ViewId) -> usize {
        let index = index.min(self.views.len());
        self.views.insert(index, view);
        self.selected_tab = Some(index);
        index
    }

    /// Remove a view, keeping the selection on the same view where possible.
    pub(crate) fn take_view(&mut self, view: ViewId) -> Option<usize> {
        let index = self.tab_index_of(view)?;
        self.views.remove(index);

        self.selected_tab = match self.selected_tab {
            _ if self.views.is_empty() => None,
            Some(selected) if selected > index => Some(selected - 1),
            Some(selected) if selected >= self.views.len() => Some(self.views.len() - 1),
            Some(selected) => Some(selected),
            None => Some(0),
        };
        Some(index)
    }
}

/// A dockable window hosted as a tab page.
#[derive(Debug, Clone, PartialEq)]
pub struct DockView {
    pub(crate) title: String,
    pub(crate) content_type: u32,
    pub(crate) icon: Option<IconId>,
    pub(crate) user_data: u64,
    pub(crate) node: Option<NodeId>,
}

impl DockView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content_type: 0,
            icon: None,
            user_data: 0,
            node: None,
        }
    }

    /// Set the user-defined content type tag.
    pub fn content_type(mut self, content_type: u32) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn icon(mut self, icon: IconId) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn user_data(mut self, user_data: u64) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content_type_tag(&self) -> u32 {
        self.content_type
    }

    pub fn icon_id(&self) -> Option<IconId> {
        self.icon
    }

    pub fn user_data_value(&self) -> u64 {
        self.user_data
    }

    /// The node currently hosting this view, if docked.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}
