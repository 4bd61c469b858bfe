//! Mapping between native top-level windows and root dock nodes.

use indexmap::IndexMap;

use crate::node::NodeId;
use crate::platform::NativeWindowHandle;

/// Native window to root node registry.
///
/// Entries are kept in z-order: the last entry is the top-most window.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    roots: IndexMap<NativeWindowHandle, NodeId>,
    main: Option<NativeWindowHandle>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root as the top-most window.
    pub fn register(&mut self, handle: NativeWindowHandle, root: NodeId) {
        self.roots.shift_remove(&handle);
        self.roots.insert(handle, root);
    }

    pub fn unregister(&mut self, handle: NativeWindowHandle) -> Option<NodeId> {
        if self.main == Some(handle) {
            self.main = None;
        }
        self.roots.shift_remove(&handle)
    }

    pub fn set_main(&mut self, handle: NativeWindowHandle) {
        self.main = Some(handle);
    }

    pub fn main(&self) -> Option<NativeWindowHandle> {
        self.main
    }

    pub fn main_root(&self) -> Option<NodeId> {
        self.main.and_then(|handle| self.root_for(handle))
    }

    pub fn is_main(&self, handle: NativeWindowHandle) -> bool {
        self.main == Some(handle)
    }

    pub fn root_for(&self, handle: NativeWindowHandle) -> Option<NodeId> {
        self.roots.get(&handle).copied()
    }

    pub fn handle_for(&self, root: NodeId) -> Option<NativeWindowHandle> {
        self.roots
            .iter()
            .find_map(|(&handle, &node)| (node == root).then_some(handle))
    }

    pub fn contains_root(&self, root: NodeId) -> bool {
        self.handle_for(root).is_some()
    }

    /// Move a window to the top of the z-order.
    pub fn bring_to_front(&mut self, handle: NativeWindowHandle) -> bool {
        match self.roots.get_index_of(&handle) {
            Some(index) => {
                let last = self.roots.len() - 1;
                self.roots.move_index(index, last);
                true
            }
            None => false,
        }
    }

    /// Roots from bottom-most to top-most.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NativeWindowHandle, NodeId)> + '_ {
        self.roots.iter().map(|(&handle, &root)| (handle, root))
    }

    /// Roots from top-most to bottom-most, the order used for hit-testing.
    pub fn iter_top_down(&self) -> impl Iterator<Item = (NativeWindowHandle, NodeId)> + '_ {
        self.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
