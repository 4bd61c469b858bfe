//! Flat binary layout stream.
//!
//! The stream is a sequence of fixed-size `#[repr(C)]` records in native byte
//! order, written depth-first:
//!
//! ```text
//! StreamHeader
//! per root window: WindowRecord, then the root's node subtree
//! per node:        NodeRecord, its views, then its children
//! per view:        ViewRecord, then `title_len` UTF-8 bytes
//! ```
//!
//! A `WindowRecord` holds the outer window rectangle as reported by the
//! [`WindowProvider`] and is what a loaded window is created with. The root's
//! `NodeRecord` rectangle is the client area from the last layout pass; it is
//! restored as-is and replaced on the next layout.
//!
//! Loading parses the whole stream into a snapshot before anything is
//! mutated, so a truncated or malformed stream leaves the layout untouched.

use bytemuck::{Pod, Zeroable};
use dockforge_core::geometry::LayoutRect;

use crate::context::DockingContext;
use crate::error::{DockError, DockResult};
use crate::node::{DockNodeFlags, DockView, IconId, NodeId, ViewId};
use crate::platform::{WindowDescriptor, WindowProvider};
use crate::types::DockNodeKind;

/// Nesting limit when parsing, far beyond any usable layout.
const MAX_DEPTH: usize = 128;

const NO_ICON: u32 = u32::MAX;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct StreamHeader {
    root_count: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct WindowRecord {
    is_main: u32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct NodeRecord {
    kind: u32,
    flags: u32,
    /// `-1` when nothing is selected.
    selected: i32,
    size_hint: f32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    child_count: u32,
    view_count: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ViewRecord {
    user_data: u64,
    content_type: u32,
    icon: u32,
    title_len: u32,
    _pad: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct ViewSnapshot {
    title: String,
    content_type: u32,
    icon: Option<IconId>,
    user_data: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct NodeSnapshot {
    kind: DockNodeKind,
    flags: DockNodeFlags,
    selected: Option<usize>,
    size_hint: f32,
    rect: LayoutRect,
    views: Vec<ViewSnapshot>,
    children: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
struct WindowSnapshot {
    is_main: bool,
    rect: LayoutRect,
    root: NodeSnapshot,
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> DockResult<&'a [u8]> {
        let available = self.bytes.len() - self.offset;
        if len > available {
            return Err(DockError::Truncated { needed: len, available });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read<T: Pod>(&mut self) -> DockResult<T> {
        let bytes = self.take(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    fn is_empty(&self) -> bool {
        self.offset == self.bytes.len()
    }
}

fn parse(bytes: &[u8]) -> DockResult<Vec<WindowSnapshot>> {
    let mut reader = Reader::new(bytes);
    let header: StreamHeader = reader.read()?;

    let mut windows = Vec::new();
    for _ in 0..header.root_count {
        let record: WindowRecord = reader.read()?;
        let root = parse_node(&mut reader, true, 0)?;
        windows.push(WindowSnapshot {
            is_main: record.is_main != 0,
            rect: LayoutRect::new(record.x, record.y, record.width, record.height),
            root,
        });
    }

    if !reader.is_empty() {
        return Err(DockError::MalformedStream("trailing bytes after last root"));
    }
    if windows.iter().filter(|w| w.is_main).count() > 1 {
        return Err(DockError::MalformedStream("more than one main window"));
    }
    Ok(windows)
}

fn parse_node(reader: &mut Reader<'_>, is_root: bool, depth: usize) -> DockResult<NodeSnapshot> {
    if depth > MAX_DEPTH {
        return Err(DockError::MalformedStream("tree nesting too deep"));
    }

    let record: NodeRecord = reader.read()?;
    let kind = u8::try_from(record.kind)
        .ok()
        .and_then(DockNodeKind::from_raw)
        .ok_or(DockError::MalformedStream("unknown node kind"))?;
    let flags =
        DockNodeFlags::from_bits(record.flags).ok_or(DockError::MalformedStream("unknown node flags"))?;

    let child_count = record.child_count as usize;
    let view_count = record.view_count as usize;
    let shape_ok = match kind {
        DockNodeKind::None => is_root && child_count == 0 && view_count == 0,
        DockNodeKind::Tabs => child_count == 0 && (is_root || view_count > 0),
        DockNodeKind::Vertical | DockNodeKind::Horizontal => child_count >= 2 && view_count == 0,
    };
    if !shape_ok {
        return Err(DockError::MalformedStream("node shape does not match its kind"));
    }

    let selected = match record.selected {
        -1 if view_count == 0 => None,
        index if index >= 0 && (index as usize) < view_count => Some(index as usize),
        _ => return Err(DockError::MalformedStream("selected tab out of range")),
    };

    let mut views = Vec::new();
    for _ in 0..view_count {
        let view: ViewRecord = reader.read()?;
        let title = reader.take(view.title_len as usize)?;
        let title = std::str::from_utf8(title)
            .map_err(|_| DockError::MalformedStream("view title is not UTF-8"))?
            .to_owned();
        views.push(ViewSnapshot {
            title,
            content_type: view.content_type,
            icon: (view.icon != NO_ICON).then_some(IconId(view.icon)),
            user_data: view.user_data,
        });
    }

    let mut children = Vec::new();
    for _ in 0..child_count {
        let child = parse_node(reader, false, depth + 1)?;
        if child.kind == kind {
            return Err(DockError::MalformedStream("split child has its parent's kind"));
        }
        children.push(child);
    }

    Ok(NodeSnapshot {
        kind,
        flags,
        selected,
        size_hint: record.size_hint,
        rect: LayoutRect::new(record.x, record.y, record.width, record.height),
        views,
        children,
    })
}

impl DockingContext {
    /// Serialize every root window, bottom-most first.
    ///
    /// Window records take the outer rectangle reported by `platform`, so
    /// the stream is complete even before the first layout pass.
    pub fn save(&self, platform: &dyn WindowProvider) -> Vec<u8> {
        let mut out = Vec::new();
        let header = StreamHeader {
            root_count: self.registry.len() as u32,
        };
        out.extend_from_slice(bytemuck::bytes_of(&header));

        for (handle, root) in self.registry.iter() {
            let rect = platform.window_rect(handle).unwrap_or_else(|| {
                tracing::warn!("no rectangle for window {handle:?}, saving its layout rect");
                self.tree.node(root).map_or(LayoutRect::ZERO, |n| n.rect)
            });
            let record = WindowRecord {
                is_main: self.registry.is_main(handle) as u32,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            };
            out.extend_from_slice(bytemuck::bytes_of(&record));
            self.write_node(root, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut Vec<u8>) {
        let Some(node) = self.tree.node(id) else { return };
        let record = NodeRecord {
            kind: node.kind.to_raw() as u32,
            flags: node.flags.bits(),
            selected: node.selected_tab.map_or(-1, |index| index as i32),
            size_hint: node.size_hint,
            x: node.rect.x,
            y: node.rect.y,
            width: node.rect.width,
            height: node.rect.height,
            child_count: node.children.len() as u32,
            view_count: node.views.len() as u32,
        };
        out.extend_from_slice(bytemuck::bytes_of(&record));

        for &view in &node.views {
            let Some(view) = self.tree.view(view) else { continue };
            let record = ViewRecord {
                user_data: view.user_data,
                content_type: view.content_type,
                icon: view.icon.map_or(NO_ICON, |icon| icon.0),
                title_len: view.title.len() as u32,
                _pad: 0,
            };
            out.extend_from_slice(bytemuck::bytes_of(&record));
            out.extend_from_slice(view.title.as_bytes());
        }
        for &child in &node.children {
            self.write_node(child, out);
        }
    }

    /// Replace the whole layout with the one in `bytes`.
    ///
    /// Returns the views created from the stream in stream order. Views of
    /// the replaced layout are orphaned, not destroyed. On error nothing
    /// changes, including native windows.
    pub fn load(&mut self, platform: &mut dyn WindowProvider, bytes: &[u8]) -> DockResult<Vec<ViewId>> {
        let windows = parse(bytes)?;
        let main = self.registry.main();

        // Create every native window up front so a failure can be undone.
        let mut handles = Vec::with_capacity(windows.len());
        for window in &windows {
            let handle = match (window.is_main, main) {
                (true, Some(main)) => main,
                _ => {
                    let title = first_title(&window.root).unwrap_or("Dockforge").to_owned();
                    match platform.create_window(&WindowDescriptor::new(title, window.rect)) {
                        Ok(handle) => handle,
                        Err(err) => {
                            for &created in &handles {
                                if Some(created) != main {
                                    platform.destroy_window(created);
                                }
                            }
                            tracing::warn!("layout load aborted: {err}");
                            return Err(err);
                        }
                    }
                }
            };
            handles.push(handle);
        }

        self.drag.cancel();
        platform.release_capture();
        let old_roots: Vec<_> = self.registry.iter().map(|(_, root)| root).collect();
        for root in old_roots {
            self.teardown_root(platform, root);
        }

        let mut created = Vec::new();
        for (window, handle) in windows.iter().zip(handles) {
            let root = match self.registry.root_for(handle) {
                Some(root) => root,
                None => {
                    let mut node = crate::node::DockNode::new(DockNodeKind::None);
                    node.native_window = Some(handle);
                    self.tree.insert_node(node)
                }
            };
            self.registry.register(handle, root);
            self.build_node(root, &window.root, &mut created);
        }

        tracing::info!(
            "loaded layout with {} windows and {} views",
            self.registry.len(),
            created.len()
        );
        self.debug_validate();
        Ok(created)
    }

    fn build_node(&mut self, id: NodeId, snapshot: &NodeSnapshot, created: &mut Vec<ViewId>) {
        for view in &snapshot.views {
            let mut data = DockView::new(view.title.clone())
                .content_type(view.content_type)
                .user_data(view.user_data);
            data.icon = view.icon;
            data.node = Some(id);
            let view = self.tree.insert_view(data);
            created.push(view);
            if let Some(node) = self.tree.node_mut(id) {
                node.views.push(view);
            }
        }

        if let Some(node) = self.tree.node_mut(id) {
            node.kind = snapshot.kind;
            node.flags = snapshot.flags;
            node.selected_tab = snapshot.selected;
            node.size_hint = snapshot.size_hint;
            node.rect = snapshot.rect;
        }

        for (index, child) in snapshot.children.iter().enumerate() {
            let child_id = self.tree.insert_node(crate::node::DockNode::new(child.kind));
            if self.tree.attach_child(id, index, child_id).is_ok() {
                self.build_node(child_id, child, created);
            }
        }
    }
}

fn first_title(node: &NodeSnapshot) -> Option<&str> {
    node.views
        .first()
        .map(|v| v.title.as_str())
        .or_else(|| node.children.iter().find_map(first_title))
}
