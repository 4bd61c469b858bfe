//! Arena-backed dock node tree.
//!
//! Nodes and views live in two generational arenas and refer to each other by
//! handle. Parent links, child lists and the view back-reference are kept
//! consistent by every method that moves content around; callers never patch
//! them by hand.

use dockforge_core::alloc::Arena;

use crate::error::{DockError, DockResult};
use crate::node::{DockNode, DockView, NodeId, ViewId};
use crate::types::DockNodeKind;

/// A single structural invariant violation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantIssue {
    #[error("leaf {0:?} has children")]
    LeafWithChildren(NodeId),
    #[error("split {0:?} holds views")]
    SplitWithViews(NodeId),
    #[error("split {node:?} has {count} children, expected at least 2")]
    TooFewChildren { node: NodeId, count: usize },
    #[error("node {node:?} has the same kind as its parent {parent:?}")]
    SameKindAsParent { node: NodeId, parent: NodeId },
    #[error("child {child:?} of {node:?} does not exist")]
    DanglingChild { node: NodeId, child: NodeId },
    #[error("child {child:?} of {node:?} points at a different parent")]
    ParentMismatch { node: NodeId, child: NodeId },
    #[error("view {view:?} in {node:?} does not point back at it")]
    ViewBackReference { node: NodeId, view: ViewId },
    #[error("view {view:?} in {node:?} does not exist")]
    DanglingView { node: NodeId, view: ViewId },
    #[error("selected tab of {node:?} is {selected:?} with {len} views")]
    InvalidSelection {
        node: NodeId,
        selected: Option<usize>,
        len: usize,
    },
    #[error("empty leaf {0:?} is not a root")]
    EmptyNonRoot(NodeId),
    #[error("root {0:?} has no native window")]
    MissingNativeWindow(NodeId),
    #[error("root {0:?} is not registered")]
    UnregisteredRoot(NodeId),
}

/// Result of [`DockTree::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvariantReport {
    issues: Vec<InvariantIssue>,
}

impl InvariantReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[InvariantIssue] {
        &self.issues
    }

    pub(crate) fn push(&mut self, issue: InvariantIssue) {
        self.issues.push(issue);
    }
}

impl std::fmt::Display for InvariantReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "ok");
        }
        for issue in &self.issues {
            writeln!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Even-share weight for an unset hint: the mean of the positive hints, or
/// `1.0` when none are positive.
pub(crate) fn even_share(hints: impl IntoIterator<Item = f32>) -> f32 {
    let (sum, count) = hints
        .into_iter()
        .filter(|h| *h > 0.0)
        .fold((0.0, 0usize), |(sum, count), h| (sum + h, count + 1));
    if count == 0 { 1.0 } else { sum / count as f32 }
}

/// Pre-order iterator over a subtree.
pub struct PreOrder<'a> {
    tree: &'a DockTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.node(id) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(id)
    }
}

#[derive(Default)]
pub struct DockTree {
    nodes: Arena<DockNode>,
    views: Arena<DockView>,
}

impl DockTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&DockNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut DockNode> {
        self.nodes.get_mut(id.0)
    }

    pub(crate) fn try_node(&self, id: NodeId) -> DockResult<&DockNode> {
        self.node(id).ok_or(DockError::NodeNotFound(id))
    }

    pub(crate) fn try_node_mut(&mut self, id: NodeId) -> DockResult<&mut DockNode> {
        self.node_mut(id).ok_or(DockError::NodeNotFound(id))
    }

    pub fn view(&self, id: ViewId) -> Option<&DockView> {
        self.views.get(id.0)
    }

    pub(crate) fn view_mut(&mut self, id: ViewId) -> Option<&mut DockView> {
        self.views.get_mut(id.0)
    }

    pub(crate) fn try_view(&self, id: ViewId) -> DockResult<&DockView> {
        self.view(id).ok_or(DockError::ViewNotFound(id))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn contains_view(&self, id: ViewId) -> bool {
        self.views.contains(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DockNode)> + '_ {
        self.nodes.iter().map(|(h, n)| (NodeId(h), n))
    }

    pub fn views(&self) -> impl Iterator<Item = (ViewId, &DockView)> + '_ {
        self.views.iter().map(|(h, v)| (ViewId(h), v))
    }

    pub(crate) fn insert_node(&mut self, node: DockNode) -> NodeId {
        NodeId(self.nodes.insert(node))
    }

    pub(crate) fn insert_view(&mut self, view: DockView) -> ViewId {
        ViewId(self.views.insert(view))
    }

    /// Remove a view entity. The caller detaches it from its node first.
    pub(crate) fn remove_view_entity(&mut self, id: ViewId) -> Option<DockView> {
        self.views.remove(id.0)
    }

    /// Remove a single node shell without touching its relations.
    pub(crate) fn remove_node_shell(&mut self, id: NodeId) -> Option<DockNode> {
        self.nodes.remove(id.0)
    }

    /// Walk a subtree in pre-order, starting with `root` itself.
    pub fn pre_order(&self, root: NodeId) -> PreOrder<'_> {
        let stack = if self.contains_node(root) { vec![root] } else { Vec::new() };
        PreOrder { tree: self, stack }
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).and_then(|n| n.parent), move |&p| {
            self.node(p).and_then(|n| n.parent)
        })
    }

    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.contains_node(id) {
            return None;
        }
        Some(self.ancestors(id).last().unwrap_or(id))
    }

    /// Leaf nodes (`Tabs` or `None`) of a subtree, in pre-order.
    pub fn leaves(&self, root: NodeId) -> Vec<NodeId> {
        self.pre_order(root)
            .filter(|&id| self.node(id).is_some_and(|n| n.kind.is_leaf()))
            .collect()
    }

    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Insert `child` into `parent.children` at `index` (clamped).
    pub(crate) fn attach_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> DockResult<()> {
        self.try_node(child)?;
        let node = self.try_node_mut(parent)?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        self.try_node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink `child` from its parent. Returns the former parent and index.
    pub(crate) fn detach(&mut self, child: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.node(child)?.parent?;
        let node = self.node_mut(parent)?;
        let index = node.child_index_of(child)?;
        node.children.remove(index);
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
        Some((parent, index))
    }

    /// Delete a detached subtree. Views hosted in it are orphaned, not destroyed.
    pub(crate) fn delete_subtree(&mut self, root: NodeId) -> Vec<ViewId> {
        let ids: Vec<_> = self.pre_order(root).collect();
        let mut orphaned = Vec::new();
        for id in ids {
            if let Some(node) = self.remove_node_shell(id) {
                orphaned.extend(node.views);
            }
        }
        for &view in &orphaned {
            if let Some(view) = self.view_mut(view) {
                view.node = None;
            }
        }
        orphaned
    }

    /// Move kind, children, views, selection and flags from `from` into the
    /// empty node `to`. `from` is left as an empty `None` leaf.
    ///
    /// Parent link, size hint, rect and native window stay with each node.
    pub fn relocate_contents(&mut self, from: NodeId, to: NodeId) -> DockResult<()> {
        if from == to {
            return Err(DockError::DockOntoSelf);
        }
        self.try_node(from)?;
        if !self.try_node(to)?.is_empty() {
            return Err(DockError::InvalidTarget(to));
        }

        let src = self.try_node_mut(from)?;
        let kind = std::mem::take(&mut src.kind);
        let children = std::mem::take(&mut src.children);
        let views = std::mem::take(&mut src.views);
        let selected = src.selected_tab.take();
        let flags = std::mem::take(&mut src.flags);

        for &child in &children {
            if let Some(child) = self.node_mut(child) {
                child.parent = Some(to);
            }
        }
        for &view in &views {
            if let Some(view) = self.view_mut(view) {
                view.node = Some(to);
            }
        }

        let dst = self.try_node_mut(to)?;
        dst.kind = kind;
        dst.children = children;
        dst.views = views;
        dst.selected_tab = selected;
        dst.flags = flags;
        Ok(())
    }

    /// Collapse redundant structure starting at `start` and walking up to the
    /// root. Returns the number of structural changes made.
    ///
    /// A node with a single child absorbs it. A split with the same kind as
    /// its parent is spliced into the parent. Both rules are reapplied until
    /// neither matches.
    pub fn check_redundancy(&mut self, start: NodeId) -> usize {
        let mut changes = 0;
        let mut current = Some(start);

        while let Some(id) = current {
            let Some(node) = self.node(id) else { break };

            if let [child] = node.children[..] {
                self.absorb_only_child(id, child);
                changes += 1;
                continue;
            }

            let parent = node.parent;
            if let Some(parent) = parent
                && node.kind.is_split()
                && self.node(parent).is_some_and(|p| p.kind == node.kind)
            {
                self.splice_into_parent(id, parent);
                changes += 1;
                current = Some(parent);
                continue;
            }

            current = parent;
        }

        changes
    }

    fn absorb_only_child(&mut self, id: NodeId, child: NodeId) {
        tracing::trace!("absorbing only child {child:?} into {id:?}");
        if let Some(node) = self.node_mut(id) {
            node.children.clear();
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
        if let Err(err) = self.relocate_contents(child, id) {
            tracing::warn!("failed to absorb {child:?} into {id:?}: {err}");
            return;
        }
        self.remove_node_shell(child);
    }

    fn splice_into_parent(&mut self, id: NodeId, parent: NodeId) {
        tracing::trace!("splicing {id:?} into same-kind parent {parent:?}");
        let Some((_, index)) = self.detach(id) else {
            return;
        };
        let Some(node) = self.remove_node_shell(id) else {
            return;
        };

        // Children inherit the spliced node's share of the parent.
        let siblings = self
            .node(parent)
            .map(|p| p.children.iter().filter_map(|&c| self.node(c)).map(|c| c.size_hint).collect::<Vec<_>>())
            .unwrap_or_default();
        let share = if node.size_hint > 0.0 {
            node.size_hint
        } else {
            even_share(siblings)
        };
        let hints: Vec<f32> = node
            .children
            .iter()
            .filter_map(|&c| self.node(c))
            .map(|c| c.size_hint)
            .collect();
        let fill = even_share(hints.iter().copied());
        let total: f32 = hints.iter().map(|&h| if h > 0.0 { h } else { fill }).sum();

        for &child in &node.children {
            if let Some(child) = self.node_mut(child) {
                let hint = if child.size_hint > 0.0 { child.size_hint } else { fill };
                child.size_hint = hint / total * share;
                child.parent = Some(parent);
            }
        }
        if let Some(parent) = self.node_mut(parent) {
            parent.children.splice(index..index, node.children);
        }
    }

    /// Run [`check_redundancy`](Self::check_redundancy) over every node,
    /// deepest first. Returns zero on an already normalized tree.
    pub fn normalize(&mut self) -> usize {
        let roots: Vec<_> = self
            .nodes()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
            .collect();

        let mut changes = 0;
        for root in roots {
            let order: Vec<_> = self.pre_order(root).collect();
            for id in order.into_iter().rev() {
                if self.contains_node(id) {
                    changes += self.check_redundancy(id);
                }
            }
        }
        changes
    }

    /// Check the structural invariants of every node.
    pub fn validate(&self) -> InvariantReport {
        let mut report = InvariantReport::default();

        for (id, node) in self.nodes() {
            if node.kind.is_leaf() && !node.children.is_empty() {
                report.push(InvariantIssue::LeafWithChildren(id));
            }
            if node.kind.is_split() {
                if !node.views.is_empty() {
                    report.push(InvariantIssue::SplitWithViews(id));
                }
                if node.children.len() < 2 {
                    report.push(InvariantIssue::TooFewChildren {
                        node: id,
                        count: node.children.len(),
                    });
                }
            }
            if node.kind.is_leaf() && node.views.is_empty() && node.parent.is_some() {
                report.push(InvariantIssue::EmptyNonRoot(id));
            }
            if let Some(parent) = node.parent
                && node.kind.is_split()
                && self.node(parent).is_some_and(|p| p.kind == node.kind)
            {
                report.push(InvariantIssue::SameKindAsParent { node: id, parent });
            }

            for &child in &node.children {
                match self.node(child) {
                    None => report.push(InvariantIssue::DanglingChild { node: id, child }),
                    Some(c) if c.parent != Some(id) => {
                        report.push(InvariantIssue::ParentMismatch { node: id, child })
                    }
                    Some(_) => {}
                }
            }
            for &view in &node.views {
                match self.view(view) {
                    None => report.push(InvariantIssue::DanglingView { node: id, view }),
                    Some(v) if v.node != Some(id) => {
                        report.push(InvariantIssue::ViewBackReference { node: id, view })
                    }
                    Some(_) => {}
                }
            }

            let selection_ok = match node.selected_tab {
                None => node.views.is_empty(),
                Some(index) => index < node.views.len(),
            };
            if !selection_ok {
                report.push(InvariantIssue::InvalidSelection {
                    node: id,
                    selected: node.selected_tab,
                    len: node.views.len(),
                });
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DockNodeKind::*;

    fn leaf(tree: &mut DockTree, title: &str) -> NodeId {
        let id = tree.insert_node(DockNode::new(Tabs));
        let view = tree.insert_view(DockView::new(title));
        tree.node_mut(id).unwrap().insert_view(0, view);
        tree.view_mut(view).unwrap().node = Some(id);
        id
    }

    fn split(tree: &mut DockTree, kind: DockNodeKind, children: &[NodeId]) -> NodeId {
        let id = tree.insert_node(DockNode::new(kind));
        for (i, &child) in children.iter().enumerate() {
            tree.attach_child(id, i, child).unwrap();
        }
        id
    }

    #[test]
    fn test_even_share() {
        assert_eq!(even_share([0.0, 0.0]), 1.0);
        assert_eq!(even_share([2.0, 0.0, 4.0]), 3.0);
    }

    #[test]
    fn test_pre_order_and_ancestors() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let b = leaf(&mut tree, "b");
        let c = leaf(&mut tree, "c");
        let inner = split(&mut tree, Vertical, &[b, c]);
        let root = split(&mut tree, Horizontal, &[a, inner]);

        let order: Vec<_> = tree.pre_order(root).collect();
        assert_eq!(order, vec![root, a, inner, b, c]);
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![inner, root]);
        assert_eq!(tree.root_of(c), Some(root));
        assert_eq!(tree.leaves(root), vec![a, b, c]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_single_child_is_absorbed() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let root = split(&mut tree, Horizontal, &[a]);
        let view = tree.node(a).unwrap().views()[0];

        assert_eq!(tree.check_redundancy(root), 1);
        let node = tree.node(root).unwrap();
        assert_eq!(node.kind(), Tabs);
        assert_eq!(node.views(), &[view]);
        assert_eq!(tree.view(view).unwrap().node(), Some(root));
        assert!(!tree.contains_node(a));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_same_kind_child_is_spliced() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let b = leaf(&mut tree, "b");
        let c = leaf(&mut tree, "c");
        tree.node_mut(b).unwrap().size_hint = 1.0;
        tree.node_mut(c).unwrap().size_hint = 3.0;
        let inner = split(&mut tree, Horizontal, &[b, c]);
        tree.node_mut(a).unwrap().size_hint = 0.5;
        tree.node_mut(inner).unwrap().size_hint = 0.5;
        let root = split(&mut tree, Horizontal, &[a, inner]);

        assert_eq!(tree.check_redundancy(inner), 1);
        assert_eq!(tree.node(root).unwrap().children(), &[a, b, c]);
        assert_eq!(tree.node(b).unwrap().size_hint(), 0.125);
        assert_eq!(tree.node(c).unwrap().size_hint(), 0.375);
        assert!(!tree.contains_node(inner));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let b = leaf(&mut tree, "b");
        let lone = split(&mut tree, Vertical, &[b]);
        let _root = split(&mut tree, Horizontal, &[a, lone]);

        assert!(tree.normalize() > 0);
        assert!(tree.validate().is_ok());
        assert_eq!(tree.normalize(), 0);
    }

    #[test]
    fn test_relocate_rejects_occupied_target() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let b = leaf(&mut tree, "b");
        assert_eq!(tree.relocate_contents(a, b), Err(DockError::InvalidTarget(b)));
        assert_eq!(tree.relocate_contents(a, a), Err(DockError::DockOntoSelf));
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let root = split(&mut tree, Horizontal, &[a]);
        tree.node_mut(a).unwrap().selected_tab = Some(4);

        let report = tree.validate();
        assert!(!report.is_ok());
        assert!(report.issues().contains(&InvariantIssue::TooFewChildren { node: root, count: 1 }));
        assert!(report.issues().contains(&InvariantIssue::InvalidSelection {
            node: a,
            selected: Some(4),
            len: 1,
        }));
    }

    #[test]
    fn test_validate_reports_empty_pane() {
        let mut tree = DockTree::new();
        let a = leaf(&mut tree, "a");
        let empty = tree.insert_node(DockNode::new(Tabs));
        let root = split(&mut tree, Horizontal, &[a, empty]);

        let report = tree.validate();
        assert_eq!(report.issues(), &[InvariantIssue::EmptyNonRoot(empty)]);

        // An empty root pane is fine.
        let lone = tree.insert_node(DockNode::new(Tabs));
        assert!(!tree.validate().issues().contains(&InvariantIssue::EmptyNonRoot(lone)));
        assert_eq!(tree.root_of(empty), Some(root));
    }
}
