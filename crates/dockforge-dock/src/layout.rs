//! Proportional layout solver and tab strip geometry.
//!
//! Rectangles are derived state: every pass recomputes them top-down from the
//! root client area and the per-node size hints. Hints are weights, not pixel
//! sizes. A child with an unset hint (`<= 0`) first receives the even share,
//! which is written back so the next pass sees a stable value.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::profiling::profile_function;

use crate::config::DockingConfig;
use crate::node::NodeId;
use crate::tree::{DockTree, even_share};
use crate::types::SplitDirection;

/// Horizontal padding on each side of a tab title.
pub const TAB_PADDING: f32 = 8.0;

/// Font size used to estimate tab title width.
pub const TAB_FONT_SIZE: f32 = 11.0;

/// Character width factor for estimating tab text width.
pub(crate) const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Lay out the subtree under `root` inside `rect`.
pub fn layout_subtree(tree: &mut DockTree, root: NodeId, rect: LayoutRect, config: &DockingConfig) {
    profile_function!();
    let mut stack = vec![(root, rect)];

    while let Some((id, rect)) = stack.pop() {
        let Some(node) = tree.node_mut(id) else { continue };
        node.rect = rect;

        let Some(direction) = node.kind.split_direction() else {
            continue;
        };
        let children = node.children.clone();
        let rects = split_rects(tree, &children, rect, direction, config.split_gap);
        stack.extend(children.into_iter().zip(rects).rev());
    }
}

/// Resolve hints and distribute `rect` among `children` along `direction`.
fn split_rects(
    tree: &mut DockTree,
    children: &[NodeId],
    rect: LayoutRect,
    direction: SplitDirection,
    gap: f32,
) -> Vec<LayoutRect> {
    let hints: Vec<f32> = children
        .iter()
        .map(|&c| tree.node(c).map_or(0.0, |n| n.size_hint))
        .collect();
    let fill = even_share(hints.iter().copied());

    let mut total = 0.0;
    for &child in children {
        if let Some(node) = tree.node_mut(child) {
            if node.size_hint <= 0.0 {
                node.size_hint = fill;
            }
            total += node.size_hint;
        }
    }

    let (start, span) = match direction {
        SplitDirection::Horizontal => (rect.x, rect.width),
        SplitDirection::Vertical => (rect.y, rect.height),
    };
    let gaps = gap * children.len().saturating_sub(1) as f32;
    let available = (span - gaps).max(0.0);
    let end = start + span;

    let mut offset = start;
    let mut rects = Vec::with_capacity(children.len());
    for (i, &child) in children.iter().enumerate() {
        let hint = tree.node(child).map_or(fill, |n| n.size_hint);
        let extent = if i + 1 == children.len() {
            // Last child absorbs rounding so the children tile the span.
            (end - offset).max(0.0)
        } else if total > 0.0 {
            hint / total * available
        } else {
            0.0
        };

        rects.push(match direction {
            SplitDirection::Horizontal => LayoutRect::new(offset, rect.y, extent, rect.height),
            SplitDirection::Vertical => LayoutRect::new(rect.x, offset, rect.width, extent),
        });
        offset += extent + gap;
    }
    rects
}

/// Tab strip across the top of a leaf.
pub fn tab_bar_rect(rect: LayoutRect, config: &DockingConfig) -> LayoutRect {
    LayoutRect::new(rect.x, rect.y, rect.width, config.tab_bar_height.min(rect.height))
}

/// Area below the tab strip where the selected view draws.
pub fn content_rect(rect: LayoutRect, config: &DockingConfig) -> LayoutRect {
    let bar = config.tab_bar_height.min(rect.height);
    LayoutRect::new(rect.x, rect.y + bar, rect.width, rect.height - bar)
}

/// Estimated width of a tab showing `title`, before clamping.
pub fn estimate_tab_width(title: &str) -> f32 {
    let char_width = TAB_FONT_SIZE * CHAR_WIDTH_FACTOR;
    title.chars().count() as f32 * char_width + TAB_PADDING * 2.0
}

/// Rectangles of each tab in a leaf, left to right.
///
/// Widths are clamped to the configured range, then shrunk evenly if the
/// strip overflows.
pub fn tab_rects(tree: &DockTree, node: NodeId, config: &DockingConfig) -> Vec<LayoutRect> {
    let Some(leaf) = tree.node(node) else {
        return Vec::new();
    };
    let bar = tab_bar_rect(leaf.rect, config);

    let mut widths: Vec<f32> = leaf
        .views
        .iter()
        .map(|&v| {
            let title = tree.view(v).map_or("", |v| v.title.as_str());
            estimate_tab_width(title).clamp(config.tab_min_width, config.tab_max_width)
        })
        .collect();

    let total: f32 = widths.iter().sum();
    if total > bar.width && total > 0.0 {
        let scale = bar.width.max(0.0) / total;
        widths.iter_mut().for_each(|w| *w *= scale);
    }

    let mut x = bar.x;
    widths
        .into_iter()
        .map(|width| {
            let rect = LayoutRect::new(x, bar.y, width, bar.height);
            x += width;
            rect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DockNode, DockView};
    use crate::types::DockNodeKind;

    fn build(tree: &mut DockTree, kind: DockNodeKind, hints: &[f32]) -> (NodeId, Vec<NodeId>) {
        let root = tree.insert_node(DockNode::new(kind));
        let children: Vec<_> = hints
            .iter()
            .enumerate()
            .map(|(i, &hint)| {
                let mut node = DockNode::new(DockNodeKind::Tabs);
                node.size_hint = hint;
                let id = tree.insert_node(node);
                tree.attach_child(root, i, id).unwrap();
                id
            })
            .collect();
        (root, children)
    }

    #[test]
    fn test_proportional_split_with_gap() {
        let mut tree = DockTree::new();
        let (root, children) = build(&mut tree, DockNodeKind::Horizontal, &[1.0, 3.0]);
        let config = DockingConfig::default();
        layout_subtree(&mut tree, root, LayoutRect::new(0.0, 0.0, 404.0, 100.0), &config);

        let left = tree.node(children[0]).unwrap().rect();
        let right = tree.node(children[1]).unwrap().rect();
        assert_eq!(left, LayoutRect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(right, LayoutRect::new(104.0, 0.0, 300.0, 100.0));
    }

    #[test]
    fn test_unset_hints_get_even_share() {
        let mut tree = DockTree::new();
        let (root, children) = build(&mut tree, DockNodeKind::Vertical, &[2.0, 0.0, 0.0]);
        let config = DockingConfig::default().split_gap(0.0);
        layout_subtree(&mut tree, root, LayoutRect::new(0.0, 0.0, 50.0, 300.0), &config);

        for &child in &children {
            assert_eq!(tree.node(child).unwrap().size_hint(), 2.0);
            assert_eq!(tree.node(child).unwrap().rect().height, 100.0);
        }
        assert_eq!(tree.node(children[2]).unwrap().rect().y, 200.0);
    }

    #[test]
    fn test_nested_layout_inherits_cross_axis() {
        let mut tree = DockTree::new();
        let (root, children) = build(&mut tree, DockNodeKind::Horizontal, &[1.0, 1.0]);
        let inner = children[1];
        tree.node_mut(inner).unwrap().kind = DockNodeKind::Vertical;
        for i in 0..2 {
            let id = tree.insert_node(DockNode::new(DockNodeKind::Tabs));
            tree.attach_child(inner, i, id).unwrap();
        }
        let config = DockingConfig::default().split_gap(0.0);
        layout_subtree(&mut tree, root, LayoutRect::new(0.0, 0.0, 200.0, 100.0), &config);

        let grandchildren = tree.node(inner).unwrap().children().to_vec();
        let top = tree.node(grandchildren[0]).unwrap().rect();
        assert_eq!(top, LayoutRect::new(100.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_tab_rects_clamp_and_shrink() {
        let mut tree = DockTree::new();
        let leaf = tree.insert_node(DockNode::new(DockNodeKind::Tabs));
        for title in ["a", "a very long title that keeps going and going past the max"] {
            let view = tree.insert_view(DockView::new(title));
            tree.node_mut(leaf).unwrap().insert_view(usize::MAX, view);
        }
        let config = DockingConfig::default();

        tree.node_mut(leaf).unwrap().rect = LayoutRect::new(0.0, 0.0, 1000.0, 300.0);
        let rects = tab_rects(&tree, leaf, &config);
        assert_eq!(rects[0].width, 48.0);
        assert_eq!(rects[1].width, 200.0);
        assert_eq!(rects[1].x, 48.0);
        assert_eq!(rects[0].height, 24.0);

        tree.node_mut(leaf).unwrap().rect = LayoutRect::new(0.0, 0.0, 124.0, 300.0);
        let rects = tab_rects(&tree, leaf, &config);
        let total: f32 = rects.iter().map(|r| r.width).sum();
        assert!((total - 124.0).abs() < 1e-3);
    }
}
