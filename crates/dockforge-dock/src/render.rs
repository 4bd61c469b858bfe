//! Render and hook interfaces driven once per frame.
//!
//! The engine only describes chrome: container bounds, tab strips, preview
//! outlines and text boxes. Pixel output is entirely up to the
//! [`DockRenderer`] implementation.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::profiling::{profile_function, profile_scope};

use crate::context::DockingContext;
use crate::layout::{content_rect, tab_bar_rect, tab_rects};
use crate::node::{DockView, IconId, NodeId, ViewId};
use crate::types::{DockNodeKind, SplitDirection};

/// One tab in a [`TabStrip`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem<'a> {
    pub view: ViewId,
    pub title: &'a str,
    pub icon: Option<IconId>,
    pub rect: LayoutRect,
    pub selected: bool,
}

/// Tab headers of a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct TabStrip<'a> {
    pub node: NodeId,
    pub rect: LayoutRect,
    pub tabs: Vec<TabItem<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Where a dragged tab would land.
    DropPreview,
    /// Grip under an active resize.
    ResizeGrip,
}

/// Immediate-mode drawing surface for dock chrome.
pub trait DockRenderer {
    fn begin_container(&mut self, node: NodeId, rect: LayoutRect);

    fn end_container(&mut self, node: NodeId);

    fn draw_tab_strip(&mut self, strip: &TabStrip<'_>);

    fn draw_highlight(&mut self, rect: LayoutRect, kind: HighlightKind);

    fn draw_text(&mut self, rect: LayoutRect, text: &str);
}

/// Application callbacks invoked by the frame driver.
///
/// Per frame the order is: `before_frame`, then for every root from
/// bottom-most to top-most `chrome_top`, `chrome_left`, `chrome_right`,
/// `chrome_bottom` followed by `view_content` for the selected view of each
/// leaf in pre-order, then the drag preview, then `after_frame`.
pub trait DockHooks {
    #[allow(unused_variables)]
    fn before_frame(&mut self, frame: u64) {}

    #[allow(unused_variables)]
    fn chrome_top(&mut self, root: NodeId, rect: LayoutRect, renderer: &mut dyn DockRenderer) {}

    #[allow(unused_variables)]
    fn chrome_left(&mut self, root: NodeId, rect: LayoutRect, renderer: &mut dyn DockRenderer) {}

    #[allow(unused_variables)]
    fn chrome_right(&mut self, root: NodeId, rect: LayoutRect, renderer: &mut dyn DockRenderer) {}

    #[allow(unused_variables)]
    fn chrome_bottom(&mut self, root: NodeId, rect: LayoutRect, renderer: &mut dyn DockRenderer) {}

    /// Draw the content of the selected view of a leaf.
    #[allow(unused_variables)]
    fn view_content(
        &mut self,
        view: ViewId,
        data: &DockView,
        rect: LayoutRect,
        renderer: &mut dyn DockRenderer,
    ) {
    }

    #[allow(unused_variables)]
    fn after_frame(&mut self, frame: u64) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl DockHooks for NoHooks {}

/// A renderer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl DockRenderer for NullRenderer {
    fn begin_container(&mut self, _node: NodeId, _rect: LayoutRect) {}
    fn end_container(&mut self, _node: NodeId) {}
    fn draw_tab_strip(&mut self, _strip: &TabStrip<'_>) {}
    fn draw_highlight(&mut self, _rect: LayoutRect, _kind: HighlightKind) {}
    fn draw_text(&mut self, _rect: LayoutRect, _text: &str) {}
}

impl DockingContext {
    /// Emit chrome for every root and invoke the hooks in their fixed order.
    pub fn paint(&self, renderer: &mut dyn DockRenderer, hooks: &mut dyn DockHooks) {
        profile_function!();
        let frame = self.frame.index;
        hooks.before_frame(frame);

        for (_, root) in self.registry.iter() {
            let Some(rect) = self.tree.node(root).map(|n| n.rect) else {
                continue;
            };
            hooks.chrome_top(root, rect, renderer);
            hooks.chrome_left(root, rect, renderer);
            hooks.chrome_right(root, rect, renderer);
            hooks.chrome_bottom(root, rect, renderer);

            profile_scope!("paint_root");
            for leaf in self.tree.leaves(root) {
                self.paint_leaf(leaf, renderer, hooks);
            }
        }

        if let Some(preview) = self.drag.preview()
            && let Some(outline) = self.preview_outline(preview)
        {
            renderer.draw_highlight(outline, HighlightKind::DropPreview);
        }
        if let Some(drag) = self.drag.resize_drag()
            && let Some(first) = self.tree.node(drag.grip.first)
        {
            let rect = first.rect;
            let grip = self.config.grip_size;
            let band = match drag.grip.direction {
                SplitDirection::Horizontal => {
                    LayoutRect::new(rect.right() - grip * 0.5, rect.y, grip, rect.height)
                }
                SplitDirection::Vertical => {
                    LayoutRect::new(rect.x, rect.bottom() - grip * 0.5, rect.width, grip)
                }
            };
            renderer.draw_highlight(band, HighlightKind::ResizeGrip);
        }

        hooks.after_frame(frame);
    }

    fn paint_leaf(&self, leaf: NodeId, renderer: &mut dyn DockRenderer, hooks: &mut dyn DockHooks) {
        let Some(node) = self.tree.node(leaf) else { return };
        renderer.begin_container(leaf, node.rect);

        if node.kind == DockNodeKind::Tabs {
            let selected = node.selected_tab;
            let tabs = node
                .views
                .iter()
                .zip(tab_rects(&self.tree, leaf, &self.config))
                .enumerate()
                .filter_map(|(index, (&view, rect))| {
                    let data = self.tree.view(view)?;
                    Some(TabItem {
                        view,
                        title: data.title.as_str(),
                        icon: data.icon,
                        rect,
                        selected: selected == Some(index),
                    })
                })
                .collect();
            renderer.draw_tab_strip(&TabStrip {
                node: leaf,
                rect: tab_bar_rect(node.rect, &self.config),
                tabs,
            });

            if let Some(view) = node.selected_view()
                && let Some(data) = self.tree.view(view)
            {
                hooks.view_content(view, data, content_rect(node.rect, &self.config), renderer);
            }
        }

        renderer.end_container(leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessWindowProvider, WindowDescriptor};
    use crate::types::DockSide;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl DockRenderer for Log {
        fn begin_container(&mut self, _node: NodeId, _rect: LayoutRect) {
            self.0.push("begin".into());
        }
        fn end_container(&mut self, _node: NodeId) {
            self.0.push("end".into());
        }
        fn draw_tab_strip(&mut self, strip: &TabStrip<'_>) {
            let titles: Vec<_> = strip.tabs.iter().map(|t| t.title).collect();
            self.0.push(format!("strip {}", titles.join(",")));
        }
        fn draw_highlight(&mut self, _rect: LayoutRect, _kind: HighlightKind) {
            self.0.push("highlight".into());
        }
        fn draw_text(&mut self, _rect: LayoutRect, text: &str) {
            self.0.push(format!("text {text}"));
        }
    }

    struct Hooks;

    impl DockHooks for Hooks {
        fn chrome_top(&mut self, _root: NodeId, _rect: LayoutRect, renderer: &mut dyn DockRenderer) {
            renderer.draw_text(LayoutRect::ZERO, "top");
        }

        fn view_content(&mut self, _view: ViewId, data: &DockView, rect: LayoutRect, renderer: &mut dyn DockRenderer) {
            renderer.draw_text(rect, data.title());
        }
    }

    #[test]
    fn test_paint_order() {
        let mut platform = HeadlessWindowProvider::new();
        let handle = platform.open(&WindowDescriptor::default());
        let mut ctx = DockingContext::default();
        let root = ctx.register_main_window(handle).unwrap();
        let a = ctx.create_view(DockView::new("A"));
        let b = ctx.create_view(DockView::new("B"));
        ctx.dock(&mut platform, a, root, DockSide::AsTab, 0).unwrap();
        ctx.dock(&mut platform, b, root, DockSide::Bottom, 0).unwrap();
        ctx.compute_layout(&platform);

        let mut log = Log::default();
        ctx.paint(&mut log, &mut Hooks);
        assert_eq!(
            log.0,
            vec![
                "text top", "begin", "strip A", "text A", "end", "begin", "strip B", "text B", "end"
            ]
        );
    }
}
