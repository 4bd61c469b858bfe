//! Text dumps of the dock tree for logging and test failures.

use std::fmt::Write;

use crate::context::DockingContext;
use crate::node::NodeId;
use crate::tree::DockTree;
use crate::types::DockNodeKind;

impl DockTree {
    /// Render the subtree under `root` as an ASCII tree.
    ///
    /// ```text
    ///  Horizontal hint=1.00 [0,0 640x480]
    ///  ├─ Tabs hint=0.50 [0,0 318x480] *Scene* | Console
    ///  └─ Tabs hint=0.50 [322,0 318x480] *Inspector*
    /// ```
    pub fn draw_tree(&self, root: NodeId) -> String {
        let mut out = String::new();
        if self.contains_node(root) {
            ascii_tree::write_tree(&mut out, &self.ascii_node(root)).ok();
        }
        out
    }

    fn ascii_node(&self, id: NodeId) -> ascii_tree::Tree {
        let Some(node) = self.node(id) else {
            return ascii_tree::Tree::Leaf(vec![format!("<dangling {id:?}>")]);
        };

        let r = node.rect;
        let mut desc = format!(
            "{:?} hint={:.2} [{},{} {}x{}]",
            node.kind, node.size_hint, r.x, r.y, r.width, r.height
        );
        if !node.flags.is_empty() {
            write!(desc, " {:?}", node.flags).ok();
        }

        if node.kind == DockNodeKind::Tabs {
            let titles: Vec<_> = node
                .views
                .iter()
                .enumerate()
                .map(|(index, &view)| {
                    let title = self.view(view).map_or("?", |v| v.title.as_str());
                    if node.selected_tab == Some(index) {
                        format!("*{title}*")
                    } else {
                        title.to_owned()
                    }
                })
                .collect();
            write!(desc, " {}", titles.join(" | ")).ok();
        }

        if node.children.is_empty() {
            ascii_tree::Tree::Leaf(vec![desc])
        } else {
            let children = node.children.iter().map(|&c| self.ascii_node(c)).collect();
            ascii_tree::Tree::Node(desc, children)
        }
    }
}

impl DockingContext {
    /// Dump every root window, bottom-most first.
    pub fn draw_tree(&self) -> String {
        let mut out = String::new();
        for (handle, root) in self.registry.iter() {
            let main = if self.registry.is_main(handle) { " (main)" } else { "" };
            writeln!(out, "window {}{main}", handle.0).ok();
            out.push_str(&self.tree.draw_tree(root));
        }
        out
    }

    /// Log the tree at debug level.
    pub fn log_tree(&self) {
        tracing::debug!("dock tree:\n{}", self.draw_tree());
    }
}

#[cfg(test)]
mod tests {
    use crate::context::DockingContext;
    use crate::node::DockView;
    use crate::platform::{HeadlessWindowProvider, WindowDescriptor};
    use crate::types::DockSide;

    #[test]
    fn test_draw_tree_lists_tabs_and_selection() {
        let mut platform = HeadlessWindowProvider::new();
        let handle = platform.open(&WindowDescriptor::default());
        let mut ctx = DockingContext::default();
        let root = ctx.register_main_window(handle).unwrap();
        let scene = ctx.create_view(DockView::new("Scene"));
        let console = ctx.create_view(DockView::new("Console"));
        let inspector = ctx.create_view(DockView::new("Inspector"));
        ctx.dock(&mut platform, scene, root, DockSide::AsTab, 0).unwrap();
        ctx.dock(&mut platform, console, root, DockSide::AsTab, 1).unwrap();
        ctx.dock(&mut platform, inspector, root, DockSide::Right, 0).unwrap();

        let dump = ctx.draw_tree();
        assert!(dump.starts_with(&format!("window {} (main)", handle.0)));
        assert!(dump.contains("Horizontal"));
        assert!(dump.contains("*Console* | Scene") || dump.contains("Scene | *Console*"));
        assert!(dump.contains("*Inspector*"));
        assert_eq!(dump.matches("Tabs").count(), 2);
    }
}
