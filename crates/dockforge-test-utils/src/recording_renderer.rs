//! Renderer that records every call for ordering assertions.

use dockforge_core::geometry::LayoutRect;
use dockforge_dock::{DockRenderer, HighlightKind, NodeId, TabStrip, ViewId};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Begin(NodeId, LayoutRect),
    End(NodeId),
    TabStrip {
        node: NodeId,
        tabs: Vec<ViewId>,
        selected: Option<ViewId>,
    },
    Highlight(LayoutRect, HighlightKind),
    Text(LayoutRect, String),
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Highlights of the given kind, in draw order.
    pub fn highlights(&self, kind: HighlightKind) -> Vec<LayoutRect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Highlight(rect, k) if *k == kind => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Text drawn through [`DockRenderer::draw_text`], in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Text(_, text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn containers(&self) -> Vec<NodeId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Begin(node, _) => Some(*node),
                _ => None,
            })
            .collect()
    }
}

impl DockRenderer for RecordingRenderer {
    fn begin_container(&mut self, node: NodeId, rect: LayoutRect) {
        self.calls.push(RenderCall::Begin(node, rect));
    }

    fn end_container(&mut self, node: NodeId) {
        self.calls.push(RenderCall::End(node));
    }

    fn draw_tab_strip(&mut self, strip: &TabStrip<'_>) {
        self.calls.push(RenderCall::TabStrip {
            node: strip.node,
            tabs: strip.tabs.iter().map(|t| t.view).collect(),
            selected: strip.tabs.iter().find(|t| t.selected).map(|t| t.view),
        });
    }

    fn draw_highlight(&mut self, rect: LayoutRect, kind: HighlightKind) {
        self.calls.push(RenderCall::Highlight(rect, kind));
    }

    fn draw_text(&mut self, rect: LayoutRect, text: &str) {
        self.calls.push(RenderCall::Text(rect, text.to_owned()));
    }
}
