//! Shared fixtures and assertions.

use std::sync::Once;

use dockforge_core::geometry::LayoutRect;
use dockforge_dock::{
    DockInput, DockSide, DockView, DockingConfig, DockingContext, InputResponse, NativeWindowHandle,
    NoHooks, NodeId, ViewId,
};

use crate::recording_platform::RecordingWindowProvider;
use crate::recording_renderer::RecordingRenderer;

static LOGGING: Once = Once::new();

/// Filter used by tests when `RUST_LOG` is unset or empty.
const TEST_FILTER: &str = "warn,dockforge_dock=debug";

/// Install a test subscriber once. Honours `RUST_LOG`.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        dockforge_core::logging::init_with_filter(test_filter(rust_log.as_deref()));
    });
}

fn test_filter(rust_log: Option<&str>) -> &str {
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => TEST_FILTER,
    }
}

/// A context whose main window sits at the origin.
pub struct Harness {
    pub platform: RecordingWindowProvider,
    pub renderer: RecordingRenderer,
    pub ctx: DockingContext,
    pub main: NativeWindowHandle,
    pub root: NodeId,
}

impl Harness {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, DockingConfig::default())
    }

    pub fn with_config(width: f32, height: f32, config: DockingConfig) -> Self {
        init_test_logging();
        let mut platform = RecordingWindowProvider::new();
        let main = platform.open(&dockforge_dock::WindowDescriptor::new(
            "main",
            LayoutRect::new(0.0, 0.0, width, height),
        ));
        let mut ctx = DockingContext::new(config);
        let root = ctx
            .register_main_window(main)
            .expect("registering the main window cannot fail");
        Self {
            platform,
            renderer: RecordingRenderer::new(),
            ctx,
            main,
            root,
        }
    }

    /// Create a view and dock it, panicking on failure.
    pub fn dock_new(&mut self, title: &str, target: NodeId, side: DockSide) -> ViewId {
        let view = self.ctx.create_view(DockView::new(title));
        let index = self.ctx.tabs(target).len();
        self.ctx
            .dock(&mut self.platform, view, target, side, index)
            .unwrap_or_else(|err| panic!("docking {title} failed: {err}"));
        view
    }

    /// Leaf currently hosting `view`.
    pub fn leaf(&self, view: ViewId) -> NodeId {
        self.ctx.view_node(view).expect("view is not docked")
    }

    pub fn layout(&mut self) {
        self.ctx.compute_layout(&self.platform);
    }

    /// Run one frame with `input`, recording into `self.renderer`.
    pub fn frame(&mut self, input: Option<DockInput>) -> InputResponse {
        self.renderer.clear();
        self.ctx
            .run_frame(&mut self.platform, &mut self.renderer, &mut NoHooks, input)
    }

    /// Press, move through `path`, release, one frame per event.
    pub fn drag(&mut self, from: (f32, f32), path: &[(f32, f32)]) -> InputResponse {
        self.frame(Some(DockInput::down(from.0, from.1)));
        for &(x, y) in path {
            self.frame(Some(DockInput::moved(x, y)));
        }
        let end = path.last().copied().unwrap_or(from);
        self.frame(Some(DockInput::up(end.0, end.1)))
    }

    /// Centre of the tab header for `view`.
    pub fn tab_center(&self, view: ViewId) -> (f32, f32) {
        let node = self.leaf(view);
        let index = self
            .ctx
            .tabs(node)
            .iter()
            .position(|&v| v == view)
            .expect("view is not a tab of its node");
        let rects = dockforge_dock::layout::tab_rects(self.ctx.tree(), node, self.ctx.config());
        let c = rects[index].center();
        (c.x, c.y)
    }
}

/// Panic with the tree dump when any structural invariant is broken.
#[track_caller]
pub fn assert_valid(ctx: &DockingContext) {
    let report = ctx.validate();
    assert!(report.is_ok(), "{report}\n{}", ctx.draw_tree());
}

/// Titles of every leaf of `root` in pre-order, one `Vec` per leaf.
pub fn leaf_titles(ctx: &DockingContext, root: NodeId) -> Vec<Vec<String>> {
    ctx.tree()
        .leaves(root)
        .into_iter()
        .map(|leaf| {
            ctx.tabs(leaf)
                .iter()
                .filter_map(|&v| ctx.view_title(v).map(str::to_owned))
                .collect()
        })
        .collect()
}
