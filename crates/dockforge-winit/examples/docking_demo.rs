//! Opens a main window with a few docked panels.
//!
//! Drag tabs to rearrange them, drag a tab outside every window to float it,
//! and drag the gaps between panes to resize. Chrome is logged instead of
//! drawn; run with `RUST_LOG=docking_demo=trace` to see it.

use dockforge_core::geometry::LayoutRect;
use dockforge_core::logging;
use dockforge_dock::{
    DockHooks, DockPreview, DockRenderer, DockSide, DockView, DockingConfig, DockingContext,
    HighlightKind, NodeId, TabStrip, ViewId, WindowDescriptor, WindowProvider,
};
use dockforge_winit::{DockApp, run_app};

#[derive(Default)]
struct TraceRenderer;

impl DockRenderer for TraceRenderer {
    fn begin_container(&mut self, node: NodeId, rect: LayoutRect) {
        tracing::trace!("begin {node:?} {rect:?}");
    }

    fn end_container(&mut self, node: NodeId) {
        tracing::trace!("end {node:?}");
    }

    fn draw_tab_strip(&mut self, strip: &TabStrip<'_>) {
        let titles: Vec<_> = strip.tabs.iter().map(|tab| tab.title).collect();
        tracing::trace!("tabs {:?}: {}", strip.node, titles.join(" | "));
    }

    fn draw_highlight(&mut self, rect: LayoutRect, kind: HighlightKind) {
        tracing::trace!("{kind:?} at {rect:?}");
    }

    fn draw_text(&mut self, _rect: LayoutRect, text: &str) {
        tracing::trace!("text '{text}'");
    }
}

#[derive(Default)]
struct PanelHooks {
    frames: u64,
}

impl DockHooks for PanelHooks {
    fn view_content(
        &mut self,
        _view: ViewId,
        data: &DockView,
        rect: LayoutRect,
        renderer: &mut dyn DockRenderer,
    ) {
        renderer.draw_text(rect, data.title());
    }

    fn after_frame(&mut self, frame: u64) {
        self.frames = frame;
    }
}

#[derive(Default)]
struct Demo {
    renderer: TraceRenderer,
    hooks: PanelHooks,
}

impl DockApp for Demo {
    fn on_start(
        &mut self,
        ctx: &mut DockingContext,
        platform: &mut dyn WindowProvider,
        main_root: NodeId,
    ) {
        let scene = ctx.create_view(DockView::new("Scene"));
        let hierarchy = ctx.create_view(DockView::new("Hierarchy"));
        let inspector = ctx.create_view(DockView::new("Inspector"));
        let console = ctx.create_view(DockView::new("Console"));
        let output = ctx.create_view(DockView::new("Output"));

        let layout = [
            (scene, DockSide::AsTab),
            (hierarchy, DockSide::Left),
            (inspector, DockSide::Right),
            (console, DockSide::Bottom),
        ];
        for (view, side) in layout {
            let target = match side {
                DockSide::AsTab => main_root,
                _ => ctx.view_node(scene).unwrap_or(main_root),
            };
            if let Err(err) = ctx.dock(platform, view, target, side, 0) {
                tracing::error!("failed to dock {view:?}: {err}");
            }
        }
        if let Some(node) = ctx.view_node(console)
            && let Err(err) = ctx.dock(platform, output, node, DockSide::AsTab, 1)
        {
            tracing::error!("failed to dock output: {err}");
        }

        ctx.log_tree();
    }

    fn frame_targets(&mut self) -> (&mut dyn DockRenderer, &mut dyn DockHooks) {
        (&mut self.renderer, &mut self.hooks)
    }

    fn on_committed(&mut self, ctx: &DockingContext, preview: DockPreview) {
        tracing::info!("drag committed: {preview:?}");
        ctx.log_tree();
    }

    fn on_exit(&mut self, ctx: &mut DockingContext, platform: &mut dyn WindowProvider) {
        tracing::info!(
            "exiting after {} frames, layout is {} bytes",
            self.hooks.frames,
            ctx.save(platform).len()
        );
    }
}

fn main() {
    logging::init();

    let descriptor = WindowDescriptor::new("Dockforge", LayoutRect::new(100.0, 100.0, 1280.0, 800.0));
    if let Err(err) = run_app(descriptor, DockingConfig::new(), || Box::new(Demo::default())) {
        tracing::error!("event loop failed: {err}");
    }
}
