//! Event loop runner hosting a [`DockingContext`].
//!
//! The runner owns the context and every native window. Pointer events from
//! all windows are translated to screen coordinates and queued; one frame is
//! run per event-loop iteration, replaying one queued event per frame.

use dockforge_dock::{
    CursorHint, DockError, DockHooks, DockPreview, DockRenderer, DockResult, DockingConfig,
    DockingContext, NativeWindowHandle, NodeId, WindowDescriptor, WindowProvider,
};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::input::InputTranslator;
use crate::platform::{WindowMap, WinitWindowProvider, handle_of, open_window};

pub trait DockApp {
    /// Called once, after the main window is registered as `main_root`.
    ///
    /// Create views and dock them here.
    fn on_start(
        &mut self,
        ctx: &mut DockingContext,
        platform: &mut dyn WindowProvider,
        main_root: NodeId,
    );

    /// Renderer and hooks used for the next frame.
    fn frame_targets(&mut self) -> (&mut dyn DockRenderer, &mut dyn DockHooks);

    /// Called after a drag committed `preview`.
    #[allow(unused_variables)]
    fn on_committed(&mut self, ctx: &DockingContext, preview: DockPreview) {}

    /// Called when the main window is closed, before the loop exits. Every
    /// window is still open, so the layout can be saved here.
    #[allow(unused_variables)]
    fn on_exit(&mut self, ctx: &mut DockingContext, platform: &mut dyn WindowProvider) {}
}

pub type AppFactory = fn() -> Box<dyn DockApp>;

struct AppProxy {
    factory: AppFactory,
    app: Option<Box<dyn DockApp>>,
    descriptor: WindowDescriptor,
    ctx: DockingContext,
    windows: WindowMap,
    input: InputTranslator,
    main: Option<NativeWindowHandle>,
    /// Window that received the latest pointer event.
    hovered: Option<NativeWindowHandle>,
    frame_done: bool,
}

impl AppProxy {
    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_mut() else { return };

        let (renderer, hooks) = app.frame_targets();
        let mut platform = WinitWindowProvider::new(event_loop, &mut self.windows);
        let responses = self.ctx.pump(&mut platform, renderer, hooks);

        let mut redraw = false;
        let mut cursor = CursorHint::Default;
        for response in &responses {
            if let Some(preview) = response.committed {
                app.on_committed(&self.ctx, preview);
            }
            redraw |= response.consumed || response.layout_changed;
            cursor = response.cursor;
        }

        if let Some(hovered) = self.hovered {
            self.windows.set_cursor(hovered, cursor);
        }
        if redraw || !self.ctx.drag().is_idle() {
            self.windows.request_redraw_all();
        }
    }
}

impl ApplicationHandler for AppProxy {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let main = match open_window(event_loop, &mut self.windows, &self.descriptor) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!("failed to create main window: {err}");
                event_loop.exit();
                return;
            }
        };
        let root = match self.ctx.register_main_window(main) {
            Ok(root) => root,
            Err(err) => {
                tracing::error!("failed to register main window: {err}");
                event_loop.exit();
                return;
            }
        };

        let mut app = (self.factory)();
        let mut platform = WinitWindowProvider::new(event_loop, &mut self.windows);
        app.on_start(&mut self.ctx, &mut platform, root);

        self.main = Some(main);
        self.app = Some(app);
        self.windows.request_redraw_all();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.frame_done = false;
        if !self.ctx.input_queue().is_empty() {
            self.windows.request_redraw_all();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.app.is_none() {
            return;
        }
        let handle = handle_of(window_id);

        match event {
            WindowEvent::CloseRequested if self.main == Some(handle) => {
                tracing::info!("main window closed");
                if let Some(app) = self.app.as_mut() {
                    let mut platform = WinitWindowProvider::new(event_loop, &mut self.windows);
                    app.on_exit(&mut self.ctx, &mut platform);
                }
                event_loop.exit();
            }
            WindowEvent::CloseRequested => {
                // Closing a floating window orphans its views.
                if let Some(root) = self.ctx.registry().root_for(handle) {
                    let mut platform = WinitWindowProvider::new(event_loop, &mut self.windows);
                    if let Err(err) = self.ctx.delete_root(&mut platform, root) {
                        tracing::warn!("failed to close window {handle:?}: {err}");
                    }
                }
                self.windows.request_redraw_all();
            }
            WindowEvent::RedrawRequested => {
                if !self.frame_done {
                    self.frame_done = true;
                    self.run_frame(event_loop);
                }
            }
            WindowEvent::Resized(_) | WindowEvent::Moved(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.windows.request_redraw_all();
            }
            event => {
                let Some(window) = self.windows.get(handle).cloned() else {
                    return;
                };
                if let Some(input) = self.input.translate(&window, &event) {
                    if input.position().is_some() {
                        self.hovered = Some(handle);
                    }
                    self.ctx.push_input(input);
                    window.request_redraw();
                }
            }
        }
    }
}

/// Open the main window described by `descriptor` and run until it closes.
pub fn run_app(descriptor: WindowDescriptor, config: DockingConfig, factory: AppFactory) -> DockResult<()> {
    let event_loop = EventLoop::new().map_err(|err| DockError::PlatformError(err.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut proxy = AppProxy {
        factory,
        app: None,
        descriptor,
        ctx: DockingContext::new(config),
        windows: WindowMap::new(),
        input: InputTranslator::new(),
        main: None,
        hovered: None,
        frame_done: false,
    };
    event_loop
        .run_app(&mut proxy)
        .map_err(|err| DockError::PlatformError(err.to_string()))
}
