//! [`WindowProvider`] over winit windows.
//!
//! All rectangles are in logical screen coordinates. On platforms that do
//! not report window positions (Wayland) every window is placed at the
//! origin, so hit-testing across overlapping windows degrades to z-order.

use std::sync::Arc;

use dockforge_core::alloc::HashMap;
use dockforge_core::geometry::{LayoutRect, Size};
use dockforge_dock::{
    CursorHint, DockError, DockResult, NativeWindowHandle, WindowDescriptor, WindowProvider,
};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

pub fn handle_of(id: WindowId) -> NativeWindowHandle {
    NativeWindowHandle(u64::from(id))
}

pub fn window_id_of(handle: NativeWindowHandle) -> WindowId {
    WindowId::from(handle.0)
}

/// Every native window owned by the docking engine, plus the main window.
#[derive(Default)]
pub struct WindowMap {
    windows: HashMap<NativeWindowHandle, Arc<Window>>,
    captured: Option<NativeWindowHandle>,
}

impl WindowMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, window: Window) -> NativeWindowHandle {
        let handle = handle_of(window.id());
        self.windows.insert(handle, Arc::new(window));
        handle
    }

    pub fn get(&self, handle: NativeWindowHandle) -> Option<&Arc<Window>> {
        self.windows.get(&handle)
    }

    pub fn remove(&mut self, handle: NativeWindowHandle) -> Option<Arc<Window>> {
        if self.captured == Some(handle) {
            self.captured = None;
        }
        self.windows.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Window holding the pointer capture, if any.
    pub fn captured(&self) -> Option<NativeWindowHandle> {
        self.captured
    }

    pub fn request_redraw_all(&self) {
        for window in self.windows.values() {
            window.request_redraw();
        }
    }

    pub fn set_cursor(&self, handle: NativeWindowHandle, hint: CursorHint) {
        let icon = match hint {
            CursorHint::Default => CursorIcon::Default,
            CursorHint::ResizeHorizontal => CursorIcon::EwResize,
            CursorHint::ResizeVertical => CursorIcon::NsResize,
        };
        if let Some(window) = self.windows.get(&handle) {
            window.set_cursor(icon);
        }
    }
}

fn attributes(descriptor: &WindowDescriptor) -> WindowAttributes {
    let rect = descriptor.rect;
    Window::default_attributes()
        .with_title(descriptor.title.clone())
        .with_decorations(descriptor.decorations)
        .with_position(LogicalPosition::new(rect.x, rect.y))
        .with_inner_size(LogicalSize::new(rect.width, rect.height))
}

/// Create a window outside the docking engine, e.g. the main window.
pub fn open_window(
    event_loop: &ActiveEventLoop,
    windows: &mut WindowMap,
    descriptor: &WindowDescriptor,
) -> DockResult<NativeWindowHandle> {
    let window = event_loop
        .create_window(attributes(descriptor))
        .map_err(|err| DockError::PlatformError(err.to_string()))?;
    Ok(windows.insert(window))
}

/// A [`WindowProvider`] borrowing the active event loop for one callback.
pub struct WinitWindowProvider<'a> {
    event_loop: &'a ActiveEventLoop,
    windows: &'a mut WindowMap,
}

impl<'a> WinitWindowProvider<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, windows: &'a mut WindowMap) -> Self {
        Self { event_loop, windows }
    }

    pub fn windows(&self) -> &WindowMap {
        self.windows
    }

    fn logical_origin(window: &Window, outer: bool) -> LogicalPosition<f32> {
        let scale = window.scale_factor();
        let position = if outer {
            window.outer_position()
        } else {
            window.inner_position()
        };
        position.map_or(LogicalPosition::new(0.0, 0.0), |p| p.to_logical(scale))
    }
}

impl WindowProvider for WinitWindowProvider<'_> {
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> DockResult<NativeWindowHandle> {
        let handle = open_window(self.event_loop, self.windows, descriptor)?;
        tracing::info!("created native window {handle:?} '{}'", descriptor.title);
        Ok(handle)
    }

    fn destroy_window(&mut self, handle: NativeWindowHandle) {
        // Dropping the last reference closes the window.
        if self.windows.remove(handle).is_none() {
            tracing::warn!("destroy requested for unknown window {handle:?}");
        }
    }

    fn window_rect(&self, handle: NativeWindowHandle) -> Option<LayoutRect> {
        let window = self.windows.get(handle)?;
        let origin = Self::logical_origin(window, true);
        let size: LogicalSize<f32> = window.outer_size().to_logical(window.scale_factor());
        Some(LayoutRect::new(origin.x, origin.y, size.width, size.height))
    }

    fn set_window_rect(&mut self, handle: NativeWindowHandle, rect: LayoutRect) {
        let Some(window) = self.windows.get(handle) else { return };
        window.set_outer_position(LogicalPosition::new(rect.x, rect.y));
        let _ = window.request_inner_size(LogicalSize::new(rect.width, rect.height));
    }

    fn client_size(&self, handle: NativeWindowHandle) -> Option<Size<f32>> {
        let window = self.windows.get(handle)?;
        let size: LogicalSize<f32> = window.inner_size().to_logical(window.scale_factor());
        Some(Size::new(size.width, size.height))
    }

    fn client_rect(&self, handle: NativeWindowHandle) -> Option<LayoutRect> {
        let window = self.windows.get(handle)?;
        let origin = Self::logical_origin(window, false);
        let size = self.client_size(handle)?;
        Some(LayoutRect::new(origin.x, origin.y, size.width, size.height))
    }

    fn focus_window(&mut self, handle: NativeWindowHandle) {
        if let Some(window) = self.windows.get(handle) {
            window.focus_window();
        }
    }

    // Pointer events keep arriving at the pressed window; capture is only tracked.
    fn set_capture(&mut self, handle: NativeWindowHandle) {
        self.windows.captured = Some(handle);
    }

    fn release_capture(&mut self) {
        self.windows.captured = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_round_trips_window_id() {
        let id = WindowId::from(42u64);
        assert_eq!(handle_of(id), NativeWindowHandle(42));
        assert_eq!(window_id_of(handle_of(id)), id);
    }
}
