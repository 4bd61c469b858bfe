//! Native window abstraction consumed by the docking engine.
//!
//! The engine never talks to an OS windowing API directly. Root dock nodes
//! are backed by windows created through a [`WindowProvider`], addressed by
//! an opaque [`NativeWindowHandle`].

use dockforge_core::alloc::HashMap;
use dockforge_core::geometry::{LayoutRect, Size};

use crate::error::{DockError, DockResult};

/// Opaque handle to a native top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeWindowHandle(pub u64);

/// Parameters for creating a native window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor {
    pub title: String,
    /// Outer rectangle in screen coordinates.
    pub rect: LayoutRect,
    pub decorations: bool,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Dockforge".to_string(),
            rect: LayoutRect::new(100.0, 100.0, 640.0, 480.0),
            decorations: true,
        }
    }
}

impl WindowDescriptor {
    pub fn new(title: impl Into<String>, rect: LayoutRect) -> Self {
        Self {
            title: title.into(),
            rect,
            ..Default::default()
        }
    }

    pub fn with_decorations(mut self, decorations: bool) -> Self {
        self.decorations = decorations;
        self
    }
}

/// OS window services used by the docking engine.
pub trait WindowProvider {
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> DockResult<NativeWindowHandle>;

    fn destroy_window(&mut self, handle: NativeWindowHandle);

    /// Outer rectangle of the window in screen coordinates.
    fn window_rect(&self, handle: NativeWindowHandle) -> Option<LayoutRect>;

    fn set_window_rect(&mut self, handle: NativeWindowHandle, rect: LayoutRect);

    /// Client area size. The client area starts at the window rect origin.
    fn client_size(&self, handle: NativeWindowHandle) -> Option<Size<f32>>;

    fn focus_window(&mut self, handle: NativeWindowHandle);

    fn set_capture(&mut self, handle: NativeWindowHandle);

    fn release_capture(&mut self);

    /// Client area in screen coordinates.
    fn client_rect(&self, handle: NativeWindowHandle) -> Option<LayoutRect> {
        let rect = self.window_rect(handle)?;
        let size = self.client_size(handle)?;
        Some(LayoutRect::new(rect.x, rect.y, size.width, size.height))
    }
}

#[derive(Debug, Clone)]
struct HeadlessWindow {
    title: String,
    rect: LayoutRect,
}

/// In-memory [`WindowProvider`] for headless hosting.
///
/// Window rectangles are stored as given; the client area equals the
/// window rectangle.
#[derive(Debug, Default)]
pub struct HeadlessWindowProvider {
    windows: HashMap<NativeWindowHandle, HeadlessWindow>,
    next_handle: u64,
    focused: Option<NativeWindowHandle>,
    captured: Option<NativeWindowHandle>,
}

impl HeadlessWindowProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a window outside the docking engine, e.g. the main window.
    pub fn open(&mut self, descriptor: &WindowDescriptor) -> NativeWindowHandle {
        self.next_handle += 1;
        let handle = NativeWindowHandle(self.next_handle);
        self.windows.insert(
            handle,
            HeadlessWindow {
                title: descriptor.title.clone(),
                rect: descriptor.rect,
            },
        );
        handle
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_open(&self, handle: NativeWindowHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    pub fn title(&self, handle: NativeWindowHandle) -> Option<&str> {
        self.windows.get(&handle).map(|w| w.title.as_str())
    }

    pub fn focused(&self) -> Option<NativeWindowHandle> {
        self.focused
    }

    pub fn captured(&self) -> Option<NativeWindowHandle> {
        self.captured
    }
}

impl WindowProvider for HeadlessWindowProvider {
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> DockResult<NativeWindowHandle> {
        if !descriptor.rect.has_area() {
            return Err(DockError::PlatformError(format!(
                "window '{}' has an empty rectangle",
                descriptor.title
            )));
        }
        Ok(self.open(descriptor))
    }

    fn destroy_window(&mut self, handle: NativeWindowHandle) {
        self.windows.remove(&handle);
        if self.focused == Some(handle) {
            self.focused = None;
        }
        if self.captured == Some(handle) {
            self.captured = None;
        }
    }

    fn window_rect(&self, handle: NativeWindowHandle) -> Option<LayoutRect> {
        self.windows.get(&handle).map(|w| w.rect)
    }

    fn set_window_rect(&mut self, handle: NativeWindowHandle, rect: LayoutRect) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.rect = rect;
        }
    }

    fn client_size(&self, handle: NativeWindowHandle) -> Option<Size<f32>> {
        self.windows
            .get(&handle)
            .map(|w| Size::new(w.rect.width, w.rect.height))
    }

    fn focus_window(&mut self, handle: NativeWindowHandle) {
        if self.windows.contains_key(&handle) {
            self.focused = Some(handle);
        }
    }

    fn set_capture(&mut self, handle: NativeWindowHandle) {
        self.captured = Some(handle);
    }

    fn release_capture(&mut self) {
        self.captured = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_lifecycle() {
        let mut platform = HeadlessWindowProvider::new();
        let handle = platform
            .create_window(&WindowDescriptor::new("tools", LayoutRect::new(10.0, 20.0, 300.0, 200.0)))
            .unwrap();
        assert!(platform.is_open(handle));
        assert_eq!(
            platform.client_rect(handle),
            Some(LayoutRect::new(10.0, 20.0, 300.0, 200.0))
        );

        platform.focus_window(handle);
        platform.set_capture(handle);
        platform.destroy_window(handle);
        assert!(!platform.is_open(handle));
        assert_eq!(platform.focused(), None);
        assert_eq!(platform.captured(), None);
    }

    #[test]
    fn test_headless_rejects_empty_rect() {
        let mut platform = HeadlessWindowProvider::new();
        let result = platform.create_window(&WindowDescriptor::new("empty", LayoutRect::ZERO));
        assert!(matches!(result, Err(DockError::PlatformError(_))));
        assert_eq!(platform.window_count(), 0);
    }
}
