//! Window provider that records calls and can be told to fail.

use dockforge_core::geometry::{LayoutRect, Size};
use dockforge_dock::{
    DockError, DockResult, HeadlessWindowProvider, NativeWindowHandle, WindowDescriptor,
    WindowProvider,
};

/// A call made by the engine on a [`RecordingWindowProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    Create { title: String, rect: LayoutRect },
    Destroy(NativeWindowHandle),
    SetRect(NativeWindowHandle, LayoutRect),
    Focus(NativeWindowHandle),
    Capture(NativeWindowHandle),
    ReleaseCapture,
}

/// Headless windows plus a log of every mutating call.
///
/// `fail_creates_after(n)` lets the next `n` window creations succeed and
/// fails every one after that.
#[derive(Debug, Default)]
pub struct RecordingWindowProvider {
    inner: HeadlessWindowProvider,
    calls: Vec<PlatformCall>,
    creates_left: Option<usize>,
}

impl RecordingWindowProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window without recording it, as the host does for its main window.
    pub fn open(&mut self, descriptor: &WindowDescriptor) -> NativeWindowHandle {
        self.inner.open(descriptor)
    }

    pub fn fail_creates_after(&mut self, successes: usize) {
        self.creates_left = Some(successes);
    }

    pub fn stop_failing(&mut self) {
        self.creates_left = None;
    }

    pub fn calls(&self) -> &[PlatformCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count_creates(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PlatformCall::Create { .. }))
            .count()
    }

    pub fn count_destroys(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PlatformCall::Destroy(_)))
            .count()
    }

    pub fn window_count(&self) -> usize {
        self.inner.window_count()
    }

    pub fn is_open(&self, handle: NativeWindowHandle) -> bool {
        self.inner.is_open(handle)
    }

    pub fn focused(&self) -> Option<NativeWindowHandle> {
        self.inner.focused()
    }

    pub fn captured(&self) -> Option<NativeWindowHandle> {
        self.inner.captured()
    }
}

impl WindowProvider for RecordingWindowProvider {
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> DockResult<NativeWindowHandle> {
        self.calls.push(PlatformCall::Create {
            title: descriptor.title.clone(),
            rect: descriptor.rect,
        });
        if let Some(left) = self.creates_left.as_mut() {
            if *left == 0 {
                return Err(DockError::PlatformError("injected create failure".into()));
            }
            *left -= 1;
        }
        self.inner.create_window(descriptor)
    }

    fn destroy_window(&mut self, handle: NativeWindowHandle) {
        self.calls.push(PlatformCall::Destroy(handle));
        self.inner.destroy_window(handle);
    }

    fn window_rect(&self, handle: NativeWindowHandle) -> Option<LayoutRect> {
        self.inner.window_rect(handle)
    }

    fn set_window_rect(&mut self, handle: NativeWindowHandle, rect: LayoutRect) {
        self.calls.push(PlatformCall::SetRect(handle, rect));
        self.inner.set_window_rect(handle, rect);
    }

    fn client_size(&self, handle: NativeWindowHandle) -> Option<Size<f32>> {
        self.inner.client_size(handle)
    }

    fn focus_window(&mut self, handle: NativeWindowHandle) {
        self.calls.push(PlatformCall::Focus(handle));
        self.inner.focus_window(handle);
    }

    fn set_capture(&mut self, handle: NativeWindowHandle) {
        self.calls.push(PlatformCall::Capture(handle));
        self.inner.set_capture(handle);
    }

    fn release_capture(&mut self) {
        self.calls.push(PlatformCall::ReleaseCapture);
        self.inner.release_capture();
    }
}
