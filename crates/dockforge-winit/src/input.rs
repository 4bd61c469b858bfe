//! Translation of winit window events into [`DockInput`].

use dockforge_core::math::Vec2;
use dockforge_dock::{DockInput, PointerButton};
use winit::dpi::LogicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

/// Tracks the cursor in screen coordinates across windows.
///
/// winit reports cursor positions relative to each window's client area and
/// mouse buttons without any position, so the last known screen position is
/// remembered here.
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor: Option<Vec2>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn translate(&mut self, window: &Window, event: &WindowEvent) -> Option<DockInput> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let scale = window.scale_factor();
                let origin: LogicalPosition<f32> = window
                    .inner_position()
                    .map_or(LogicalPosition::new(0.0, 0.0), |p| p.to_logical(scale));
                let local: LogicalPosition<f32> = position.to_logical(scale);
                let screen = Vec2::new(origin.x + local.x, origin.y + local.y);
                self.cursor = Some(screen);
                Some(DockInput::PointerMove { position: screen })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let position = self.cursor?;
                let button = pointer_button(*button)?;
                Some(match state {
                    ElementState::Pressed => DockInput::PointerDown { position, button },
                    ElementState::Released => DockInput::PointerUp { position, button },
                })
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                Some(DockInput::Cancel)
            }
            WindowEvent::Focused(false) => Some(DockInput::Cancel),
            _ => None,
        }
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => None,
    }
}
