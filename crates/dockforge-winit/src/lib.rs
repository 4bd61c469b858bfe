//! winit backend for the Dockforge docking engine.

pub mod app;
pub mod input;
pub mod platform;

pub use app::{AppFactory, DockApp, run_app};
pub use input::InputTranslator;
pub use platform::{WindowMap, WinitWindowProvider, handle_of, open_window, window_id_of};

// Re-export WindowId for convenience
pub use winit::window::WindowId;
