//! Dockforge - an immediate-mode docking engine
//!
//! Views (panels) live in a tree of dock nodes. Leaves hold tabs, interior
//! nodes split their area horizontally or vertically, and every root is
//! bound to one native window. Each frame the host feeds pointer input,
//! the engine lays out and hit-tests the tree, and describes the chrome to
//! a [`DockRenderer`](dock::DockRenderer).
//!
//! - **Tree**: [`DockingContext`](dock::DockingContext) owns nodes, views and windows
//! - **Interaction**: tab reordering, docking onto edges, undocking and resizing
//! - **Persistence**: the whole layout saves to a compact byte stream
//! - **Windowing**: a winit backend behind the `winit` feature
//!
//! # Quick Start
//!
//! ```
//! use dockforge::prelude::*;
//!
//! let mut platform = HeadlessWindowProvider::new();
//! let main = platform.open(&WindowDescriptor::new(
//!     "main",
//!     LayoutRect::new(0.0, 0.0, 800.0, 600.0),
//! ));
//!
//! let mut ctx = DockingContext::new(DockingConfig::default());
//! let root = ctx.register_main_window(main).unwrap();
//! let scene = ctx.create_view(DockView::new("Scene"));
//! ctx.dock(&mut platform, scene, root, DockSide::AsTab, 0).unwrap();
//! ctx.compute_layout(&platform);
//!
//! assert_eq!(ctx.tabs(root), &[scene]);
//! ```

pub use dockforge_core as core;
pub use dockforge_core::math;
pub use dockforge_dock as dock;
#[cfg(feature = "winit")]
pub use dockforge_winit as winit;

pub mod prelude {
    pub use dockforge_core::geometry::LayoutRect;
    pub use dockforge_core::math::Vec2;
    pub use dockforge_dock::{
        DockError, DockHooks, DockInput, DockNodeFlags, DockRenderer, DockResult, DockSide,
        DockView, DockingConfig, DockingContext, HeadlessWindowProvider, NativeWindowHandle,
        NodeId, ViewId, WindowDescriptor, WindowProvider,
    };

    #[cfg(feature = "winit")]
    pub use dockforge_winit::{DockApp, run_app};
}
