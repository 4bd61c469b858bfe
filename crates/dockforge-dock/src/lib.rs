//! Dockforge docking engine.
//!
//! A tree of dock nodes per native window, mutated by docking operations and
//! by a pointer-driven drag state machine. Every frame the tree is laid out,
//! hit-tested and painted through the [`DockRenderer`] and [`DockHooks`]
//! traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use dockforge_dock::{
//!     DockSide, DockView, DockingContext, HeadlessWindowProvider, NoHooks, NullRenderer,
//!     WindowDescriptor,
//! };
//!
//! let mut platform = HeadlessWindowProvider::new();
//! let main = platform.open(&WindowDescriptor::default());
//!
//! let mut ctx = DockingContext::default();
//! let root = ctx.register_main_window(main).unwrap();
//!
//! let scene = ctx.create_view(DockView::new("Scene"));
//! let inspector = ctx.create_view(DockView::new("Inspector"));
//! ctx.dock(&mut platform, scene, root, DockSide::AsTab, 0).unwrap();
//! ctx.dock(&mut platform, inspector, root, DockSide::Right, 0).unwrap();
//!
//! // Once per frame:
//! ctx.run_frame(&mut platform, &mut NullRenderer, &mut NoHooks, None);
//! assert!(ctx.validate().is_ok());
//! ```

pub mod config;
pub mod context;
pub mod debug;
pub mod drag;
pub mod error;
pub mod frame;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod node;
pub mod operations;
pub mod persist;
pub mod platform;
pub mod registry;
pub mod render;
pub mod tree;
pub mod types;

pub use config::DockingConfig;
pub use context::{DockingContext, FrameState};
pub use drag::{DockPreview, DragManager, DragState, ResizeDrag, TabDrag};
pub use error::{DockError, DockResult};
pub use hit_test::ResizeGrip;
pub use input::{DockInput, InputQueue, InputStats, PointerButton};
pub use interaction::InputResponse;
pub use node::{DockNode, DockNodeFlags, DockView, IconId, NodeId, ViewId};
pub use platform::{HeadlessWindowProvider, NativeWindowHandle, WindowDescriptor, WindowProvider};
pub use registry::WindowRegistry;
pub use render::{DockHooks, DockRenderer, HighlightKind, NoHooks, NullRenderer, TabItem, TabStrip};
pub use tree::{DockTree, InvariantIssue, InvariantReport};
pub use types::{CursorHint, DockNodeKind, DockSide, SizingMode, SplitDirection};
