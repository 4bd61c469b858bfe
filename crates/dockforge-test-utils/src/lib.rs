//! Test utilities for the Dockforge docking engine.
//!
//! The main components are:
//!
//! - [`RecordingWindowProvider`] - In-memory windows with a call log and
//!   failure injection
//! - [`RecordingRenderer`] - A [`DockRenderer`](dockforge_dock::DockRenderer)
//!   that records every call
//! - [`Harness`] - A context with a registered main window
//! - [`assert_valid`] - Panics with a tree dump when invariants are broken
//!
//! # Example
//!
//! ```rust
//! use dockforge_dock::DockSide;
//! use dockforge_test_utils::{Harness, assert_valid};
//!
//! let mut h = Harness::new(800.0, 600.0);
//! let scene = h.dock_new("Scene", h.root, DockSide::AsTab);
//! let _inspector = h.dock_new("Inspector", h.root, DockSide::Right);
//! h.layout();
//!
//! assert_eq!(h.ctx.view_node(scene).map(|n| h.ctx.tabs(n).len()), Some(1));
//! assert_valid(&h.ctx);
//! ```

pub mod fixtures;
pub mod recording_platform;
pub mod recording_renderer;

pub use fixtures::{Harness, assert_valid, init_test_logging, leaf_titles};
pub use recording_platform::{PlatformCall, RecordingWindowProvider};
pub use recording_renderer::{RecordingRenderer, RenderCall};
