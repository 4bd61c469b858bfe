//! Dockforge Core
//!
//! This crate contains the shared foundation of the Dockforge docking engine:
//! generational storage, geometry, math re-exports, logging and profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
