/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// Docking only needs [`Vec2`] for cursor positions and deltas; the full
/// `glam` surface is re-exported for hosts that want it.
///
/// ```
/// use dockforge_core::math::Vec2;
///
/// let press = Vec2::new(10.0, 20.0);
/// let cursor = Vec2::new(13.0, 24.0);
/// assert_eq!((cursor - press).length(), 5.0);
/// ```
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
