use crate::node::{NodeId, ViewId};
use crate::platform::NativeWindowHandle;

/// Error types for dock operations.
///
/// Every failing operation leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DockError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("view {0:?} not found")]
    ViewNotFound(ViewId),
    #[error("cannot dock a node onto itself")]
    DockOntoSelf,
    #[error("node {0:?} is not a valid target for this operation")]
    InvalidTarget(NodeId),
    #[error("tab index {index} out of bounds for {len} tabs")]
    InvalidTabIndex { index: usize, len: usize },
    #[error("node {0:?} is not a root node")]
    NotARoot(NodeId),
    #[error("native window {0:?} is not registered")]
    WindowNotRegistered(NativeWindowHandle),
    #[error("platform error: {0}")]
    PlatformError(String),
    #[error("layout stream truncated: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("malformed layout stream: {0}")]
    MalformedStream(&'static str),
    #[error("docking is disabled on the target by its flags")]
    DockingDisabled,
}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;
