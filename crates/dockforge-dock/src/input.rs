//! Pointer input consumed by the drag state machine.

use std::collections::VecDeque;

use dockforge_core::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockInput {
    PointerDown { position: Vec2, button: PointerButton },
    PointerMove { position: Vec2 },
    PointerUp { position: Vec2, button: PointerButton },
    /// Abort any drag in progress, e.g. on Escape or focus loss.
    Cancel,
}

impl DockInput {
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            DockInput::PointerDown { position, .. }
            | DockInput::PointerMove { position }
            | DockInput::PointerUp { position, .. } => Some(position),
            DockInput::Cancel => None,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        DockInput::PointerDown {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        DockInput::PointerMove {
            position: Vec2::new(x, y),
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        DockInput::PointerUp {
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct InputStats {
    pub events_received: usize,
    pub events_processed: usize,
    pub moves_coalesced: usize,
}

/// FIFO of pending input. One event is replayed per frame.
///
/// A move queued directly after another move replaces it, since only the
/// latest cursor position matters between button transitions.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<DockInput>,
    stats: InputStats,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(32),
            stats: InputStats::default(),
        }
    }

    pub fn push(&mut self, input: DockInput) {
        self.stats.events_received += 1;
        if let DockInput::PointerMove { .. } = input
            && let Some(DockInput::PointerMove { .. }) = self.pending.back()
        {
            self.pending.pop_back();
            self.stats.moves_coalesced += 1;
        }
        self.pending.push_back(input);
    }

    pub fn pop(&mut self) -> Option<DockInput> {
        let input = self.pending.pop_front()?;
        self.stats.events_processed += 1;
        Some(input)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn stats(&self) -> &InputStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_with_move_coalescing() {
        let mut queue = InputQueue::new();
        queue.push(DockInput::down(0.0, 0.0));
        queue.push(DockInput::moved(1.0, 0.0));
        queue.push(DockInput::moved(2.0, 0.0));
        queue.push(DockInput::up(2.0, 0.0));
        queue.push(DockInput::moved(3.0, 0.0));

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.pop(), Some(DockInput::down(0.0, 0.0)));
        assert_eq!(queue.pop(), Some(DockInput::moved(2.0, 0.0)));
        assert_eq!(queue.pop(), Some(DockInput::up(2.0, 0.0)));
        assert_eq!(queue.pop(), Some(DockInput::moved(3.0, 0.0)));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.stats().moves_coalesced, 1);
        assert_eq!(queue.stats().events_processed, 4);
    }

    #[test]
    fn test_cancel_has_no_position() {
        assert_eq!(DockInput::Cancel.position(), None);
        assert_eq!(DockInput::up(4.0, 5.0).position(), Some(Vec2::new(4.0, 5.0)));
    }
}
