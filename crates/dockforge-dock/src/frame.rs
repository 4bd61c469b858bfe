//! Per-frame driver.
//!
//! A frame replays at most one input event: the drag state machine runs
//! first, then layout, then painting. The tree is never walked while a
//! mutation is half done.

use dockforge_core::profiling::{self, profile_function};

use crate::context::DockingContext;
use crate::input::DockInput;
use crate::interaction::InputResponse;
use crate::platform::WindowProvider;
use crate::render::{DockHooks, DockRenderer};

impl DockingContext {
    /// Run one frame, optionally feeding one input event first.
    pub fn run_frame(
        &mut self,
        platform: &mut dyn WindowProvider,
        renderer: &mut dyn DockRenderer,
        hooks: &mut dyn DockHooks,
        input: Option<DockInput>,
    ) -> InputResponse {
        profiling::new_frame();
        profile_function!();
        self.frame.index += 1;

        let response = match input {
            Some(input) => self.handle_input(platform, input),
            None => {
                self.invalidate_stale_drag(platform);
                InputResponse {
                    cursor: self.frame.cursor_hint,
                    ..Default::default()
                }
            }
        };

        self.compute_layout(&*platform);
        self.paint(renderer, hooks);
        response
    }

    /// Drain the input queue, one event per frame. Runs a single frame when
    /// the queue is empty. Returns the responses in order.
    pub fn pump(
        &mut self,
        platform: &mut dyn WindowProvider,
        renderer: &mut dyn DockRenderer,
        hooks: &mut dyn DockHooks,
    ) -> Vec<InputResponse> {
        if self.input.is_empty() {
            return vec![self.run_frame(platform, renderer, hooks, None)];
        }

        let mut responses = Vec::with_capacity(self.input.len());
        while let Some(input) = self.input.pop() {
            responses.push(self.run_frame(platform, renderer, hooks, Some(input)));
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DockView;
    use crate::platform::{HeadlessWindowProvider, WindowDescriptor};
    use crate::render::{NoHooks, NullRenderer};
    use crate::types::DockSide;

    #[test]
    fn test_pump_runs_one_frame_per_event() {
        let mut platform = HeadlessWindowProvider::new();
        let handle = platform.open(&WindowDescriptor::default());
        let mut ctx = DockingContext::default();
        let root = ctx.register_main_window(handle).unwrap();
        let a = ctx.create_view(DockView::new("A"));
        ctx.dock(&mut platform, a, root, DockSide::AsTab, 0).unwrap();

        let responses = ctx.pump(&mut platform, &mut NullRenderer, &mut NoHooks);
        assert_eq!(responses.len(), 1);
        assert_eq!(ctx.frame().index, 1);

        ctx.push_input(DockInput::moved(150.0, 150.0));
        ctx.push_input(DockInput::down(150.0, 150.0));
        ctx.push_input(DockInput::up(150.0, 150.0));
        let responses = ctx.pump(&mut platform, &mut NullRenderer, &mut NoHooks);
        assert_eq!(responses.len(), 3);
        assert_eq!(ctx.frame().index, 4);
        assert!(ctx.input_queue().is_empty());
    }
}
