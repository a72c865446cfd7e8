// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-run mutable loop state.

use crate::accumulator::TickAccumulator;
use cadence_core::simulation::Simulation;
use std::path::PathBuf;

/// Milliseconds the cursor stays visible after the last mouse motion.
pub const MOUSE_HIDE_AFTER_MS: i64 = 1000;

/// Debugger and overlay switches, toggled from the keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugFlags {
    /// Frozen-time stepping mode. While set, wall time does not feed the
    /// accumulators.
    pub visual_debugger: bool,
    /// One pending 20 ms step, consumed by the next iteration.
    pub single_step_requested: bool,
    /// Draws the simulation's debug layer on top of its normal render.
    pub debug_overlay: bool,
}

/// What one loop iteration did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Wall milliseconds since the previous iteration.
    pub elapsed_ms: u64,
    /// Events drained from the queue.
    pub events_dispatched: usize,
    /// Events delivered to the open console.
    pub routed_to_console: usize,
    /// Events delivered to the simulation.
    pub routed_to_simulation: usize,
    /// Static ticks run.
    pub static_ticks: u32,
    /// Dynamic ticks run.
    pub dynamic_ticks: u32,
    /// The cursor was hidden this iteration.
    pub cursor_hidden: bool,
    /// The render sequence ran.
    pub rendered: bool,
    /// Screen updates were off and the loop idled instead.
    pub idled: bool,
    /// Path of the screenshot written this iteration.
    pub screenshot: Option<PathBuf>,
}

/// Plain loop state, split from the simulation so both can be borrowed at
/// once.
#[derive(Debug)]
pub(crate) struct LoopState {
    pub(crate) frame_start_ms: u64,
    pub(crate) static_acc: TickAccumulator,
    pub(crate) dynamic_acc: TickAccumulator,
    pub(crate) mouse_visible_countdown_ms: i64,
    pub(crate) debug: DebugFlags,
    pub(crate) screenshot_requested: bool,
    pub(crate) screen_updates_enabled: bool,
    pub(crate) last_screenshot_ticks: Option<u64>,
}

impl LoopState {
    /// Counts the mouse timer down by `elapsed_ms`. Returns `true` on the
    /// iteration it crosses from positive to non-positive, and only then.
    pub(crate) fn tick_mouse_countdown(&mut self, elapsed_ms: u64) -> bool {
        if self.mouse_visible_countdown_ms <= 0 {
            return false;
        }
        let elapsed = i64::try_from(elapsed_ms).unwrap_or(i64::MAX);
        self.mouse_visible_countdown_ms = self.mouse_visible_countdown_ms.saturating_sub(elapsed);
        self.mouse_visible_countdown_ms <= 0
    }

    pub(crate) fn rearm_mouse_countdown(&mut self) {
        self.mouse_visible_countdown_ms = MOUSE_HIDE_AFTER_MS;
    }
}

/// Everything one run of the main loop mutates.
///
/// Created at the start of a run and dropped at its end; dropping it
/// releases the simulation first.
pub struct EngineContext {
    pub(crate) state: LoopState,
    pub(crate) simulation: Option<Box<dyn Simulation>>,
    pub(crate) last_report: FrameReport,
    pub(crate) iterations: u64,
}

impl EngineContext {
    /// Creates a context whose first frame starts at `now_ms`.
    pub fn new(now_ms: u64, max_catch_up_ticks: Option<u32>) -> Self {
        Self {
            state: LoopState {
                frame_start_ms: now_ms,
                static_acc: TickAccumulator::with_cap(max_catch_up_ticks),
                dynamic_acc: TickAccumulator::with_cap(max_catch_up_ticks),
                mouse_visible_countdown_ms: MOUSE_HIDE_AFTER_MS,
                debug: DebugFlags::default(),
                screenshot_requested: false,
                screen_updates_enabled: true,
                last_screenshot_ticks: None,
            },
            simulation: None,
            last_report: FrameReport::default(),
            iterations: 0,
        }
    }

    /// Hands the simulation to the context.
    pub fn attach_simulation(&mut self, simulation: Box<dyn Simulation>) {
        self.simulation = Some(simulation);
    }

    /// The attached simulation.
    pub fn simulation(&self) -> Option<&dyn Simulation> {
        self.simulation.as_deref()
    }

    /// The attached simulation, mutably.
    pub fn simulation_mut(&mut self) -> Option<&mut (dyn Simulation + 'static)> {
        self.simulation.as_deref_mut()
    }

    /// The current debugger switches.
    pub fn debug_flags(&self) -> DebugFlags {
        self.state.debug
    }

    /// Turns frozen-time stepping on or off.
    pub fn set_visual_debugger(&mut self, enabled: bool) {
        self.state.debug.visual_debugger = enabled;
    }

    /// Asks for one 20 ms step on the next iteration. Only honored while
    /// the visual debugger is on.
    pub fn request_single_step(&mut self) {
        self.state.debug.single_step_requested = true;
    }

    /// Asks for a screenshot after the next render.
    pub fn request_screenshot(&mut self) {
        self.state.screenshot_requested = true;
    }

    /// Returns `true` while the render sequence runs each iteration.
    pub fn screen_updates_enabled(&self) -> bool {
        self.state.screen_updates_enabled
    }

    /// Turns the render sequence on or off.
    pub fn set_screen_updates(&mut self, enabled: bool) {
        self.state.screen_updates_enabled = enabled;
    }

    /// Milliseconds banked on the static channel.
    pub fn static_pending_ms(&self) -> u64 {
        self.state.static_acc.pending_ms()
    }

    /// Milliseconds banked on the dynamic channel.
    pub fn dynamic_pending_ms(&self) -> u64 {
        self.state.dynamic_acc.pending_ms()
    }

    /// Remaining milliseconds before the cursor is hidden.
    pub fn mouse_visible_countdown_ms(&self) -> i64 {
        self.state.mouse_visible_countdown_ms
    }

    /// What the most recent iteration did.
    pub fn last_report(&self) -> &FrameReport {
        &self.last_report
    }

    /// Iterations completed so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl Drop for EngineContext {
    fn drop(&mut self) {
        if self.simulation.take().is_some() {
            log::debug!("Simulation released after {} iterations.", self.iterations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_countdown_fires_once_on_the_crossing() {
        let mut ctx = EngineContext::new(0, None);
        let state = &mut ctx.state;
        assert!(!state.tick_mouse_countdown(600));
        assert!(state.tick_mouse_countdown(600));
        assert!(!state.tick_mouse_countdown(600));
        assert!(!state.tick_mouse_countdown(10_000));

        state.rearm_mouse_countdown();
        assert_eq!(state.mouse_visible_countdown_ms, MOUSE_HIDE_AFTER_MS);
        assert!(state.tick_mouse_countdown(1000));
    }

    #[test]
    fn new_context_starts_with_defaults() {
        let ctx = EngineContext::new(42, Some(5));
        assert_eq!(ctx.state.frame_start_ms, 42);
        assert_eq!(ctx.debug_flags(), DebugFlags::default());
        assert!(ctx.screen_updates_enabled());
        assert_eq!(ctx.mouse_visible_countdown_ms(), 1000);
        assert!(ctx.simulation().is_none());
    }
}
