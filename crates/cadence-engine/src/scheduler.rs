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

//! The frame scheduler: one main-loop iteration, start to finish.
//!
//! Each iteration:
//!
//! 1. stops if the run state is stopped, or stops the run state when the
//!    simulation reports finished;
//! 2. drains the event queue, routing each event;
//! 3. counts the mouse-hide timer down and ticks the simulation's
//!    controllers;
//! 4. feeds wall time (or one debugger step) into both accumulators;
//! 5. drains the static channel at a fixed 10 ms;
//! 6. drains the dynamic channel at the simulation's own period;
//! 7. lets the audio driver render;
//! 8. renders and, if asked, takes a screenshot, or idles for 1 ms when
//!    screen updates are off.

use crate::context::{EngineContext, FrameReport};
use crate::dispatch::{dispatch_event, Route};
use crate::driver::LoopControl;
use crate::screenshot;
use crate::services::EngineServices;
use cadence_core::{Clock, EngineEvent, EventBus, RunState};
use std::path::PathBuf;

/// Period of the static tick channel.
pub const STATIC_TICK_MS: u32 = 10;

/// Simulated milliseconds fed per single step under the visual debugger.
pub const DEBUGGER_STEP_MS: u64 = 20;

/// How long an iteration sleeps while screen updates are off.
const IDLE_WAIT_MS: u64 = 1;

/// Scheduler settings that outlive a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Per-pass tick cap for both channels; `None` drains everything.
    pub max_catch_up_ticks: Option<u32>,
    /// Directory screenshots are written to.
    pub screenshot_dir: PathBuf,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_catch_up_ticks: None,
            screenshot_dir: PathBuf::from("."),
        }
    }
}

/// Borrowed engine state one iteration works on.
pub(crate) struct FrameIo<'a> {
    pub(crate) services: &'a mut EngineServices,
    pub(crate) events: &'a EventBus<EngineEvent>,
    pub(crate) run_state: &'a RunState,
    pub(crate) clock: &'a dyn Clock,
}

/// Runs one main-loop iteration.
pub(crate) fn run_one_iteration(
    config: &SchedulerConfig,
    ctx: &mut EngineContext,
    io: FrameIo<'_>,
) -> LoopControl {
    let FrameIo {
        services,
        events,
        run_state,
        clock,
    } = io;

    let Some(simulation) = ctx.simulation.as_deref_mut() else {
        return LoopControl::Stop;
    };
    if !run_state.is_running() {
        return LoopControl::Stop;
    }
    if !simulation.is_running() {
        log::info!("Simulation finished.");
        run_state.request_stop();
        return LoopControl::Stop;
    }

    let state = &mut ctx.state;
    let mut report = FrameReport::default();

    for event in events.drain() {
        report.events_dispatched += 1;
        match dispatch_event(&event, state, simulation, services, run_state) {
            Route::Console => report.routed_to_console += 1,
            Route::Simulation => report.routed_to_simulation += 1,
            Route::ConsoleToggle => {}
        }
    }

    let since_frame_start = clock.now_ms().saturating_sub(state.frame_start_ms);
    if state.tick_mouse_countdown(since_frame_start) {
        services.video.set_cursor_visible(false);
        report.cursor_hidden = true;
    }

    simulation.tick_controllers();

    let now = clock.now_ms();
    let elapsed = now.saturating_sub(state.frame_start_ms);
    state.frame_start_ms = now;
    report.elapsed_ms = elapsed;

    if !state.debug.visual_debugger {
        state.static_acc.add(elapsed);
        state.dynamic_acc.add(elapsed);
    } else if state.debug.single_step_requested {
        state.static_acc.add(DEBUGGER_STEP_MS);
        state.dynamic_acc.add(DEBUGGER_STEP_MS);
        state.debug.single_step_requested = false;
    }

    state.static_acc.begin_pass();
    while state.static_acc.consume(STATIC_TICK_MS) {
        simulation.static_tick();
        services.console.tick();
        services.video.tick();
    }
    report.static_ticks = state.static_acc.ticks_this_pass();

    state.dynamic_acc.begin_pass();
    while state.dynamic_acc.consume(simulation.ms_per_dynamic_tick()) {
        simulation.dynamic_tick();
    }
    report.dynamic_ticks = state.dynamic_acc.ticks_this_pass();

    if !state.debug.visual_debugger && services.audio_enabled() {
        services.audio.render();
    }

    if state.screen_updates_enabled {
        services.video.render_prepare();
        {
            let canvas = services.video.canvas();
            simulation.render(canvas);
            if state.debug.debug_overlay {
                simulation.debug_render(canvas);
            }
            services.console.render(canvas);
        }
        services.video.render_finish();
        report.rendered = true;

        if state.screenshot_requested {
            state.screenshot_requested = false;
            let stamp = screenshot::next_stamp(state.last_screenshot_ticks, clock.now_ms());
            state.last_screenshot_ticks = Some(stamp);
            report.screenshot = screenshot::capture(
                services.video.as_mut(),
                services.image_writer.as_ref(),
                &config.screenshot_dir,
                stamp,
            );
        }
    } else {
        clock.idle(IDLE_WAIT_MS);
        report.idled = true;
    }

    log::trace!(
        "Frame: {} ms, {} static, {} dynamic ticks.",
        report.elapsed_ms,
        report.static_ticks,
        report.dynamic_ticks
    );
    ctx.last_report = report;
    ctx.iterations += 1;
    LoopControl::Continue
}
