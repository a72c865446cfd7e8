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

use crate::context::LoopState;
use crate::services::EngineServices;
use cadence_core::event::WindowState;
use cadence_core::simulation::Simulation;
use cadence_core::{EngineEvent, Key, RunState};

/// Where an event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    /// Opened or closed the console; nobody else sees it.
    ConsoleToggle,
    Console,
    Simulation,
}

/// Applies engine-level reactions to `event`, then delivers it to exactly
/// one of the console or the simulation.
pub(crate) fn dispatch_event(
    event: &EngineEvent,
    state: &mut LoopState,
    simulation: &mut dyn Simulation,
    services: &mut EngineServices,
    run_state: &RunState,
) -> Route {
    match event {
        EngineEvent::Quit => {
            log::info!("Quit requested.");
            run_state.request_stop();
        }
        EngineEvent::KeyPressed { key } => apply_binding(*key, state),
        EngineEvent::MouseMoved { .. } => {
            state.rearm_mouse_countdown();
            services.video.set_cursor_visible(true);
        }
        EngineEvent::Window(window) => apply_window_state(window, state, services),
        _ => {}
    }

    if let Some(key) = event.pressed_key() {
        let console = services.console.as_mut();
        if console.is_open() && matches!(key, Key::Backquote | Key::Tab | Key::Escape) {
            console.close_window();
            return Route::ConsoleToggle;
        }
        if !console.is_open() && matches!(key, Key::Tab | Key::Backquote) {
            console.open_window();
            return Route::ConsoleToggle;
        }
    }

    if services.console.is_open() {
        services.console.handle_event(simulation, event);
        Route::Console
    } else {
        simulation.handle_event(event);
        Route::Simulation
    }
}

fn apply_binding(key: Key, state: &mut LoopState) {
    match key {
        Key::F1 => state.screenshot_requested = true,
        Key::F5 => {
            state.debug.visual_debugger = !state.debug.visual_debugger;
            log::info!(
                "Visual debugger {}.",
                if state.debug.visual_debugger { "on" } else { "off" }
            );
        }
        Key::Space if state.debug.visual_debugger => state.debug.single_step_requested = true,
        Key::F6 => state.debug.debug_overlay = !state.debug.debug_overlay,
        _ => {}
    }
}

fn apply_window_state(window: &WindowState, state: &mut LoopState, services: &mut EngineServices) {
    match window {
        WindowState::Minimized | WindowState::Hidden => {
            log::debug!("Window {window:?}; screen updates disabled.");
            state.screen_updates_enabled = false;
        }
        WindowState::Maximized | WindowState::Shown => {
            log::debug!("Window {window:?}; screen updates enabled.");
            state.screen_updates_enabled = true;
        }
        WindowState::Restored => {
            if services.video.is_fullscreen() {
                if let Err(e) = services.video.reinit_renderer() {
                    log::error!("Failed to reinitialize the renderer: {e:#}");
                }
            }
            log::debug!("Window restored; screen updates enabled.");
            state.screen_updates_enabled = true;
        }
        WindowState::Resized { .. } => {}
    }
}
