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

//! The engine orchestrator: start-up, shutdown, and access to shared state.

use crate::context::EngineContext;
use crate::driver::LoopControl;
use crate::error::EngineError;
use crate::registry::SubsystemRegistry;
use crate::scheduler::{self, FrameIo, SchedulerConfig};
use crate::services::EngineServices;
use cadence_core::{Clock, EngineEvent, EventBus, RunState, Settings};

/// Owns the subsystems and the shared run flag for the life of the process.
///
/// Lifecycle: [`Engine::new`], [`Engine::initialize`], any number of
/// [`Engine::run`] calls, then [`Engine::shutdown`] (also done on drop).
pub struct Engine {
    pub(crate) settings: Settings,
    pub(crate) services: EngineServices,
    registry: SubsystemRegistry,
    pub(crate) scheduler: SchedulerConfig,
    pub(crate) run_state: RunState,
    pub(crate) events: EventBus<EngineEvent>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) screen_updates_at_start: bool,
}

impl Engine {
    /// Creates an engine over `services`. Nothing is started yet.
    pub fn new(settings: Settings, services: EngineServices, clock: Box<dyn Clock>) -> Self {
        let scheduler = SchedulerConfig {
            max_catch_up_ticks: settings.engine.max_catch_up_ticks,
            screenshot_dir: settings.engine.screenshot_dir.clone(),
        };
        Self {
            settings,
            services,
            registry: SubsystemRegistry::new(),
            scheduler,
            run_state: RunState::new(),
            events: EventBus::new(),
            clock,
            screen_updates_at_start: true,
        }
    }

    /// Uses `run_state` as the run gate, so collaborators built before the
    /// engine can share it.
    pub fn with_run_state(mut self, run_state: RunState) -> Self {
        self.run_state = run_state;
        self
    }

    /// Starts runs with screen updates off, for headless hosts.
    pub fn with_screen_output(mut self, enabled: bool) -> Self {
        self.screen_updates_at_start = enabled;
        self
    }

    /// Brings every subsystem up in order.
    ///
    /// The configured audio sink is resolved first: if it is unavailable the
    /// first available sink is substituted, and if there is none audio is
    /// disabled for the process. On any subsystem failure every subsystem
    /// started so far is closed in reverse order and the error names the
    /// one that failed.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.registry.is_started() {
            log::warn!("Engine already initialized.");
            return Ok(());
        }

        self.resolve_audio_sink();

        let mut ordered = self.services.ordered_mut();
        self.registry.start_all(&mut ordered)?;
        drop(ordered);

        if self.services.audio_enabled() {
            let sound = self.settings.sound.sound_gain();
            let music = self.settings.sound.music_gain();
            self.services.audio.set_sound_volume(sound);
            self.services.audio.set_music_volume(music);
        }

        self.run_state.start();
        log::info!("Engine initialization successful.");
        Ok(())
    }

    fn resolve_audio_sink(&mut self) {
        let requested = self.settings.sound.sink.clone();
        let audio = self.services.audio.as_mut();

        if audio.is_sink_available(&requested) {
            audio.select_sink(&requested);
            self.services.set_audio_enabled(true);
            return;
        }

        match audio.first_available_sink() {
            Some(fallback) => {
                log::info!(
                    "Could not find requested sink '{requested}'. Falling back to '{fallback}'."
                );
                audio.select_sink(&fallback);
                self.settings.sound.sink = fallback;
                self.services.set_audio_enabled(true);
            }
            None => {
                log::info!("Could not find requested sink '{requested}'. No other sinks available; audio disabled.");
                self.services.set_audio_enabled(false);
            }
        }
    }

    /// Closes every started subsystem in reverse start order. Safe to call
    /// more than once.
    pub fn shutdown(&mut self) {
        if !self.registry.is_started() {
            return;
        }
        self.run_state.request_stop();
        let mut ordered = self.services.ordered_mut();
        self.registry.stop_all(&mut ordered);
        log::info!("Engine deinit successful.");
    }

    /// Runs one main-loop iteration against `ctx`.
    ///
    /// ## Returns
    ///
    /// [`LoopControl::Stop`] once the run state is stopped or the simulation
    /// reports finished.
    pub fn run_one_iteration(&mut self, ctx: &mut EngineContext) -> LoopControl {
        let io = FrameIo {
            services: &mut self.services,
            events: &self.events,
            run_state: &self.run_state,
            clock: self.clock.as_ref(),
        };
        scheduler::run_one_iteration(&self.scheduler, ctx, io)
    }

    /// Creates a fresh loop context starting now.
    pub fn new_context(&self) -> EngineContext {
        let mut ctx = EngineContext::new(self.clock.now_ms(), self.scheduler.max_catch_up_ticks);
        ctx.set_screen_updates(self.screen_updates_at_start);
        ctx
    }

    /// The shared run flag. Clones observe and control the same state.
    pub fn run_state(&self) -> RunState {
        self.run_state.clone()
    }

    /// The inbound event queue.
    pub fn events(&self) -> &EventBus<EngineEvent> {
        &self.events
    }

    /// The effective settings, including any substituted audio sink.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The engine's drivers.
    pub fn services(&self) -> &EngineServices {
        &self.services
    }

    /// Names of the started subsystems, in start order.
    pub fn started_subsystems(&self) -> &[&'static str] {
        self.registry.started()
    }

    /// Returns `true` between a successful `initialize` and `shutdown`.
    pub fn is_initialized(&self) -> bool {
        self.registry.is_started()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
