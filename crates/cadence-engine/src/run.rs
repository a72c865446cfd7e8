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

//! One run: grace period, simulation creation, main loop, teardown.

use crate::driver::{LoopControl, LoopDriver};
use crate::error::EngineError;
use crate::lifecycle::Engine;
use cadence_core::simulation::{InitFlags, SimulationFactory};
use cadence_core::EngineEvent;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A quit arrived during the start-up grace period; no simulation was
    /// created.
    QuitDuringGrace,
    /// The main loop ran until the run state stopped or the simulation
    /// finished.
    Completed {
        /// Main-loop iterations executed.
        iterations: u64,
    },
}

impl Engine {
    /// Runs the simulation built by `factory` until it stops.
    ///
    /// Before the simulation exists, a grace period of blank frames lets
    /// the display settle (only when crossfading is on). A quit during the
    /// grace period ends the run early. The loop context is released on
    /// every exit path.
    pub fn run(
        &mut self,
        factory: &mut dyn SimulationFactory,
        flags: &InitFlags,
        driver: &mut dyn LoopDriver,
    ) -> Result<RunOutcome, EngineError> {
        if !self.is_initialized() {
            return Err(EngineError::NotInitialized);
        }

        let mut ctx = self.new_context();
        log::info!(" --- BEGIN GAME LOG ---");

        let grace = self.settings.engine.start_grace_iterations;
        if self.settings.video.crossfade_on && grace > 0 {
            let mut remaining = grace;
            let mut quit = false;
            driver
                .drive(&mut || self.grace_iteration(&mut remaining, &mut quit))
                .map_err(EngineError::Driver)?;
            if quit {
                log::info!("Quit during start-up grace period.");
                return Ok(RunOutcome::QuitDuringGrace);
            }
        }

        if self.services.audio_enabled() {
            let gain = self.settings.sound.sound_gain();
            self.services.audio.set_sound_volume(gain);
        }

        let simulation = factory.create(flags).map_err(|e| {
            log::error!("Failed to create the simulation: {e:#}");
            EngineError::SimulationCreate(e)
        })?;
        ctx.attach_simulation(simulation);

        driver
            .drive(&mut || self.run_one_iteration(&mut ctx))
            .map_err(EngineError::Driver)?;

        let iterations = ctx.iterations();
        drop(ctx);
        log::info!(" --- END GAME LOG ---");
        Ok(RunOutcome::Completed { iterations })
    }

    fn grace_iteration(&mut self, remaining: &mut u32, quit: &mut bool) -> LoopControl {
        if !self.run_state.is_running() {
            *quit = true;
            return LoopControl::Stop;
        }

        for event in self.events.drain() {
            if matches!(event, EngineEvent::Quit) {
                self.run_state.request_stop();
                *quit = true;
                return LoopControl::Stop;
            }
        }

        self.services.video.render_prepare();
        self.services.video.render_finish();

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}
