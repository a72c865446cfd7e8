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

//! The contract between the frame scheduler and the game state it drives.

use crate::event::EngineEvent;
use crate::video::Canvas;
use anyhow::Result;

/// Parameters handed to [`SimulationFactory::create`] at run start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitFlags {
    /// Name of the scene the simulation should open with.
    pub scene: Option<String>,
    /// Stop the simulation after this many dynamic ticks.
    pub max_dynamic_ticks: Option<u64>,
}

/// The game state driven by the scheduler.
///
/// Static ticks run at a fixed 10 ms cadence; dynamic ticks run at
/// whatever period [`Simulation::ms_per_dynamic_tick`] reports, which is
/// queried again before every dynamic tick. Dropping the value releases it.
pub trait Simulation {
    /// Returns `false` once the simulation has finished.
    fn is_running(&self) -> bool;

    /// Handles one input or window event.
    fn handle_event(&mut self, event: &EngineEvent);

    /// Polls input controllers, once per iteration.
    fn tick_controllers(&mut self);

    /// Fixed-period housekeeping.
    fn static_tick(&mut self);

    /// Advances gameplay-visible state by one dynamic tick.
    fn dynamic_tick(&mut self);

    /// Current dynamic tick length in milliseconds.
    fn ms_per_dynamic_tick(&self) -> u32;

    /// Draws the current state.
    fn render(&mut self, canvas: &mut dyn Canvas);

    /// Draws debug geometry over the rendered state.
    fn debug_render(&mut self, canvas: &mut dyn Canvas);
}

/// Builds the simulation at run start.
pub trait SimulationFactory {
    /// Creates a fresh simulation.
    fn create(&mut self, flags: &InitFlags) -> Result<Box<dyn Simulation>>;
}

impl<F> SimulationFactory for F
where
    F: FnMut(&InitFlags) -> Result<Box<dyn Simulation>>,
{
    fn create(&mut self, flags: &InitFlags) -> Result<Box<dyn Simulation>> {
        self(flags)
    }
}
