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

//! The in-game console overlay contract.

use crate::event::EngineEvent;
use crate::simulation::Simulation;
use crate::subsystem::Subsystem;
use crate::video::Canvas;

/// An overlay that captures input while open.
///
/// While [`Console::is_open`] returns `true`, the scheduler routes every
/// event to [`Console::handle_event`] instead of the simulation.
pub trait Console: Subsystem {
    /// Returns `true` while the overlay is shown.
    fn is_open(&self) -> bool;

    /// Shows the overlay.
    fn open_window(&mut self);

    /// Hides the overlay. Distinct from [`Subsystem::close`], which tears
    /// the whole console down.
    fn close_window(&mut self);

    /// Handles one event while the overlay is open.
    fn handle_event(&mut self, simulation: &mut dyn Simulation, event: &EngineEvent);

    /// Static-tick housekeeping (cursor blink).
    fn tick(&mut self);

    /// Draws the overlay if it is open.
    fn render(&mut self, canvas: &mut dyn Canvas);
}
