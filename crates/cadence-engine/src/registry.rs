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

//! Ordered subsystem start-up with reverse-order rollback.

use crate::error::EngineError;
use cadence_core::Subsystem;

/// Tracks which subsystems of an ordered list are currently started.
///
/// The registry does not own the subsystems; callers hand it the same
/// ordered list on every call. Start-up walks the list with a cursor and, on
/// the first failure at index `i`, closes indices `i-1 ..= 0` before
/// reporting the error. Only subsystems whose `init` succeeded are ever
/// closed.
#[derive(Debug, Default)]
pub struct SubsystemRegistry {
    started: Vec<&'static str>,
}

impl SubsystemRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes `subsystems` in order.
    ///
    /// On failure nothing is left started and the failing subsystem is
    /// named in the error. Subsystems after the failing one are never
    /// touched.
    pub fn start_all(&mut self, subsystems: &mut [&mut dyn Subsystem]) -> Result<(), EngineError> {
        debug_assert!(self.started.is_empty(), "start_all called twice");

        for cursor in 0..subsystems.len() {
            let name = subsystems[cursor].name();
            match subsystems[cursor].init() {
                Ok(()) => {
                    log::debug!("Subsystem '{name}' initialized.");
                    self.started.push(name);
                }
                Err(source) => {
                    log::error!("Subsystem '{name}' failed to initialize: {source:#}");
                    self.unwind(&mut subsystems[..cursor]);
                    return Err(EngineError::SubsystemInit { name, source });
                }
            }
        }
        Ok(())
    }

    /// Closes every started subsystem in reverse order.
    ///
    /// `subsystems` must be the list previously given to
    /// [`SubsystemRegistry::start_all`].
    pub fn stop_all(&mut self, subsystems: &mut [&mut dyn Subsystem]) {
        let count = self.started.len().min(subsystems.len());
        for subsystem in subsystems[..count].iter_mut().rev() {
            log::debug!("Closing subsystem '{}'.", subsystem.name());
            subsystem.close();
        }
        self.started.clear();
    }

    /// Names of the started subsystems, in start order.
    pub fn started(&self) -> &[&'static str] {
        &self.started
    }

    /// Returns `true` if any subsystem is started.
    pub fn is_started(&self) -> bool {
        !self.started.is_empty()
    }

    fn unwind(&mut self, started: &mut [&mut dyn Subsystem]) {
        for subsystem in started.iter_mut().rev() {
            log::warn!("Rolling back subsystem '{}'.", subsystem.name());
            subsystem.close();
        }
        self.started.clear();
    }
}
