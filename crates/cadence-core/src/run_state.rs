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

//! The run gate observed once per scheduler iteration.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// A cloneable handle to the engine's single run/stop gate.
///
/// The gate moves `idle -> running -> stopped` and never back: once a stop
/// has been requested, [`RunState::start`] has no effect for the rest of the
/// process. Clones share the same gate, which lets an interrupt handler on
/// another thread request a cooperative stop.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    phase: Arc<AtomicU8>,
}

impl RunState {
    /// Creates a gate in the idle (not running) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate. Returns `false` if it was already running or stopped.
    pub fn start(&self) -> bool {
        self.phase
            .compare_exchange(IDLE, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Closes the gate for good.
    pub fn request_stop(&self) {
        let previous = self.phase.swap(STOPPED, Ordering::SeqCst);
        if previous != STOPPED {
            log::debug!("Run state: stop requested.");
        }
    }

    /// Returns `true` while the gate is open.
    pub fn is_running(&self) -> bool {
        self.phase.load(Ordering::SeqCst) == RUNNING
    }

    /// Returns `true` once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.phase.load(Ordering::SeqCst) == STOPPED
    }
}
