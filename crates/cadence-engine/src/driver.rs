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

//! Loop drivers: who calls the iteration function, and how often.
//!
//! On most hosts the engine owns the loop and calls the iteration back to
//! back ([`OwnedLoop`]). Some hosts own the main loop themselves and only
//! accept a callback ([`MainLoopHost`], wrapped by [`HostedLoop`]); the
//! iteration semantics are identical either way.

use anyhow::Result;

/// What the iteration function asks of its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Call again.
    Continue,
    /// The run is over; stop calling.
    Stop,
}

/// Repeatedly invokes one iteration until it returns [`LoopControl::Stop`].
pub trait LoopDriver {
    /// Runs `step` until it asks to stop.
    fn drive(&mut self, step: &mut dyn FnMut() -> LoopControl) -> Result<()>;
}

/// A plain blocking loop on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedLoop;

impl OwnedLoop {
    /// Creates the driver.
    pub fn new() -> Self {
        Self
    }
}

impl LoopDriver for OwnedLoop {
    fn drive(&mut self, step: &mut dyn FnMut() -> LoopControl) -> Result<()> {
        while step() == LoopControl::Continue {}
        Ok(())
    }
}

/// A runtime that owns the main loop and calls back into the engine.
pub trait MainLoopHost {
    /// Registers `callback` and keeps invoking it at the host's cadence.
    /// Once it returns [`LoopControl::Stop`] the host must deregister it and
    /// return.
    fn run_callback(&mut self, callback: &mut dyn FnMut() -> LoopControl) -> Result<()>;
}

/// Drives the engine from a [`MainLoopHost`].
#[derive(Debug)]
pub struct HostedLoop<H> {
    host: H,
}

impl<H: MainLoopHost> HostedLoop<H> {
    /// Wraps `host`.
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The wrapped host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: MainLoopHost> LoopDriver for HostedLoop<H> {
    fn drive(&mut self, step: &mut dyn FnMut() -> LoopControl) -> Result<()> {
        let mut stopped = false;
        self.host.run_callback(&mut || {
            // Hosts may fire once more after deregistration; ignore it.
            if stopped {
                return LoopControl::Stop;
            }
            let control = step();
            stopped = control == LoopControl::Stop;
            control
        })
    }
}
