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

//! Defines the errors the engine reports to its caller.

use thiserror::Error;

/// An error that stops the engine from starting or running.
///
/// Per-iteration failures (a screenshot that cannot be captured or written)
/// are logged and never surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A subsystem failed to start; every subsystem started before it has
    /// already been closed again.
    #[error("subsystem '{name}' failed to initialize")]
    SubsystemInit {
        /// The subsystem that failed.
        name: &'static str,
        /// Why it failed.
        #[source]
        source: anyhow::Error,
    },
    /// `run` was called before a successful `initialize`.
    #[error("the engine is not initialized")]
    NotInitialized,
    /// The simulation factory failed.
    #[error("failed to create the simulation")]
    SimulationCreate(#[source] anyhow::Error),
    /// The host main loop reported an error.
    #[error("the main loop driver failed")]
    Driver(#[source] anyhow::Error),
}
