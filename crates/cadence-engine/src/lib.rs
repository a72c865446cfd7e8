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

//! # Cadence Engine
//!
//! The runtime nucleus: brings subsystems up in a fixed order (and unwinds
//! them on failure), then drives the simulation through a frame scheduler
//! that reconciles variable frame delivery with two fixed-rate tick
//! channels.
//!
//! Contents:
//! * [`registry`]: ordered subsystem start-up with reverse rollback
//! * [`lifecycle`]: the [`Engine`] orchestrator (initialize / shutdown)
//! * [`scheduler`]: one loop iteration, step by step
//! * [`accumulator`]: fixed-period tick accumulators
//! * [`driver`]: owned and host-driven loop drivers
//! * [`run`]: the per-run sequence (grace period, simulation, loop, teardown)

#![warn(missing_docs)]

pub mod accumulator;
pub mod context;
mod dispatch;
pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod run;
pub mod scheduler;
mod screenshot;
pub mod services;

pub use context::{DebugFlags, EngineContext, FrameReport};
pub use driver::{HostedLoop, LoopControl, LoopDriver, MainLoopHost, OwnedLoop};
pub use error::EngineError;
pub use lifecycle::Engine;
pub use run::RunOutcome;
pub use scheduler::{SchedulerConfig, DEBUGGER_STEP_MS, STATIC_TICK_MS};
pub use services::EngineServices;
