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

//! # Cadence Core
//!
//! Foundational crate containing the contracts every engine collaborator
//! implements (video, audio, console, simulation, resource loaders), the
//! engine event types, clocks, the process-wide run gate and the
//! tick-driven animation player.

#![warn(missing_docs)]

pub mod animation;
pub mod audio;
pub mod config;
pub mod console;
pub mod event;
pub mod run_state;
pub mod simulation;
pub mod subsystem;
pub mod time;
pub mod video;

pub use config::Settings;
pub use event::{EngineEvent, EventBus, Key};
pub use run_state::RunState;
pub use subsystem::Subsystem;
pub use time::{Clock, ManualClock, SystemClock};
