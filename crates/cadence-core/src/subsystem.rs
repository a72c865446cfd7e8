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

//! Defines the `Subsystem` trait, the lifecycle contract shared by every
//! independently initializable engine facility.

use anyhow::Result;

/// An engine facility with an explicit start/stop lifecycle.
///
/// The engine only ever calls [`Subsystem::close`] on a subsystem whose
/// [`Subsystem::init`] returned `Ok`, and closes subsystems in the reverse
/// order of their initialization. Implementations are not required to
/// tolerate a second `close` without an `init` in between.
pub trait Subsystem {
    /// A short, stable name used in logs and errors (e.g. `"video"`).
    fn name(&self) -> &'static str;

    /// Brings the subsystem up.
    fn init(&mut self) -> Result<()>;

    /// Tears the subsystem down, releasing everything `init` acquired.
    fn close(&mut self);
}
