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

//! Wall-clock sources for the frame scheduler.
//!
//! The scheduler never reads `Instant` directly; it asks a [`Clock`] for a
//! millisecond tick count and for short idle waits. [`SystemClock`] is the
//! real thing, [`ManualClock`] is a deterministic stand-in whose time only
//! moves when told to.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic millisecond tick source.
pub trait Clock {
    /// Milliseconds elapsed since the clock was created.
    fn now_ms(&self) -> u64;

    /// Blocks the caller for roughly `ms` milliseconds.
    fn idle(&self, ms: u64);
}

/// A clock backed by `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start_time: Instant,
}

impl SystemClock {
    /// Creates a new clock whose tick zero is "now".
    /// ## Returns
    /// A new instance of the SystemClock struct.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Returns the elapsed time since the clock was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    fn idle(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// A clock that only advances when told to.
///
/// Clones share the same counter, so a test can keep one handle and give
/// another to the scheduler. [`Clock::idle`] advances the shared counter
/// instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a manual clock reading `start_ms`.
    pub fn starting_at(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn idle(&self, ms: u64) {
        self.advance(ms);
    }
}
