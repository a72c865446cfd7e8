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

//! Fixed-period tick accumulators.

/// Banks elapsed milliseconds and pays them out one period at a time.
///
/// A drain pass is `begin_pass` followed by `consume` until it returns
/// `false`. The period is passed to every `consume` call, so a channel
/// whose period changes mid-pass picks the new value up immediately. A
/// period of zero is treated as one millisecond.
///
/// With a catch-up cap, a pass stops after `cap` ticks and discards every
/// remaining whole period, keeping only the sub-period residual.
#[derive(Debug, Clone, Default)]
pub struct TickAccumulator {
    pending_ms: u64,
    cap: Option<u32>,
    ticks_this_pass: u32,
    dropped_ms: u64,
}

impl TickAccumulator {
    /// Creates an empty, uncapped accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty accumulator that pays out at most `cap` ticks per
    /// pass (`None` for unbounded).
    pub fn with_cap(cap: Option<u32>) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    /// Banks `ms` more milliseconds.
    pub fn add(&mut self, ms: u64) {
        self.pending_ms = self.pending_ms.saturating_add(ms);
    }

    /// Milliseconds banked and not yet paid out.
    pub fn pending_ms(&self) -> u64 {
        self.pending_ms
    }

    /// Total milliseconds discarded by the catch-up cap so far.
    pub fn dropped_ms(&self) -> u64 {
        self.dropped_ms
    }

    /// Ticks paid out since the last [`TickAccumulator::begin_pass`].
    pub fn ticks_this_pass(&self) -> u32 {
        self.ticks_this_pass
    }

    /// Starts a new drain pass.
    pub fn begin_pass(&mut self) {
        self.ticks_this_pass = 0;
    }

    /// Pays out one tick of `period_ms` if enough time is banked.
    ///
    /// ## Returns
    ///
    /// `true` if the caller should run one tick.
    pub fn consume(&mut self, period_ms: u32) -> bool {
        let period = u64::from(period_ms.max(1));
        if self.pending_ms < period {
            return false;
        }

        if let Some(cap) = self.cap {
            if self.ticks_this_pass >= cap {
                let residual = self.pending_ms % period;
                let dropped = self.pending_ms - residual;
                log::warn!("Tick catch-up capped at {cap}; dropping {dropped} ms of backlog.");
                self.dropped_ms += dropped;
                self.pending_ms = residual;
                return false;
            }
        }

        self.pending_ms -= period;
        self.ticks_this_pass += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(acc: &mut TickAccumulator, period: u32) -> u32 {
        acc.begin_pass();
        let mut ticks = 0;
        while acc.consume(period) {
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn pays_out_whole_periods_and_keeps_the_residual() {
        let mut acc = TickAccumulator::new();
        acc.add(37);
        assert_eq!(drain(&mut acc, 10), 3);
        assert_eq!(acc.pending_ms(), 7);

        let mut acc = TickAccumulator::new();
        acc.add(37);
        assert_eq!(drain(&mut acc, 16), 2);
        assert_eq!(acc.pending_ms(), 5);
    }

    #[test]
    fn an_exact_period_is_paid_out() {
        let mut acc = TickAccumulator::new();
        acc.add(10);
        assert_eq!(drain(&mut acc, 10), 1);
        assert_eq!(acc.pending_ms(), 0);
    }

    #[test]
    fn residual_carries_into_the_next_pass() {
        let mut acc = TickAccumulator::new();
        acc.add(7);
        assert_eq!(drain(&mut acc, 10), 0);
        acc.add(4);
        assert_eq!(drain(&mut acc, 10), 1);
        assert_eq!(acc.pending_ms(), 1);
    }

    #[test]
    fn zero_period_behaves_as_one_millisecond() {
        let mut acc = TickAccumulator::new();
        acc.add(3);
        assert_eq!(drain(&mut acc, 0), 3);
        assert_eq!(acc.pending_ms(), 0);
    }

    #[test]
    fn period_is_read_on_every_consume() {
        let mut acc = TickAccumulator::new();
        acc.add(30);
        acc.begin_pass();
        assert!(acc.consume(10));
        assert!(acc.consume(15));
        assert!(!acc.consume(10));
        assert_eq!(acc.pending_ms(), 5);
    }

    #[test]
    fn cap_discards_whole_periods_of_backlog() {
        let mut acc = TickAccumulator::with_cap(Some(5));
        acc.add(1_003);
        assert_eq!(drain(&mut acc, 10), 5);
        assert_eq!(acc.pending_ms(), 3);
        assert_eq!(acc.dropped_ms(), 950);

        acc.add(9);
        assert_eq!(drain(&mut acc, 10), 1, "next pass starts fresh");
    }
}
