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

use super::{Animation, AnimationError, AnimationScript, Frame};
use std::sync::Arc;

/// What a player did while advancing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Playback entered a frame; the consumer applies its sprite and tags.
    FrameEntered {
        /// Index of the frame in the script.
        index: usize,
        /// The frame itself.
        frame: Frame,
    },
    /// Playback wrapped back to the first frame.
    Looped,
    /// Playback reached the end of a non-repeating animation.
    Finished,
}

/// Plays an [`Animation`] forward by explicit tick deltas.
///
/// Bind once with [`AnimationPlayer::new`], advance with
/// [`AnimationPlayer::run`] from the dynamic-tick phase, and drop to
/// release the parsed script.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    animation: Arc<Animation>,
    script: AnimationScript,
    ticks: u32,
    /// Index of the last frame entered in the current cycle.
    entered: Option<usize>,
    repeat: bool,
    finished: bool,
}

impl AnimationPlayer {
    /// Binds a player to `animation`, parsing its script.
    pub fn new(animation: Arc<Animation>) -> Result<Self, AnimationError> {
        let script = AnimationScript::parse(&animation.script)?;
        log::trace!(
            "Animation {} bound: {} frames, {} ticks.",
            animation.id,
            script.frames().len(),
            script.total_ticks()
        );
        Ok(Self {
            animation,
            script,
            ticks: 0,
            entered: None,
            repeat: false,
            finished: false,
        })
    }

    /// Makes playback wrap to the first frame instead of finishing.
    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// The bound animation.
    pub fn animation(&self) -> &Arc<Animation> {
        &self.animation
    }

    /// Ticks elapsed in the current cycle.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Returns `true` once a non-repeating animation has played out.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The frame entered most recently, if any.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.entered.map(|i| &self.script.frames()[i])
    }

    /// Restarts playback from tick zero.
    pub fn rewind(&mut self) {
        self.ticks = 0;
        self.entered = None;
        self.finished = false;
    }

    /// Advances playback by `delta` ticks and returns, in order, every frame
    /// entered along the way. Frames skipped over by a large delta are
    /// still reported.
    pub fn run(&mut self, delta: u32) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }

        let total = self.script.total_ticks();
        let mut remaining = delta;
        loop {
            let room = total - self.ticks;
            if remaining < room {
                self.ticks += remaining;
                let target = self.script.frame_at(self.ticks).unwrap_or(0);
                self.enter_through(target, &mut events);
                return events;
            }

            // This cycle plays out to the end.
            remaining -= room;
            let last = self.script.frames().len() - 1;
            self.enter_through(last, &mut events);

            if !self.repeat {
                self.ticks = total;
                self.finished = true;
                events.push(PlayerEvent::Finished);
                return events;
            }

            self.ticks = 0;
            self.entered = None;
            events.push(PlayerEvent::Looped);
        }
    }

    fn enter_through(&mut self, target: usize, events: &mut Vec<PlayerEvent>) {
        let first = self.entered.map_or(0, |i| i + 1);
        for index in first..=target {
            events.push(PlayerEvent::FrameEntered {
                index,
                frame: self.script.frames()[index].clone(),
            });
        }
        if first <= target {
            self.entered = Some(target);
        }
    }
}
