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

use super::{Mixer, MixerHandle};
use anyhow::Result;
use cadence_core::audio::AudioBackend;
use cadence_core::Subsystem;

/// An audio backend with a single sink, `"null"`, that mixes and discards.
///
/// Keeps headless runs on the same code path as real output.
pub struct NullAudio {
    mixer: MixerHandle,
    scratch: Vec<f32>,
}

impl NullAudio {
    /// The only sink this backend offers.
    pub const SINK: &'static str = "null";

    /// Creates the backend.
    pub fn new() -> Self {
        Self {
            mixer: MixerHandle::new(1024),
            scratch: vec![0.0; 1024],
        }
    }

    /// A handle for queueing voices on this backend's mixer.
    pub fn mixer_handle(&self) -> MixerHandle {
        self.mixer.clone()
    }
}

impl Default for NullAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for NullAudio {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn init(&mut self) -> Result<()> {
        log::debug!("Null audio ready.");
        Ok(())
    }

    fn close(&mut self) {}
}

impl AudioBackend for NullAudio {
    fn is_sink_available(&self, name: &str) -> bool {
        name == Self::SINK
    }

    fn first_available_sink(&self) -> Option<String> {
        Some(Self::SINK.to_string())
    }

    fn select_sink(&mut self, _name: &str) {}

    fn render(&mut self) {
        let scratch = &mut self.scratch;
        self.mixer.with(|mixer| {
            mixer.render();
            mixer.pull(scratch);
        });
    }

    fn set_sound_volume(&mut self, volume: f32) {
        self.mixer.with(|m| m.set_sound_gain(volume));
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.mixer.with(|m| m.set_music_gain(volume));
    }
}
