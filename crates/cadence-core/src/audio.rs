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

//! Defines the abstract `AudioBackend` trait.

use crate::subsystem::Subsystem;

/// The abstract contract for the audio subsystem.
///
/// Audio output goes through a named *sink* (an output host such as `alsa`
/// or `pulse`). The lifecycle controller checks the configured sink before
/// `init`, falls back to another available one, and skips audio entirely
/// when no sink exists.
pub trait AudioBackend: Subsystem {
    /// Returns `true` if a sink with this name can be opened.
    fn is_sink_available(&self, name: &str) -> bool;

    /// The name of the first sink that can be opened, if any.
    fn first_available_sink(&self) -> Option<String>;

    /// Chooses the sink `init` will open.
    fn select_sink(&mut self, name: &str);

    /// Mixes and submits the audio for this iteration.
    fn render(&mut self);

    /// Sets the effects volume, `0.0..=1.0`.
    fn set_sound_volume(&mut self, volume: f32);

    /// Sets the music volume, `0.0..=1.0`.
    fn set_music_volume(&mut self, volume: f32);
}
