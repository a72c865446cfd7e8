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

//! The bundle of host-supplied drivers the engine runs against.

use cadence_core::audio::AudioBackend;
use cadence_core::console::Console;
use cadence_core::video::{ImageWriter, VideoBackend};
use cadence_core::Subsystem;

/// Every collaborator the engine drives, each behind its trait.
///
/// The host builds one of these (software framebuffer for headless runs,
/// a windowed backend otherwise, mocks in tests) and hands it to
/// [`crate::Engine::new`].
pub struct EngineServices {
    /// Window and renderer.
    pub video: Box<dyn VideoBackend>,
    /// Audio output.
    pub audio: Box<dyn AudioBackend>,
    /// Sound and music asset loader.
    pub sounds: Box<dyn Subsystem>,
    /// Localization table.
    pub language: Box<dyn Subsystem>,
    /// Font cache.
    pub fonts: Box<dyn Subsystem>,
    /// Palette cache.
    pub palettes: Box<dyn Subsystem>,
    /// Developer console overlay.
    pub console: Box<dyn Console>,
    /// Screenshot encoder.
    pub image_writer: Box<dyn ImageWriter>,
    audio_enabled: bool,
}

impl EngineServices {
    /// Bundles the given drivers. Audio starts enabled; sink resolution may
    /// disable it during initialization.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        video: Box<dyn VideoBackend>,
        audio: Box<dyn AudioBackend>,
        sounds: Box<dyn Subsystem>,
        language: Box<dyn Subsystem>,
        fonts: Box<dyn Subsystem>,
        palettes: Box<dyn Subsystem>,
        console: Box<dyn Console>,
        image_writer: Box<dyn ImageWriter>,
    ) -> Self {
        Self {
            video,
            audio,
            sounds,
            language,
            fonts,
            palettes,
            console,
            image_writer,
            audio_enabled: true,
        }
    }

    /// Returns `true` while the audio driver takes part in the run.
    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub(crate) fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
    }

    /// The subsystems in start-up order: video, audio (when enabled),
    /// sounds, language, fonts, palettes, console.
    pub(crate) fn ordered_mut(&mut self) -> Vec<&mut dyn Subsystem> {
        let mut ordered: Vec<&mut dyn Subsystem> = Vec::with_capacity(7);
        ordered.push(self.video.as_mut());
        if self.audio_enabled {
            ordered.push(self.audio.as_mut());
        }
        ordered.push(self.sounds.as_mut());
        ordered.push(self.language.as_mut());
        ordered.push(self.fonts.as_mut());
        ordered.push(self.palettes.as_mut());
        ordered.push(self.console.as_mut());
        ordered
    }
}
