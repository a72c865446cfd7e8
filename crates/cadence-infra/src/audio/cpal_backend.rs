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

//! Contains the `CpalAudio` backend.

use super::{Mixer, MixerHandle};
use anyhow::{anyhow, Result};
use cadence_core::audio::AudioBackend;
use cadence_core::Subsystem;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Samples the mixer keeps queued ahead of the output stream.
const MIX_AHEAD_SAMPLES: usize = 4096;

/// An `AudioBackend` that plays through CPAL.
///
/// Sinks are CPAL host names (`"ALSA"`, `"JACK"`, ...), matched without
/// regard to case; `"default"` names the platform's default host.
pub struct CpalAudio {
    selected: Option<cpal::HostId>,
    mixer: MixerHandle,
    stream: Option<cpal::Stream>,
}

impl CpalAudio {
    /// The sink name for the platform's default host.
    pub const DEFAULT_SINK: &'static str = "default";

    /// Creates the backend; nothing is opened until `init`.
    pub fn new() -> Self {
        Self {
            selected: None,
            mixer: MixerHandle::new(MIX_AHEAD_SAMPLES),
            stream: None,
        }
    }

    /// A handle for queueing voices on this backend's mixer.
    pub fn mixer_handle(&self) -> MixerHandle {
        self.mixer.clone()
    }

    fn host_named(name: &str) -> Option<cpal::HostId> {
        if name.eq_ignore_ascii_case(Self::DEFAULT_SINK) {
            return Some(cpal::default_host().id());
        }
        cpal::available_hosts()
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}

impl Default for CpalAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for CpalAudio {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn init(&mut self) -> Result<()> {
        let host = match self.selected {
            Some(id) => cpal::host_from_id(id)?,
            None => cpal::default_host(),
        };
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default output device available"))?;
        let config = device.default_output_config()?;

        let mixer = self.mixer.clone();
        let audio_callback = move |output_buffer: &mut [f32], _: &cpal::OutputCallbackInfo| {
            output_buffer.fill(0.0);
            mixer.with(|m| m.pull(output_buffer));
        };
        let error_callback = |err| {
            log::error!("An error occurred on the audio stream: {err}");
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                device.build_output_stream(&config.into(), audio_callback, error_callback, None)?
            }
            format => return Err(anyhow!("Unsupported sample format: {format}")),
        };
        stream.play()?;

        log::info!("Audio output opened on host '{}'.", host.id().name());
        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            log::debug!("Audio stream closed.");
        }
    }
}

impl AudioBackend for CpalAudio {
    fn is_sink_available(&self, name: &str) -> bool {
        Self::host_named(name).is_some()
    }

    fn first_available_sink(&self) -> Option<String> {
        cpal::available_hosts()
            .first()
            .map(|id| id.name().to_string())
    }

    fn select_sink(&mut self, name: &str) {
        self.selected = Self::host_named(name);
    }

    fn render(&mut self) {
        self.mixer.with(Mixer::render);
    }

    fn set_sound_volume(&mut self, volume: f32) {
        self.mixer.with(|m| m.set_sound_gain(volume));
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.mixer.with(|m| m.set_music_gain(volume));
    }
}
