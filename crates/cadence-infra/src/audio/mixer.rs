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

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Which volume control a voice follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceKind {
    /// Effects, scaled by the sound volume.
    Sound,
    /// Background music, scaled by the music volume.
    Music,
}

#[derive(Debug)]
struct Voice {
    samples: Arc<[f32]>,
    cursor: usize,
    kind: VoiceKind,
}

/// Mixes queued voices into an interleaved sample queue.
///
/// The main loop calls [`Mixer::render`] once per iteration to keep the
/// queue topped up; the output stream drains it with [`Mixer::pull`].
#[derive(Debug)]
pub struct Mixer {
    voices: Vec<Voice>,
    queue: VecDeque<f32>,
    target_len: usize,
    sound_gain: f32,
    music_gain: f32,
}

impl Mixer {
    /// Creates a mixer that buffers up to `target_len` samples ahead.
    pub fn new(target_len: usize) -> Self {
        Self {
            voices: Vec::new(),
            queue: VecDeque::with_capacity(target_len),
            target_len,
            sound_gain: 1.0,
            music_gain: 1.0,
        }
    }

    /// Starts playing `samples` (already interleaved for the output).
    pub fn play(&mut self, samples: Arc<[f32]>, kind: VoiceKind) {
        self.voices.push(Voice {
            samples,
            cursor: 0,
            kind,
        });
    }

    /// Sets the effect volume, clamped to `0.0..=1.0`.
    pub fn set_sound_gain(&mut self, gain: f32) {
        self.sound_gain = gain.clamp(0.0, 1.0);
    }

    /// Sets the music volume, clamped to `0.0..=1.0`.
    pub fn set_music_gain(&mut self, gain: f32) {
        self.music_gain = gain.clamp(0.0, 1.0);
    }

    /// Voices still playing.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Samples buffered and not yet pulled.
    pub fn buffered(&self) -> usize {
        self.queue.len()
    }

    /// Mixes until the queue holds `target_len` samples. Finished voices are
    /// dropped.
    pub fn render(&mut self) {
        let needed = self.target_len.saturating_sub(self.queue.len());
        for _ in 0..needed {
            let mut sample = 0.0;
            for voice in &mut self.voices {
                if let Some(s) = voice.samples.get(voice.cursor) {
                    let gain = match voice.kind {
                        VoiceKind::Sound => self.sound_gain,
                        VoiceKind::Music => self.music_gain,
                    };
                    sample += s * gain;
                    voice.cursor += 1;
                }
            }
            self.queue.push_back(sample.clamp(-1.0, 1.0));
        }
        self.voices.retain(|v| v.cursor < v.samples.len());
    }

    /// Fills `out` from the queue, padding with silence on underrun.
    pub fn pull(&mut self, out: &mut [f32]) {
        for slot in out.iter_mut() {
            *slot = self.queue.pop_front().unwrap_or(0.0);
        }
    }
}

/// A shared mixer: the audio backend renders from it, simulations queue
/// voices on it.
#[derive(Debug, Clone)]
pub struct MixerHandle {
    mixer: Arc<Mutex<Mixer>>,
}

impl MixerHandle {
    /// Creates a shared mixer buffering `target_len` samples ahead.
    pub fn new(target_len: usize) -> Self {
        Self {
            mixer: Arc::new(Mutex::new(Mixer::new(target_len))),
        }
    }

    /// Starts playing interleaved `samples`.
    pub fn play(&self, samples: Arc<[f32]>, kind: VoiceKind) {
        self.with(|mixer| mixer.play(samples, kind));
    }

    /// Voices still playing; 0 if the mixer lock is poisoned.
    pub fn active_voices(&self) -> usize {
        self.mixer.lock().map(|m| m.active_voices()).unwrap_or(0)
    }

    /// Runs `f` on the locked mixer.
    pub fn with(&self, f: impl FnOnce(&mut Mixer)) {
        match self.mixer.lock() {
            Ok(mut mixer) => f(&mut mixer),
            Err(_) => log::error!("Audio mixer lock poisoned."),
        }
    }
}
