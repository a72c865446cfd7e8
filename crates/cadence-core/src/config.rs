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

//! Engine Configuration Module
//!
//! User-facing settings, persisted as JSON. Every field has a default, so
//! a partial file is valid and a missing file simply means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An error raised while loading or saving [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read or written.
    #[error("settings file '{path}': {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings text is not valid JSON for [`Settings`].
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Window and renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Window width in pixels.
    pub screen_w: u32,
    /// Window height in pixels.
    pub screen_h: u32,
    /// Start fullscreen.
    pub fullscreen: bool,
    /// Wait for vertical sync when presenting.
    pub vsync: bool,
    /// Name of the upscaling filter.
    pub scaler: String,
    /// Integer upscaling factor.
    pub scale_factor: u32,
    /// Play the start-up grace period before the simulation begins.
    pub crossfade_on: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            screen_w: 640,
            screen_h: 400,
            fullscreen: false,
            vsync: false,
            scaler: "nearest".to_string(),
            scale_factor: 1,
            crossfade_on: true,
        }
    }
}

/// Audio output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// Preferred output sink.
    pub sink: String,
    /// Effects volume, `0..=10`.
    pub sound_vol: u8,
    /// Music volume, `0..=10`.
    pub music_vol: u8,
}

impl SoundSettings {
    /// Effects volume as a `0.0..=1.0` gain.
    pub fn sound_gain(&self) -> f32 {
        f32::from(self.sound_vol.min(10)) / 10.0
    }

    /// Music volume as a `0.0..=1.0` gain.
    pub fn music_gain(&self) -> f32 {
        f32::from(self.music_vol.min(10)) / 10.0
    }
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            sink: "default".to_string(),
            sound_vol: 5,
            music_vol: 5,
        }
    }
}

/// Loop and runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Number of empty iterations run before the simulation is created
    /// when `video.crossfade_on` is set.
    pub start_grace_iterations: u32,
    /// Upper bound on ticks drained per channel per iteration. `None`
    /// drains the whole backlog.
    pub max_catch_up_ticks: Option<u32>,
    /// Directory screenshots are written to.
    pub screenshot_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            start_grace_iterations: 30,
            max_catch_up_ticks: None,
            screenshot_dir: PathBuf::from("."),
        }
    }
}

/// Resource loader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    /// Directory scanned for `.wav` sound effects.
    pub sounds_dir: Option<PathBuf>,
    /// Language string table; built-in strings are used when unset.
    pub language_file: Option<PathBuf>,
    /// Number of alternate palettes generated at start-up.
    pub palette_count: u32,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            language_file: None,
            palette_count: 3,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window and renderer settings.
    pub video: VideoSettings,
    /// Audio output settings.
    pub sound: SoundSettings,
    /// Loop and runtime settings.
    pub engine: EngineSettings,
    /// Resource loader settings.
    pub resources: ResourceSettings,
}

impl Settings {
    /// Load settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load settings from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::info!(
                "No settings file at '{}', using defaults.",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save settings to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
