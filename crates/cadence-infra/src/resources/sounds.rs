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

use anyhow::{bail, Context, Result};
use cadence_core::Subsystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A decoded sound, as interleaved `f32` samples.
#[derive(Debug, Clone)]
pub struct SoundClip {
    /// Channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved samples in `-1.0..=1.0`.
    pub samples: Arc<[f32]>,
}

/// Read access to the loaded sounds.
#[derive(Debug, Clone, Default)]
pub struct SoundHandle {
    clips: Arc<RwLock<BTreeMap<String, SoundClip>>>,
}

impl SoundHandle {
    /// Looks a clip up by name.
    pub fn get(&self, name: &str) -> Option<SoundClip> {
        self.clips.read().ok()?.get(name).cloned()
    }

    /// The `index`-th clip in name order.
    pub fn nth(&self, index: usize) -> Option<SoundClip> {
        self.clips.read().ok()?.values().nth(index).cloned()
    }

    /// Number of loaded clips.
    pub fn len(&self) -> usize {
        self.clips.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads every `.wav` file from a directory at start-up, keyed by file stem.
pub struct SoundBank {
    dir: Option<PathBuf>,
    handle: SoundHandle,
}

impl SoundBank {
    /// Creates a bank over `dir`; `None` gives an empty bank.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            handle: SoundHandle::default(),
        }
    }

    /// A handle that sees the clips once loaded.
    pub fn handle(&self) -> SoundHandle {
        self.handle.clone()
    }

    fn load_clip(path: &Path) -> Result<SoundClip> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()?
            }
        };
        Ok(SoundClip {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            samples: samples.into(),
        })
    }
}

impl Subsystem for SoundBank {
    fn name(&self) -> &'static str {
        "sounds"
    }

    fn init(&mut self) -> Result<()> {
        let Some(dir) = &self.dir else {
            log::debug!("No sounds directory configured.");
            return Ok(());
        };

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("reading sounds directory {}", dir.display()))?;
        let mut loaded = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if !path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let clip =
                Self::load_clip(&path).with_context(|| format!("loading {}", path.display()))?;
            loaded.insert(stem.to_string(), clip);
        }

        let count = loaded.len();
        match self.handle.clips.write() {
            Ok(mut clips) => *clips = loaded,
            Err(_) => bail!("sound lock poisoned"),
        }
        log::info!("Loaded {count} sounds from {}.", dir.display());
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut clips) = self.handle.clips.write() {
            clips.clear();
        }
    }
}
