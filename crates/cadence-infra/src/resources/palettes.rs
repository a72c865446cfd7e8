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

use anyhow::{bail, Result};
use cadence_core::video::Color;
use cadence_core::Subsystem;
use std::sync::{Arc, RwLock};

/// Colors per palette.
pub const PALETTE_SIZE: usize = 16;

/// A fixed set of indexed colors.
pub type Palette = [Color; PALETTE_SIZE];

const BASE: Palette = [
    Color::rgb(0, 0, 0),
    Color::rgb(0, 0, 170),
    Color::rgb(0, 170, 0),
    Color::rgb(0, 170, 170),
    Color::rgb(170, 0, 0),
    Color::rgb(170, 0, 170),
    Color::rgb(170, 85, 0),
    Color::rgb(170, 170, 170),
    Color::rgb(85, 85, 85),
    Color::rgb(85, 85, 255),
    Color::rgb(85, 255, 85),
    Color::rgb(85, 255, 255),
    Color::rgb(255, 85, 85),
    Color::rgb(255, 85, 255),
    Color::rgb(255, 255, 85),
    Color::rgb(255, 255, 255),
];

/// Read access to the loaded palettes.
#[derive(Debug, Clone, Default)]
pub struct PaletteHandle {
    palettes: Arc<RwLock<Vec<Palette>>>,
}

impl PaletteHandle {
    /// Color `index` of palette `palette`, if both exist.
    pub fn color(&self, palette: usize, index: usize) -> Option<Color> {
        let palettes = self.palettes.read().ok()?;
        palettes.get(palette)?.get(index).copied()
    }

    /// Number of loaded palettes.
    pub fn len(&self) -> usize {
        self.palettes.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Returns `true` if no palette is loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the palette set at start-up: palette 0 is the base set, each
/// following one a darker variant of it.
pub struct PaletteCache {
    count: u32,
    handle: PaletteHandle,
}

impl PaletteCache {
    /// Creates a cache that will hold `count` palettes.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            handle: PaletteHandle::default(),
        }
    }

    /// A handle that sees the palettes once built.
    pub fn handle(&self) -> PaletteHandle {
        self.handle.clone()
    }

    fn shade(step: u32) -> Palette {
        let keep = |c: u8| (u32::from(c) * 2 / (step + 2)) as u8;
        BASE.map(|c| Color::rgba(keep(c.r), keep(c.g), keep(c.b), c.a))
    }
}

impl Subsystem for PaletteCache {
    fn name(&self) -> &'static str {
        "palettes"
    }

    fn init(&mut self) -> Result<()> {
        if self.count == 0 {
            bail!("at least one palette is required");
        }
        let built: Vec<Palette> = (0..self.count).map(Self::shade).collect();
        match self.handle.palettes.write() {
            Ok(mut palettes) => *palettes = built,
            Err(_) => bail!("palette lock poisoned"),
        }
        log::debug!("Built {} palettes.", self.count);
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut palettes) = self.handle.palettes.write() {
            palettes.clear();
        }
    }
}
