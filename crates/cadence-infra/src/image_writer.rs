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

//! Screenshot encoding through the `image` crate.

use anyhow::{bail, Context, Result};
use cadence_core::video::{ImageWriter, Screenshot};
use image::{ColorType, ImageFormat};
use std::path::Path;

/// Writes screenshots as PNG, or TGA when PNG is switched off.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateWriter {
    png: bool,
}

impl ImageCrateWriter {
    /// A writer with PNG support.
    pub fn new() -> Self {
        Self { png: true }
    }

    /// A writer that only produces TGA.
    pub fn tga_only() -> Self {
        Self { png: false }
    }

    fn write(image: &Screenshot, path: &Path, format: ImageFormat) -> Result<()> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.pixels.len() != expected {
            bail!(
                "screenshot buffer holds {} bytes, expected {expected} for {}x{}",
                image.pixels.len(),
                image.width,
                image.height
            );
        }
        image::save_buffer_with_format(
            path,
            &image.pixels,
            image.width,
            image.height,
            ColorType::Rgba8,
            format,
        )
        .with_context(|| format!("writing {}", path.display()))
    }
}

impl Default for ImageCrateWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageCrateWriter {
    fn supports_png(&self) -> bool {
        self.png
    }

    fn write_png(&self, image: &Screenshot, path: &Path) -> Result<()> {
        Self::write(image, path, ImageFormat::Png)
    }

    fn write_tga(&self, image: &Screenshot, path: &Path) -> Result<()> {
        Self::write(image, path, ImageFormat::Tga)
    }
}
