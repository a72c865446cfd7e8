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

//! Defines the abstract contracts of the rendering subsystem.
//!
//! The frame scheduler drives a [`VideoBackend`] through a fixed sequence
//! each rendered iteration: `render_prepare`, simulation and overlay drawing
//! onto the [`Canvas`], `render_finish`, then an optional `screenshot`.

use crate::subsystem::Subsystem;
use anyhow::Result;
use std::path::Path;

/// An RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color as `[r, g, b, a]` bytes.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The drawing surface handed to the simulation and the console while a
/// frame is being rendered.
pub trait Canvas {
    /// Returns the `(width, height)` of the surface in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface with a single color.
    fn clear(&mut self, color: Color);

    /// Fills a rectangle, clipped to the surface. Alpha is blended over the
    /// existing content.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// A captured frame, tightly packed RGBA8 rows.
///
/// The pixel memory is owned by this value and released when it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// The abstract contract for the rendering subsystem.
pub trait VideoBackend: Subsystem {
    /// Begins a frame.
    fn render_prepare(&mut self);

    /// Ends a frame and presents it.
    fn render_finish(&mut self);

    /// The surface the current frame is drawn on.
    fn canvas(&mut self) -> &mut dyn Canvas;

    /// Returns `true` if the output is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Rebuilds the renderer, e.g. after the window came back from a
    /// minimized fullscreen state.
    fn reinit_renderer(&mut self) -> Result<()>;

    /// Captures the last finished frame.
    fn screenshot(&mut self) -> Result<Screenshot>;

    /// Static-tick maintenance (cache eviction).
    fn tick(&mut self);

    /// Shows or hides the pointer.
    fn set_cursor_visible(&mut self, visible: bool);
}

/// Encodes captured frames to image files.
pub trait ImageWriter {
    /// Returns `true` when PNG encoding is available.
    fn supports_png(&self) -> bool;

    /// Writes `image` as PNG to `path`.
    fn write_png(&self, image: &Screenshot, path: &Path) -> Result<()>;

    /// Writes `image` as TGA to `path`.
    fn write_tga(&self, image: &Screenshot, path: &Path) -> Result<()>;
}
