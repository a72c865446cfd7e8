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

use cadence_core::video::{Canvas, Color, Rect};

/// An RGBA8 pixel buffer, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Allocates a black, opaque buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let mut fb = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        fb.clear(Color::BLACK);
        fb
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The color at `(x, y)`, if inside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    fn blend(dst: &mut [u8], color: Color) {
        if color.a == 255 {
            dst.copy_from_slice(&color.to_bytes());
            return;
        }
        let a = u16::from(color.a);
        let src = color.to_bytes();
        for (d, s) in dst.iter_mut().take(3).zip(src) {
            *d = ((u16::from(s) * a + u16::from(*d) * (255 - a)) / 255) as u8;
        }
        dst[3] = 255;
    }
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.clamp(0, self.width as i32) as usize;
        let y0 = rect.y.clamp(0, self.height as i32) as usize;
        let x1 = (i64::from(rect.x) + i64::from(rect.width)).clamp(0, i64::from(self.width)) as usize;
        let y1 = (i64::from(rect.y) + i64::from(rect.height)).clamp(0, i64::from(self.height)) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize * 4;
        for row in y0..y1 {
            let line = &mut self.pixels[row * stride + x0 * 4..row * stride + x1 * 4];
            for px in line.chunks_exact_mut(4) {
                Self::blend(px, color);
            }
        }
    }
}
