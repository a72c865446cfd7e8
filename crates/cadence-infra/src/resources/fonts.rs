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
use cadence_core::video::{Canvas, Color, Rect};
use cadence_core::Subsystem;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Glyph cell width, in font pixels.
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph cell height, in font pixels.
pub const GLYPH_HEIGHT: u32 = 5;

/// Row patterns, top to bottom, `#` for a lit pixel.
const GLYPHS: &[(char, [&str; 5])] = &[
    ('A', [".#.", "#.#", "###", "#.#", "#.#"]),
    ('B', ["##.", "#.#", "##.", "#.#", "##."]),
    ('C', [".##", "#..", "#..", "#..", ".##"]),
    ('D', ["##.", "#.#", "#.#", "#.#", "##."]),
    ('E', ["###", "#..", "##.", "#..", "###"]),
    ('F', ["###", "#..", "##.", "#..", "#.."]),
    ('G', [".##", "#..", "#.#", "#.#", ".##"]),
    ('H', ["#.#", "#.#", "###", "#.#", "#.#"]),
    ('I', ["###", ".#.", ".#.", ".#.", "###"]),
    ('J', ["..#", "..#", "..#", "#.#", ".#."]),
    ('K', ["#.#", "#.#", "##.", "#.#", "#.#"]),
    ('L', ["#..", "#..", "#..", "#..", "###"]),
    ('M', ["#.#", "###", "###", "#.#", "#.#"]),
    ('N', ["##.", "#.#", "#.#", "#.#", "#.#"]),
    ('O', [".#.", "#.#", "#.#", "#.#", ".#."]),
    ('P', ["##.", "#.#", "##.", "#..", "#.."]),
    ('Q', [".#.", "#.#", "#.#", "##.", ".##"]),
    ('R', ["##.", "#.#", "##.", "#.#", "#.#"]),
    ('S', [".##", "#..", ".#.", "..#", "##."]),
    ('T', ["###", ".#.", ".#.", ".#.", ".#."]),
    ('U', ["#.#", "#.#", "#.#", "#.#", "###"]),
    ('V', ["#.#", "#.#", "#.#", "#.#", ".#."]),
    ('W', ["#.#", "#.#", "###", "###", "#.#"]),
    ('X', ["#.#", "#.#", ".#.", "#.#", "#.#"]),
    ('Y', ["#.#", "#.#", ".#.", ".#.", ".#."]),
    ('Z', ["###", "..#", ".#.", "#..", "###"]),
    ('0', ["###", "#.#", "#.#", "#.#", "###"]),
    ('1', [".#.", "##.", ".#.", ".#.", "###"]),
    ('2', ["##.", "..#", ".#.", "#..", "###"]),
    ('3', ["##.", "..#", ".#.", "..#", "##."]),
    ('4', ["#.#", "#.#", "###", "..#", "..#"]),
    ('5', ["###", "#..", "##.", "..#", "##."]),
    ('6', [".##", "#..", "###", "#.#", "###"]),
    ('7', ["###", "..#", ".#.", ".#.", ".#."]),
    ('8', ["###", "#.#", "###", "#.#", "###"]),
    ('9', ["###", "#.#", "###", "..#", "##."]),
    ('.', ["...", "...", "...", "...", ".#."]),
    (',', ["...", "...", "...", ".#.", "#.."]),
    (':', ["...", ".#.", "...", ".#.", "..."]),
    ('-', ["...", "...", "###", "...", "..."]),
    ('_', ["...", "...", "...", "...", "###"]),
    ('=', ["...", "###", "...", "###", "..."]),
    ('/', ["..#", "..#", ".#.", "#..", "#.."]),
    ('?', ["##.", "..#", ".#.", "...", ".#."]),
    ('!', [".#.", ".#.", ".#.", "...", ".#."]),
    ('>', ["#..", ".#.", "..#", ".#.", "#.."]),
    ('\'', [".#.", ".#.", "...", "...", "..."]),
    ('(', ["..#", ".#.", ".#.", ".#.", "..#"]),
    (')', ["#..", ".#.", ".#.", ".#.", "#.."]),
];

/// A monospaced bitmap font. Lowercase letters draw as uppercase; unknown
/// characters draw as blanks.
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    glyphs: HashMap<char, u16>,
}

impl BitmapFont {
    fn parse(table: &[(char, [&str; 5])]) -> Result<Self> {
        let mut glyphs = HashMap::with_capacity(table.len());
        for (c, rows) in table {
            let mut bits = 0u16;
            for (y, row) in rows.iter().enumerate() {
                if row.len() != GLYPH_WIDTH as usize {
                    bail!("glyph '{c}' row {y} is {} wide", row.len());
                }
                for (x, px) in row.chars().enumerate() {
                    if px == '#' {
                        bits |= 1 << (y * GLYPH_WIDTH as usize + x);
                    }
                }
            }
            glyphs.insert(*c, bits);
        }
        Ok(Self { glyphs })
    }

    /// Returns `true` if `(x, y)` of the glyph for `c` is lit.
    pub fn is_lit(&self, c: char, x: u32, y: u32) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        self.glyphs
            .get(&c.to_ascii_uppercase())
            .is_some_and(|bits| bits & (1 << (y * GLYPH_WIDTH + x)) != 0)
    }

    /// Horizontal advance per character at `scale`, including spacing.
    pub fn advance(scale: u32) -> u32 {
        (GLYPH_WIDTH + 1) * scale
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        scale: u32,
    ) {
        let step = Self::advance(scale) as i32;
        for (i, c) in text.chars().enumerate() {
            let origin = x + i as i32 * step;
            for gy in 0..GLYPH_HEIGHT {
                for gx in 0..GLYPH_WIDTH {
                    if self.is_lit(c, gx, gy) {
                        canvas.fill_rect(
                            Rect::new(
                                origin + (gx * scale) as i32,
                                y + (gy * scale) as i32,
                                scale,
                                scale,
                            ),
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Shared access to the loaded font. Draws nothing until the font cache
/// has been initialized.
#[derive(Debug, Clone, Default)]
pub struct FontHandle {
    font: Arc<RwLock<Option<BitmapFont>>>,
}

impl FontHandle {
    /// Draws `text` if the font is loaded.
    pub fn draw_text(
        &self,
        canvas: &mut dyn Canvas,
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        scale: u32,
    ) {
        if let Ok(guard) = self.font.read() {
            if let Some(font) = guard.as_ref() {
                font.draw_text(canvas, x, y, text, color, scale);
            }
        }
    }

    /// Returns `true` once the font is loaded.
    pub fn is_loaded(&self) -> bool {
        self.font.read().map(|f| f.is_some()).unwrap_or(false)
    }
}

/// Builds the built-in bitmap font at start-up.
#[derive(Default)]
pub struct FontCache {
    handle: FontHandle,
}

impl FontCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that sees the font once built.
    pub fn handle(&self) -> FontHandle {
        self.handle.clone()
    }
}

impl Subsystem for FontCache {
    fn name(&self) -> &'static str {
        "fonts"
    }

    fn init(&mut self) -> Result<()> {
        let font = BitmapFont::parse(GLYPHS)?;
        log::debug!("Built bitmap font with {} glyphs.", font.glyphs.len());
        match self.handle.font.write() {
            Ok(mut slot) => *slot = Some(font),
            Err(_) => bail!("font lock poisoned"),
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Ok(mut slot) = self.handle.font.write() {
            *slot = None;
        }
    }
}
