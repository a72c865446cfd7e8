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

//! Resource subsystems: loaded during engine start-up, released on close.
//!
//! Fonts, palettes, sounds and the language table are shared with their users
//! through cloneable handles, which read empty until the owning subsystem
//! has been initialized.

mod fonts;
mod language;
mod palettes;
mod sounds;

pub use fonts::{BitmapFont, FontCache, FontHandle, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use language::{LanguageHandle, LanguageTable};
pub use palettes::{Palette, PaletteCache, PaletteHandle, PALETTE_SIZE};
pub use sounds::{SoundBank, SoundClip, SoundHandle};
