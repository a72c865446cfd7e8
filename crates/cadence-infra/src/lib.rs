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

//! Concrete implementations of the engine's external collaborators.
//!
//! Everything here sits behind a `cadence-core` contract, so the engine and
//! its tests never see winit, cpal, hound or image directly.

pub mod audio;
pub mod console;
pub mod image_writer;
pub mod platform;
pub mod resources;
pub mod video;

pub use audio::{CpalAudio, NullAudio};
pub use console::ConsoleOverlay;
pub use image_writer::ImageCrateWriter;
pub use platform::{spawn_interrupt_watcher, WindowLink, WinitHost};
pub use resources::{FontCache, LanguageTable, PaletteCache, SoundBank};
pub use video::SoftwareVideo;
