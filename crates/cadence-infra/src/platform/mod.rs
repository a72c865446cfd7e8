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

//! Platform glue: window host, input translation, interrupt handling.

pub mod input;
mod signal;
mod winit_host;

pub use signal::spawn_interrupt_watcher;
pub use winit_host::WinitHost;

use std::sync::atomic::{AtomicBool, Ordering};

/// Window requests made by the video backend and applied by the host on
/// its own thread.
#[derive(Debug)]
pub struct WindowLink {
    cursor_visible: AtomicBool,
    fullscreen: AtomicBool,
}

impl WindowLink {
    /// Creates a link with the cursor shown.
    pub fn new(fullscreen: bool) -> Self {
        Self {
            cursor_visible: AtomicBool::new(true),
            fullscreen: AtomicBool::new(fullscreen),
        }
    }

    /// Asks the host to show or hide the cursor.
    pub fn set_cursor_visible(&self, visible: bool) {
        self.cursor_visible.store(visible, Ordering::Relaxed);
    }

    /// The requested cursor visibility.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible.load(Ordering::Relaxed)
    }

    /// Asks the host to enter or leave fullscreen.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.fullscreen.store(fullscreen, Ordering::Relaxed);
    }

    /// The requested fullscreen state.
    pub fn fullscreen(&self) -> bool {
        self.fullscreen.load(Ordering::Relaxed)
    }
}
