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

/// A backend-agnostic input or window event.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The user or the platform asked the process to quit.
    Quit,
    /// A keyboard key went down (auto-repeat excluded).
    KeyPressed {
        /// The key that was pressed.
        key: Key,
    },
    /// A keyboard key went up.
    KeyReleased {
        /// The key that was released.
        key: Key,
    },
    /// Text produced by the keyboard layout, used by the console prompt.
    TextInput {
        /// The composed text.
        text: String,
    },
    /// The pointer moved.
    MouseMoved {
        /// The new x-coordinate of the cursor.
        x: f32,
        /// The new y-coordinate of the cursor.
        y: f32,
    },
    /// A mouse button went down.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button went up.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The window changed visibility or size.
    Window(WindowState),
}

impl EngineEvent {
    /// Returns the key of a key-press event.
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            EngineEvent::KeyPressed { key } => Some(*key),
            _ => None,
        }
    }
}

/// Window visibility and geometry transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// The window was minimized (iconified).
    Minimized,
    /// The window became fully hidden or occluded.
    Hidden,
    /// The window was maximized.
    Maximized,
    /// The window was restored from a minimized or maximized state.
    Restored,
    /// The window became visible again.
    Shown,
    /// The window's client area changed size.
    Resized {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// The keys the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Function key F1.
    F1,
    /// Function key F2.
    F2,
    /// Function key F3.
    F3,
    /// Function key F4.
    F4,
    /// Function key F5.
    F5,
    /// Function key F6.
    F6,
    /// Function key F7.
    F7,
    /// Function key F8.
    F8,
    /// Function key F9.
    F9,
    /// Function key F10.
    F10,
    /// Function key F11.
    F11,
    /// Function key F12.
    F12,
    /// The space bar.
    Space,
    /// The tab key.
    Tab,
    /// The backquote / grave key, left of `1` on US layouts.
    Backquote,
    /// The escape key.
    Escape,
    /// Enter / return.
    Enter,
    /// Backspace.
    Backspace,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// A printable character key, lowercased.
    Char(char),
    /// Any other key, identified by a backend-specific code.
    Other(u32),
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}
