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

//! Translation from `winit` window events to [`EngineEvent`]s.
//!
//! Window-state changes are not handled here; the host tracks those itself
//! because they depend on the previous state.

use cadence_core::event::MouseButton;
use cadence_core::{EngineEvent, Key};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates a user-input `WindowEvent` into an engine event.
///
/// # Returns
///
/// `Some(EngineEvent)` for key presses and releases, mouse motion and mouse
/// buttons; `None` for everything else, including key repeats and keys the
/// engine has no name for.
pub fn translate_winit_input(event: &WindowEvent) -> Option<EngineEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let PhysicalKey::Code(code) = key_event.physical_key else {
                return None;
            };
            let key = map_keycode(code)?;
            match key_event.state {
                ElementState::Pressed if !key_event.repeat => Some(EngineEvent::KeyPressed { key }),
                ElementState::Released => Some(EngineEvent::KeyReleased { key }),
                _ => None,
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(EngineEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            Some(match state {
                ElementState::Pressed => EngineEvent::MouseButtonPressed { button },
                ElementState::Released => EngineEvent::MouseButtonReleased { button },
            })
        }
        _ => None,
    }
}

/// Extracts typed text from a key press, for the console's line editor.
pub fn translate_text_input(event: &WindowEvent) -> Option<EngineEvent> {
    let WindowEvent::KeyboardInput {
        event: key_event, ..
    } = event
    else {
        return None;
    };
    if key_event.state != ElementState::Pressed {
        return None;
    }
    let text: String = key_event
        .text
        .as_ref()?
        .chars()
        .filter(|c| !c.is_control())
        .collect();
    (!text.is_empty()).then_some(EngineEvent::TextInput { text })
}

fn map_keycode(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backquote => Key::Backquote,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        other => return map_character_key(other).map(Key::Char),
    };
    Some(key)
}

/// Letter and digit keys, by physical position.
fn map_character_key(code: KeyCode) -> Option<char> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    if let Some(i) = LETTERS.iter().position(|k| *k == code) {
        return Some((b'a' + i as u8) as char);
    }
    DIGITS
        .iter()
        .position(|k| *k == code)
        .map(|i| (b'0' + i as u8) as char)
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}
