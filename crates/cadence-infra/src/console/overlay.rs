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

use crate::resources::{BitmapFont, FontHandle, GLYPH_HEIGHT};
use anyhow::Result;
use cadence_core::console::Console;
use cadence_core::simulation::Simulation;
use cadence_core::video::{Canvas, Color, Rect};
use cadence_core::{EngineEvent, Key, RunState, Subsystem};
use std::collections::VecDeque;

const MAX_LINES: usize = 64;
const MAX_HISTORY: usize = 32;
/// Static ticks per cursor blink phase (250 ms).
const BLINK_TICKS: u64 = 25;
const TEXT_SCALE: u32 = 2;
const PANEL: Color = Color::rgba(16, 16, 32, 208);
const TEXT: Color = Color::rgb(200, 220, 200);
const PROMPT: &str = "> ";

/// A drop-down console with a line editor and a few built-in commands.
///
/// While open it receives every event the engine would otherwise give the
/// simulation.
pub struct ConsoleOverlay {
    font: FontHandle,
    run_state: Option<RunState>,
    open: bool,
    input: String,
    lines: VecDeque<String>,
    history: Vec<String>,
    recall: Option<usize>,
    ticks: u64,
}

impl ConsoleOverlay {
    /// Creates a closed console drawing with `font`.
    pub fn new(font: FontHandle) -> Self {
        Self {
            font,
            run_state: None,
            open: false,
            input: String::new(),
            lines: VecDeque::new(),
            history: Vec::new(),
            recall: None,
            ticks: 0,
        }
    }

    /// Lets the `quit` command stop the engine.
    pub fn with_run_state(mut self, run_state: RunState) -> Self {
        self.run_state = Some(run_state);
        self
    }

    /// The scrollback, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The line being edited.
    pub fn input(&self) -> &str {
        &self.input
    }

    fn print(&mut self, line: impl Into<String>) {
        if self.lines.len() == MAX_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.recall = None;
        let command = line.trim();
        if command.is_empty() {
            return;
        }

        self.print(format!("{PROMPT}{command}"));
        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(command.to_string());
        self.execute(command);
    }

    fn execute(&mut self, command: &str) {
        let (name, rest) = command
            .split_once(' ')
            .map_or((command, ""), |(n, r)| (n, r.trim()));
        match name {
            "help" => {
                self.print("commands: help, clear, echo <text>, history, quit");
            }
            "clear" => self.lines.clear(),
            "echo" => self.print(rest.to_string()),
            "history" => {
                let entries: Vec<String> = self
                    .history
                    .iter()
                    .enumerate()
                    .map(|(i, h)| format!("{i}: {h}"))
                    .collect();
                for entry in entries {
                    self.print(entry);
                }
            }
            "quit" => match &self.run_state {
                Some(run_state) => {
                    log::info!("Quit requested from console.");
                    run_state.request_stop();
                }
                None => self.print("quit is unavailable"),
            },
            other => self.print(format!("unknown command: {other}")),
        }
    }

    fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.recall {
            Some(0) => 0,
            Some(i) => i - 1,
            None => self.history.len() - 1,
        };
        self.recall = Some(index);
        self.input = self.history[index].clone();
    }

    fn recall_next(&mut self) {
        match self.recall {
            Some(i) if i + 1 < self.history.len() => {
                self.recall = Some(i + 1);
                self.input = self.history[i + 1].clone();
            }
            Some(_) => {
                self.recall = None;
                self.input.clear();
            }
            None => {}
        }
    }
}

impl Subsystem for ConsoleOverlay {
    fn name(&self) -> &'static str {
        "console"
    }

    fn init(&mut self) -> Result<()> {
        self.print("cadence console - type help");
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.lines.clear();
        self.input.clear();
    }
}

impl Console for ConsoleOverlay {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open_window(&mut self) {
        log::debug!("Console opened.");
        self.open = true;
    }

    fn close_window(&mut self) {
        log::debug!("Console closed.");
        self.open = false;
    }

    fn handle_event(&mut self, _simulation: &mut dyn Simulation, event: &EngineEvent) {
        match event {
            EngineEvent::TextInput { text } => {
                self.input
                    .extend(text.chars().filter(|c| *c != '`' && !c.is_control()));
            }
            EngineEvent::KeyPressed { key } => match key {
                Key::Enter => self.submit(),
                Key::Backspace => {
                    self.input.pop();
                }
                Key::ArrowUp => self.recall_previous(),
                Key::ArrowDown => self.recall_next(),
                _ => {}
            },
            _ => {}
        }
    }

    fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    fn render(&mut self, canvas: &mut dyn Canvas) {
        if !self.open {
            return;
        }

        let (width, height) = canvas.size();
        let panel_height = height / 2;
        canvas.fill_rect(Rect::new(0, 0, width, panel_height), PANEL);

        let line_height = (GLYPH_HEIGHT + 2) * TEXT_SCALE;
        let visible = (panel_height / line_height).saturating_sub(1) as usize;
        let mut y = panel_height as i32 - 2 * line_height as i32;
        for line in self.lines.iter().rev().take(visible) {
            self.font.draw_text(canvas, 4, y, line, TEXT, TEXT_SCALE);
            y -= line_height as i32;
        }

        let input_y = panel_height as i32 - line_height as i32;
        let prompt = format!("{PROMPT}{}", self.input);
        self.font
            .draw_text(canvas, 4, input_y, &prompt, TEXT, TEXT_SCALE);
        if (self.ticks / BLINK_TICKS) % 2 == 0 {
            let cursor_x = 4 + (prompt.chars().count() as u32 * BitmapFont::advance(TEXT_SCALE)) as i32;
            canvas.fill_rect(
                Rect::new(cursor_x, input_y, TEXT_SCALE * 3, GLYPH_HEIGHT * TEXT_SCALE),
                TEXT,
            );
        }
    }
}
