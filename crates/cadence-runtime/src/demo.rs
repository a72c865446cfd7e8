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

//! The demo simulation: one animated sprite walking across the screen.
//!
//! Frame tags drive the sprite: `c` picks the palette color, `x` adds to the
//! walking speed and `bf` flashes the sprite with the darker palette. `s<n>`
//! plays the n-th loaded sound (in name order) when the frame is entered.

use anyhow::{anyhow, Result};
use cadence_core::animation::{Animation, AnimationPlayer, PlayerEvent};
use cadence_core::simulation::{InitFlags, Simulation};
use cadence_core::video::{Canvas, Color, Rect};
use cadence_core::{EngineEvent, Key};
use cadence_infra::audio::{MixerHandle, VoiceKind};
use cadence_infra::resources::{FontHandle, LanguageHandle, PaletteHandle, SoundHandle};
use std::sync::Arc;

const SCENES: &[(&str, &str)] = &[
    ("walk", "c9s0A12-c10x2B12-c12x4s1C12-c14x2B12"),
    ("pulse", "c11s0A8-c13s1bfB8-c15C8-bfD8"),
];

const DEFAULT_SCENE: &str = "walk";
const DEFAULT_PERIOD_MS: u32 = 16;
const MIN_PERIOD_MS: u32 = 4;
const MAX_PERIOD_MS: u32 = 128;
const BACKGROUND: usize = 0;
const DEFAULT_COLOR: usize = 15;

/// Resource handles the demo draws and plays with.
#[derive(Debug, Clone, Default)]
pub struct DemoHandles {
    pub font: FontHandle,
    pub palettes: PaletteHandle,
    pub language: LanguageHandle,
    pub sounds: SoundHandle,
    /// Mixer of the audio backend; `None` keeps the demo silent.
    pub voices: Option<MixerHandle>,
}

pub struct DemoSimulation {
    handles: DemoHandles,
    player: AnimationPlayer,
    scene: String,
    period_ms: u32,
    max_dynamic_ticks: Option<u64>,
    dynamic_ticks: u64,
    static_ticks: u64,
    arena_width: i32,
    x: i32,
    direction: i32,
    speed_bonus: i32,
    sprite: u8,
    color_index: usize,
    flash: bool,
    finished: bool,
}

impl DemoSimulation {
    pub fn new(flags: &InitFlags, handles: DemoHandles) -> Result<Self> {
        let scene = flags.scene.as_deref().unwrap_or(DEFAULT_SCENE);
        let (id, script) = SCENES
            .iter()
            .enumerate()
            .find_map(|(i, (name, script))| (*name == scene).then_some((i as u32, *script)))
            .ok_or_else(|| anyhow!("unknown scene '{scene}'"))?;

        let mut player = AnimationPlayer::new(Arc::new(Animation::new(id, script)))?;
        player.set_repeat(true);
        log::info!("Demo scene '{scene}' loaded.");

        Ok(Self {
            handles,
            player,
            scene: scene.to_string(),
            period_ms: DEFAULT_PERIOD_MS,
            max_dynamic_ticks: flags.max_dynamic_ticks,
            dynamic_ticks: 0,
            static_ticks: 0,
            arena_width: 640,
            x: 0,
            direction: 1,
            speed_bonus: 0,
            sprite: 0,
            color_index: DEFAULT_COLOR,
            flash: false,
            finished: false,
        })
    }

    fn sprite_size(&self) -> u32 {
        16 + u32::from(self.sprite) * 4
    }

    fn apply(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::FrameEntered { frame, .. } => {
                self.sprite = frame.sprite_index();
                self.color_index = frame
                    .tag("c")
                    .and_then(|t| t.value)
                    .and_then(|v| usize::try_from(v).ok())
                    .unwrap_or(DEFAULT_COLOR);
                self.speed_bonus = frame.tag("x").and_then(|t| t.value).unwrap_or(0);
                self.flash = frame.tag("bf").is_some();
                if let Some(index) = frame
                    .tag("s")
                    .and_then(|t| t.value)
                    .and_then(|v| usize::try_from(v).ok())
                {
                    self.play_sound(index);
                }
            }
            PlayerEvent::Looped => log::trace!("Demo animation looped."),
            PlayerEvent::Finished => {}
        }
    }

    fn play_sound(&self, index: usize) {
        let Some(voices) = &self.handles.voices else {
            return;
        };
        match self.handles.sounds.nth(index) {
            Some(clip) => voices.play(clip.samples, VoiceKind::Sound),
            None => log::trace!("No sound loaded at index {index}."),
        }
    }

    fn walk(&mut self) {
        let step = (1 + self.speed_bonus) * self.direction;
        let right_edge = (self.arena_width - self.sprite_size() as i32).max(0);
        self.x = (self.x + step).clamp(0, right_edge);
        if self.x == 0 || self.x == right_edge {
            self.direction = -self.direction;
        }
    }

    fn palette_color(&self, palette: usize, index: usize) -> Color {
        self.handles
            .palettes
            .color(palette, index)
            .unwrap_or(Color::WHITE)
    }
}

impl Simulation for DemoSimulation {
    fn is_running(&self) -> bool {
        !self.finished
    }

    fn handle_event(&mut self, event: &EngineEvent) {
        match event.pressed_key() {
            Some(Key::Escape) => {
                log::info!("Demo finished by the player.");
                self.finished = true;
            }
            Some(Key::ArrowUp) => {
                self.period_ms = (self.period_ms / 2).max(MIN_PERIOD_MS);
                log::debug!("Dynamic tick period: {} ms.", self.period_ms);
            }
            Some(Key::ArrowDown) => {
                self.period_ms = (self.period_ms * 2).min(MAX_PERIOD_MS);
                log::debug!("Dynamic tick period: {} ms.", self.period_ms);
            }
            Some(Key::ArrowLeft) => self.direction = -1,
            Some(Key::ArrowRight) => self.direction = 1,
            _ => {}
        }
    }

    // Keyboard only; there are no controllers to poll.
    fn tick_controllers(&mut self) {}

    fn static_tick(&mut self) {
        self.static_ticks += 1;
    }

    fn dynamic_tick(&mut self) {
        if self.finished {
            return;
        }
        for event in self.player.run(1) {
            self.apply(event);
        }
        self.walk();

        self.dynamic_ticks += 1;
        if self
            .max_dynamic_ticks
            .is_some_and(|max| self.dynamic_ticks >= max)
        {
            log::info!("Demo reached {} dynamic ticks.", self.dynamic_ticks);
            self.finished = true;
        }
    }

    fn ms_per_dynamic_tick(&self) -> u32 {
        self.period_ms
    }

    fn render(&mut self, canvas: &mut dyn Canvas) {
        let (width, height) = canvas.size();
        self.arena_width = width as i32;
        canvas.clear(self.palette_color(0, BACKGROUND));

        let palette = usize::from(self.flash);
        let size = self.sprite_size();
        canvas.fill_rect(
            Rect::new(self.x, (height / 2) as i32 - (size / 2) as i32, size, size),
            self.palette_color(palette, self.color_index),
        );

        let title = self
            .handles
            .language
            .lookup("demo.title")
            .unwrap_or_else(|| format!("cadence - {}", self.scene));
        self.handles
            .font
            .draw_text(canvas, 8, 8, &title, self.palette_color(0, 7), 2);
    }

    fn debug_render(&mut self, canvas: &mut dyn Canvas) {
        let (_, height) = canvas.size();
        let size = self.sprite_size();
        let top = (height / 2) as i32 - (size / 2) as i32;
        let outline = self.palette_color(0, 12);
        canvas.fill_rect(Rect::new(self.x, top - 2, size, 1), outline);
        canvas.fill_rect(Rect::new(self.x, top + size as i32 + 1, size, 1), outline);

        let stats = format!(
            "d:{} s:{} p:{}",
            self.dynamic_ticks, self.static_ticks, self.period_ms
        );
        self.handles
            .font
            .draw_text(canvas, 8, height as i32 - 16, &stats, outline, 2);
    }
}
