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

use super::Framebuffer;
use crate::platform::WindowLink;
use anyhow::{anyhow, bail, Result};
use cadence_core::config::VideoSettings;
use cadence_core::video::{Canvas, Color, Screenshot, VideoBackend};
use cadence_core::Subsystem;
use std::sync::Arc;

/// A video backend that renders into an in-memory framebuffer.
///
/// Used directly for headless runs. With a [`WindowLink`] it also forwards
/// cursor and fullscreen requests to a window host.
pub struct SoftwareVideo {
    width: u32,
    height: u32,
    fullscreen: bool,
    framebuffer: Option<Framebuffer>,
    link: Option<Arc<WindowLink>>,
    ticks: u64,
    frames: u64,
    in_frame: bool,
}

impl SoftwareVideo {
    /// Creates a backend for the configured screen size.
    pub fn new(settings: &VideoSettings) -> Self {
        let scale = settings.scale_factor.max(1);
        Self {
            width: settings.screen_w * scale,
            height: settings.screen_h * scale,
            fullscreen: settings.fullscreen,
            framebuffer: None,
            link: None,
            ticks: 0,
            frames: 0,
            in_frame: false,
        }
    }

    /// Forwards window requests through `link`.
    pub fn with_window_link(mut self, link: Arc<WindowLink>) -> Self {
        self.link = Some(link);
        self
    }

    /// Frames completed since init.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Video ticks received since init.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The current framebuffer, once initialized.
    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }
}

impl Subsystem for SoftwareVideo {
    fn name(&self) -> &'static str {
        "video"
    }

    fn init(&mut self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("invalid screen size {}x{}", self.width, self.height);
        }
        self.framebuffer = Some(Framebuffer::new(self.width, self.height));
        if let Some(link) = &self.link {
            link.set_fullscreen(self.fullscreen);
        }
        log::info!(
            "Software video initialized at {}x{}{}.",
            self.width,
            self.height,
            if self.fullscreen { " (fullscreen)" } else { "" }
        );
        Ok(())
    }

    fn close(&mut self) {
        self.framebuffer = None;
        log::debug!("Software video closed after {} frames.", self.frames);
    }
}

impl VideoBackend for SoftwareVideo {
    fn render_prepare(&mut self) {
        if let Some(fb) = self.framebuffer.as_mut() {
            fb.clear(Color::BLACK);
        }
        self.in_frame = true;
    }

    fn render_finish(&mut self) {
        if std::mem::take(&mut self.in_frame) {
            self.frames += 1;
        }
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        let (width, height) = (self.width, self.height);
        self.framebuffer
            .get_or_insert_with(|| Framebuffer::new(width, height))
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn reinit_renderer(&mut self) -> Result<()> {
        self.framebuffer = Some(Framebuffer::new(self.width, self.height));
        log::debug!("Software renderer reinitialized.");
        Ok(())
    }

    fn screenshot(&mut self) -> Result<Screenshot> {
        let fb = self
            .framebuffer
            .as_ref()
            .ok_or_else(|| anyhow!("no framebuffer to read back"))?;
        let (width, height) = fb.size();
        Ok(Screenshot {
            width,
            height,
            pixels: fb.pixels().to_vec(),
        })
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if let Some(link) = &self.link {
            link.set_cursor_visible(visible);
        }
    }
}
