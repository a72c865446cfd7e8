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

//! A `winit` event loop that drives the engine through a callback.

use super::input::{translate_text_input, translate_winit_input};
use super::WindowLink;
use anyhow::{anyhow, Result};
use cadence_core::event::WindowState;
use cadence_core::EngineEvent;
use cadence_engine::{LoopControl, MainLoopHost};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::run_on_demand::EventLoopExtRunOnDemand;
use winit::window::{Fullscreen, Window, WindowId};

/// Owns the window and the `winit` event loop.
///
/// Window and input events are translated and published to the engine's
/// event queue; after each batch the engine callback runs once. The loop
/// can be entered repeatedly (grace period, then the main loop).
pub struct WinitHost {
    event_loop: EventLoop<()>,
    window: Option<Window>,
    state: HostState,
}

struct HostState {
    title: String,
    width: u32,
    height: u32,
    events: flume::Sender<EngineEvent>,
    link: Arc<WindowLink>,
    minimized: bool,
    applied_cursor: bool,
    applied_fullscreen: Option<bool>,
}

impl WinitHost {
    /// Creates the event loop. The window itself is created when the loop
    /// first resumes.
    pub fn new(
        title: impl Into<String>,
        (width, height): (u32, u32),
        events: flume::Sender<EngineEvent>,
        link: Arc<WindowLink>,
    ) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            window: None,
            state: HostState {
                title: title.into(),
                width,
                height,
                events,
                link,
                minimized: false,
                applied_cursor: true,
                applied_fullscreen: None,
            },
        })
    }
}

impl MainLoopHost for WinitHost {
    fn run_callback(&mut self, callback: &mut dyn FnMut() -> LoopControl) -> Result<()> {
        let mut app = HostApp {
            window: &mut self.window,
            state: &mut self.state,
            callback,
            failure: None,
        };
        self.event_loop.run_app_on_demand(&mut app)?;
        match app.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct HostApp<'a> {
    window: &'a mut Option<Window>,
    state: &'a mut HostState,
    callback: &'a mut dyn FnMut() -> LoopControl,
    failure: Option<anyhow::Error>,
}

impl HostApp<'_> {
    fn publish(&self, event: EngineEvent) {
        if self.state.events.send(event).is_err() {
            log::warn!("Engine event queue is gone; dropping window event.");
        }
    }

    fn apply_link(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let cursor = self.state.link.cursor_visible();
        if cursor != self.state.applied_cursor {
            window.set_cursor_visible(cursor);
            self.state.applied_cursor = cursor;
        }

        let fullscreen = self.state.link.fullscreen();
        if self.state.applied_fullscreen != Some(fullscreen) {
            window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
            self.state.applied_fullscreen = Some(fullscreen);
        }
    }

    fn window_state(&mut self, event: &WindowEvent) -> Option<WindowState> {
        match event {
            WindowEvent::Resized(size) if size.width == 0 || size.height == 0 => {
                self.state.minimized = true;
                Some(WindowState::Minimized)
            }
            WindowEvent::Resized(size) => {
                if std::mem::take(&mut self.state.minimized) {
                    self.publish(EngineEvent::Window(WindowState::Restored));
                }
                Some(WindowState::Resized {
                    width: size.width,
                    height: size.height,
                })
            }
            WindowEvent::Occluded(true) => Some(WindowState::Hidden),
            WindowEvent::Occluded(false) => Some(WindowState::Shown),
            _ => None,
        }
    }
}

impl ApplicationHandler for HostApp<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if self.window.is_some() {
            return;
        }

        log::info!(
            "Building window '{}' at {}x{}.",
            self.state.title,
            self.state.width,
            self.state.height
        );
        let attributes = Window::default_attributes()
            .with_title(self.state.title.clone())
            .with_inner_size(LogicalSize::new(self.state.width, self.state.height))
            .with_visible(true);

        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("Window created (id: {:?}).", window.id());
                *self.window = Some(window);
                self.apply_link();
            }
            Err(e) => {
                self.failure = Some(anyhow!("window creation failed: {e}"));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            log::info!("Close requested.");
            self.publish(EngineEvent::Quit);
            return;
        }

        if let Some(state) = self.window_state(&event) {
            self.publish(EngineEvent::Window(state));
            return;
        }

        if let Some(input) = translate_winit_input(&event) {
            self.publish(input);
        }
        if let Some(text) = translate_text_input(&event) {
            self.publish(text);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.failure.is_some() {
            return;
        }
        self.apply_link();
        if (self.callback)() == LoopControl::Stop {
            event_loop.exit();
        }
    }
}
