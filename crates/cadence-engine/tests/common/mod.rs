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

//! Recording doubles for every engine collaborator.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use cadence_core::audio::AudioBackend;
use cadence_core::console::Console;
use cadence_core::simulation::Simulation;
use cadence_core::video::{Canvas, Color, ImageWriter, Rect, Screenshot, VideoBackend};
use cadence_core::{EngineEvent, ManualClock, Settings, Subsystem};
use cadence_engine::{Engine, EngineServices};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

/// A shared, ordered log of every call the doubles receive.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

fn init_result(name: &str, fail_at: Option<&str>, journal: &Journal) -> Result<()> {
    journal.push(format!("init {name}"));
    if fail_at == Some(name) {
        Err(anyhow!("{name} is unavailable"))
    } else {
        Ok(())
    }
}

pub struct MockCanvas;

impl Canvas for MockCanvas {
    fn size(&self) -> (u32, u32) {
        (4, 4)
    }

    fn clear(&mut self, _color: Color) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
}

pub struct MockVideo {
    journal: Journal,
    fail_at: Option<&'static str>,
    fullscreen: bool,
    capture_fails: bool,
    canvas: MockCanvas,
}

impl Subsystem for MockVideo {
    fn name(&self) -> &'static str {
        "video"
    }

    fn init(&mut self) -> Result<()> {
        init_result("video", self.fail_at, &self.journal)
    }

    fn close(&mut self) {
        self.journal.push("close video");
    }
}

impl VideoBackend for MockVideo {
    fn render_prepare(&mut self) {
        self.journal.push("video prepare");
    }

    fn render_finish(&mut self) {
        self.journal.push("video finish");
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn reinit_renderer(&mut self) -> Result<()> {
        self.journal.push("video reinit");
        Ok(())
    }

    fn screenshot(&mut self) -> Result<Screenshot> {
        if self.capture_fails {
            return Err(anyhow!("read-back failed"));
        }
        Ok(Screenshot {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 255],
        })
    }

    fn tick(&mut self) {
        self.journal.push("video tick");
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.journal.push(format!("cursor {visible}"));
    }
}

pub struct MockAudio {
    journal: Journal,
    fail_at: Option<&'static str>,
    sinks: Vec<String>,
}

impl Subsystem for MockAudio {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn init(&mut self) -> Result<()> {
        init_result("audio", self.fail_at, &self.journal)
    }

    fn close(&mut self) {
        self.journal.push("close audio");
    }
}

impl AudioBackend for MockAudio {
    fn is_sink_available(&self, name: &str) -> bool {
        self.sinks.iter().any(|s| s == name)
    }

    fn first_available_sink(&self) -> Option<String> {
        self.sinks.first().cloned()
    }

    fn select_sink(&mut self, name: &str) {
        self.journal.push(format!("audio select {name}"));
    }

    fn render(&mut self) {
        self.journal.push("audio render");
    }

    fn set_sound_volume(&mut self, volume: f32) {
        self.journal.push(format!("audio sound volume {volume}"));
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.journal.push(format!("audio music volume {volume}"));
    }
}

pub struct MockSubsystem {
    name: &'static str,
    journal: Journal,
    fail_at: Option<&'static str>,
}

impl Subsystem for MockSubsystem {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&mut self) -> Result<()> {
        init_result(self.name, self.fail_at, &self.journal)
    }

    fn close(&mut self) {
        self.journal.push(format!("close {}", self.name));
    }
}

pub struct MockConsole {
    journal: Journal,
    fail_at: Option<&'static str>,
    open: Rc<Cell<bool>>,
}

impl Subsystem for MockConsole {
    fn name(&self) -> &'static str {
        "console"
    }

    fn init(&mut self) -> Result<()> {
        init_result("console", self.fail_at, &self.journal)
    }

    fn close(&mut self) {
        self.journal.push("close console");
    }
}

impl Console for MockConsole {
    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn open_window(&mut self) {
        self.journal.push("console open");
        self.open.set(true);
    }

    fn close_window(&mut self) {
        self.journal.push("console close");
        self.open.set(false);
    }

    fn handle_event(&mut self, _simulation: &mut dyn Simulation, event: &EngineEvent) {
        self.journal.push(format!("console event {event:?}"));
    }

    fn tick(&mut self) {
        self.journal.push("console tick");
    }

    fn render(&mut self, _canvas: &mut dyn Canvas) {
        self.journal.push("console render");
    }
}

/// Writes real files so tests can check the names on disk.
pub struct MockWriter {
    journal: Journal,
    png: bool,
    fails: bool,
}

impl MockWriter {
    fn write(&self, kind: &str, image: &Screenshot, path: &Path) -> Result<()> {
        self.journal.push(format!("write {kind}"));
        if self.fails {
            return Err(anyhow!("disk full"));
        }
        std::fs::write(path, &image.pixels)?;
        Ok(())
    }
}

impl ImageWriter for MockWriter {
    fn supports_png(&self) -> bool {
        self.png
    }

    fn write_png(&self, image: &Screenshot, path: &Path) -> Result<()> {
        self.write("png", image, path)
    }

    fn write_tga(&self, image: &Screenshot, path: &Path) -> Result<()> {
        self.write("tga", image, path)
    }
}

/// Knobs and shared handles for one simulation double.
#[derive(Clone)]
pub struct SimProbe {
    pub journal: Journal,
    pub period: Rc<Cell<u32>>,
    pub running: Rc<Cell<bool>>,
    /// Reports finished once this many renders have happened.
    pub render_limit: Rc<Cell<Option<u32>>>,
    pub renders: Rc<Cell<u32>>,
}

impl SimProbe {
    pub fn new(journal: &Journal, period: u32) -> Self {
        Self {
            journal: journal.clone(),
            period: Rc::new(Cell::new(period)),
            running: Rc::new(Cell::new(true)),
            render_limit: Rc::new(Cell::new(None)),
            renders: Rc::new(Cell::new(0)),
        }
    }

    pub fn boxed(&self) -> Box<dyn Simulation> {
        Box::new(MockSimulation {
            probe: self.clone(),
        })
    }
}

pub struct MockSimulation {
    probe: SimProbe,
}

impl Simulation for MockSimulation {
    fn is_running(&self) -> bool {
        let under_limit = self
            .probe
            .render_limit
            .get()
            .is_none_or(|limit| self.probe.renders.get() < limit);
        self.probe.running.get() && under_limit
    }

    fn handle_event(&mut self, event: &EngineEvent) {
        self.probe.journal.push(format!("sim event {event:?}"));
    }

    fn tick_controllers(&mut self) {
        self.probe.journal.push("sim controllers");
    }

    fn static_tick(&mut self) {
        self.probe.journal.push("sim static");
    }

    fn dynamic_tick(&mut self) {
        self.probe.journal.push("sim dynamic");
    }

    fn ms_per_dynamic_tick(&self) -> u32 {
        self.probe.period.get()
    }

    fn render(&mut self, _canvas: &mut dyn Canvas) {
        self.probe.renders.set(self.probe.renders.get() + 1);
        self.probe.journal.push("sim render");
    }

    fn debug_render(&mut self, _canvas: &mut dyn Canvas) {
        self.probe.journal.push("sim debug render");
    }
}

impl Drop for MockSimulation {
    fn drop(&mut self) {
        self.probe.journal.push("sim dropped");
    }
}

/// How to wire the doubles for one test.
pub struct Setup {
    pub settings: Settings,
    pub sinks: Vec<String>,
    pub fail_at: Option<&'static str>,
    pub png: bool,
    pub write_fails: bool,
    pub capture_fails: bool,
    pub fullscreen: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            sinks: vec!["default".to_string()],
            fail_at: None,
            png: true,
            write_fails: false,
            capture_fails: false,
            fullscreen: false,
        }
    }
}

pub struct Harness {
    pub engine: Engine,
    pub clock: ManualClock,
    pub journal: Journal,
    pub console_open: Rc<Cell<bool>>,
}

impl Harness {
    pub fn build(setup: Setup) -> Self {
        let journal = Journal::default();
        let console_open = Rc::new(Cell::new(false));
        let clock = ManualClock::starting_at(0);
        let fail_at = setup.fail_at;

        let subsystem = |name: &'static str| -> Box<dyn Subsystem> {
            Box::new(MockSubsystem {
                name,
                journal: journal.clone(),
                fail_at,
            })
        };

        let services = EngineServices::new(
            Box::new(MockVideo {
                journal: journal.clone(),
                fail_at,
                fullscreen: setup.fullscreen,
                capture_fails: setup.capture_fails,
                canvas: MockCanvas,
            }),
            Box::new(MockAudio {
                journal: journal.clone(),
                fail_at,
                sinks: setup.sinks,
            }),
            subsystem("sounds"),
            subsystem("language"),
            subsystem("fonts"),
            subsystem("palettes"),
            Box::new(MockConsole {
                journal: journal.clone(),
                fail_at,
                open: console_open.clone(),
            }),
            Box::new(MockWriter {
                journal: journal.clone(),
                png: setup.png,
                fails: setup.write_fails,
            }),
        );

        let engine = Engine::new(setup.settings, services, Box::new(clock.clone()));
        Self {
            engine,
            clock,
            journal,
            console_open,
        }
    }

    /// Builds and initializes with default doubles.
    pub fn started() -> Self {
        Self::started_with(Setup::default())
    }

    pub fn started_with(setup: Setup) -> Self {
        let mut harness = Self::build(setup);
        harness
            .engine
            .initialize()
            .expect("doubles initialize cleanly");
        harness.journal.clear();
        harness
    }
}
