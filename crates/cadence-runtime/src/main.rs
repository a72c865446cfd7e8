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

// Cadence runtime
// Boots the engine, runs the demo simulation, and shuts down.

mod demo;

use anyhow::{Context, Result};
use cadence_core::audio::AudioBackend;
use cadence_core::config::VideoSettings;
use cadence_core::simulation::{InitFlags, Simulation};
use cadence_core::{RunState, Settings, SystemClock};
use cadence_engine::{Engine, EngineServices, HostedLoop, LoopDriver, OwnedLoop, RunOutcome};
use cadence_infra::audio::MixerHandle;
use cadence_infra::{
    spawn_interrupt_watcher, ConsoleOverlay, CpalAudio, FontCache, ImageCrateWriter,
    LanguageTable, NullAudio, PaletteCache, SoftwareVideo, SoundBank, WindowLink, WinitHost,
};
use clap::Parser;
use demo::{DemoHandles, DemoSimulation};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "cadence-runtime", version, about = "Runs the cadence demo simulation")]
struct Cli {
    /// Settings file; defaults apply when it does not exist.
    #[arg(long, default_value = "cadence.json")]
    config: PathBuf,

    /// No window, no audio device, no screen output. Stop with Ctrl-C.
    #[arg(long)]
    headless: bool,

    /// Scene the demo opens with.
    #[arg(long)]
    scene: Option<String>,

    /// Finish the demo after this many dynamic ticks.
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn build_services(
    settings: &Settings,
    headless: bool,
    link: &Arc<WindowLink>,
    run_state: &RunState,
) -> (EngineServices, DemoHandles) {
    let fonts = FontCache::new();
    let palettes = PaletteCache::new(settings.resources.palette_count);
    let language = LanguageTable::new(settings.resources.language_file.clone());
    let sounds = SoundBank::new(settings.resources.sounds_dir.clone());

    let mut video = SoftwareVideo::new(&settings.video);
    let (audio, voices): (Box<dyn AudioBackend>, MixerHandle) = if headless {
        let audio = NullAudio::new();
        let voices = audio.mixer_handle();
        (Box::new(audio), voices)
    } else {
        video = video.with_window_link(Arc::clone(link));
        let audio = CpalAudio::new();
        let voices = audio.mixer_handle();
        (Box::new(audio), voices)
    };
    let handles = DemoHandles {
        font: fonts.handle(),
        palettes: palettes.handle(),
        language: language.handle(),
        sounds: sounds.handle(),
        voices: Some(voices),
    };
    let console = ConsoleOverlay::new(fonts.handle()).with_run_state(run_state.clone());

    let services = EngineServices::new(
        Box::new(video),
        audio,
        Box::new(sounds),
        Box::new(language),
        Box::new(fonts),
        Box::new(palettes),
        Box::new(console),
        Box::new(ImageCrateWriter::new()),
    );
    (services, handles)
}

/// Window size in physical pixels: the logical screen times the scale factor.
fn window_size(video: &VideoSettings) -> (u32, u32) {
    let scale = video.scale_factor.max(1);
    (
        video.screen_w.saturating_mul(scale),
        video.screen_h.saturating_mul(scale),
    )
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("winit", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    if cli.headless {
        settings.video.crossfade_on = false;
        settings.sound.sink = NullAudio::SINK.to_string();
    }

    let run_state = RunState::new();
    let link = Arc::new(WindowLink::new(settings.video.fullscreen));
    let (services, handles) = build_services(&settings, cli.headless, &link, &run_state);
    let window_size = window_size(&settings.video);

    let mut engine = Engine::new(settings, services, Box::new(SystemClock::new()))
        .with_run_state(run_state)
        .with_screen_output(!cli.headless);
    engine.initialize()?;
    let _watcher = spawn_interrupt_watcher(engine.run_state())?;

    let mut driver: Box<dyn LoopDriver> = if cli.headless {
        Box::new(OwnedLoop::new())
    } else {
        let host = WinitHost::new("Cadence", window_size, engine.events().sender(), link)?;
        Box::new(HostedLoop::new(host))
    };

    let flags = InitFlags {
        scene: cli.scene,
        max_dynamic_ticks: cli.max_ticks,
    };
    let mut factory = move |flags: &InitFlags| -> Result<Box<dyn Simulation>> {
        Ok(Box::new(DemoSimulation::new(flags, handles.clone())?))
    };

    let outcome = engine.run(&mut factory, &flags, driver.as_mut());
    engine.shutdown();

    match outcome? {
        RunOutcome::QuitDuringGrace => log::info!("Quit before the demo started."),
        RunOutcome::Completed { iterations } => {
            log::info!("Demo completed after {iterations} iterations.")
        }
    }
    Ok(())
}
