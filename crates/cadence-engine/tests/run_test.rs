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

mod common;

use anyhow::{anyhow, Result};
use cadence_core::simulation::{InitFlags, Simulation};
use cadence_core::{EngineEvent, Key};
use cadence_engine::{
    EngineError, HostedLoop, LoopControl, MainLoopHost, OwnedLoop, RunOutcome,
};
use common::{Harness, Journal, Setup, SimProbe};

/// Hands out one simulation double and journals the call.
fn factory_for(
    probe: &SimProbe,
    journal: &Journal,
) -> impl FnMut(&InitFlags) -> Result<Box<dyn Simulation>> {
    let probe = probe.clone();
    let journal = journal.clone();
    move |_flags: &InitFlags| {
        journal.push("factory");
        Ok(probe.boxed())
    }
}

/// A callback-style host that fires at most `budget` times.
struct CallbackHost {
    budget: u32,
    fired: u32,
}

impl MainLoopHost for CallbackHost {
    fn run_callback(&mut self, callback: &mut dyn FnMut() -> LoopControl) -> Result<()> {
        while self.fired < self.budget {
            self.fired += 1;
            if callback() == LoopControl::Stop {
                return Ok(());
            }
        }
        Err(anyhow!("host budget exhausted"))
    }
}

#[test]
fn test_grace_period_renders_blank_frames_before_the_simulation() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    probe.render_limit.set(Some(2));
    let mut factory = factory_for(&probe, &harness.journal);

    // --- ACT ---
    let outcome = harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut OwnedLoop::new())
        .expect("run succeeds");

    // --- ASSERT ---
    assert_eq!(outcome, RunOutcome::Completed { iterations: 2 });
    let entries = harness.journal.entries();
    let factory_at = harness.journal.position("factory").expect("factory called");
    let grace_frames = entries[..factory_at]
        .iter()
        .filter(|e| *e == "video prepare")
        .count();
    assert_eq!(grace_frames, 30);
    assert!(entries[..factory_at].iter().all(|e| !e.starts_with("sim ")));

    // The simulation is released before the run returns.
    assert_eq!(entries.last().map(String::as_str), Some("sim dropped"));
}

#[test]
fn test_no_grace_period_without_crossfade() {
    let mut setup = Setup::default();
    setup.settings.video.crossfade_on = false;
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    probe.render_limit.set(Some(1));
    let mut factory = factory_for(&probe, &harness.journal);

    harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut OwnedLoop::new())
        .expect("run succeeds");

    let factory_at = harness.journal.position("factory").expect("factory called");
    assert!(harness.journal.entries()[..factory_at]
        .iter()
        .all(|e| e != "video prepare"));
}

#[test]
fn test_run_reapplies_sound_volume_before_creating_the_simulation() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    probe.render_limit.set(Some(1));
    let mut factory = factory_for(&probe, &harness.journal);

    harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut OwnedLoop::new())
        .expect("run succeeds");

    let volume_at = harness
        .journal
        .position("audio sound volume 0.5")
        .expect("volume re-applied");
    let factory_at = harness.journal.position("factory").expect("factory called");
    assert!(volume_at < factory_at);
}

#[test]
fn test_quit_during_grace_skips_the_simulation() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut factory = factory_for(&probe, &harness.journal);
    harness.engine.events().publish(EngineEvent::Quit);

    // --- ACT ---
    let outcome = harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut OwnedLoop::new())
        .expect("run succeeds");

    // --- ASSERT ---
    assert_eq!(outcome, RunOutcome::QuitDuringGrace);
    assert_eq!(harness.journal.count("factory"), 0);
    assert!(harness.engine.run_state().is_stopped());
}

#[test]
fn test_simulation_creation_failure_is_reported_and_engine_still_closes() {
    let mut harness = Harness::started();
    let mut factory = |_: &InitFlags| -> Result<Box<dyn Simulation>> {
        Err(anyhow!("scene file missing"))
    };

    let result = harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut OwnedLoop::new());
    assert!(matches!(result, Err(EngineError::SimulationCreate(_))));

    harness.engine.shutdown();
    assert_eq!(harness.journal.count_prefix("close "), 7);
}

#[test]
fn test_finished_simulation_stops_the_run_state_for_good() {
    // --- ARRANGE ---
    let mut setup = Setup::default();
    setup.settings.video.crossfade_on = false;
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    probe.render_limit.set(Some(3));
    let mut factory = factory_for(&probe, &harness.journal);

    // --- ACT ---
    let first = harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut OwnedLoop::new())
        .expect("run succeeds");

    // --- ASSERT ---
    assert_eq!(first, RunOutcome::Completed { iterations: 3 });
    assert!(harness.engine.run_state().is_stopped());
    assert!(!harness.engine.run_state().is_running());

    // A later run finds the gate closed and executes nothing.
    let second_probe = SimProbe::new(&harness.journal, 16);
    let mut second_factory = factory_for(&second_probe, &harness.journal);
    let second = harness
        .engine
        .run(&mut second_factory, &InitFlags::default(), &mut OwnedLoop::new())
        .expect("run succeeds");
    assert_eq!(second, RunOutcome::Completed { iterations: 0 });
    assert!(harness.engine.run_state().is_stopped());
}

#[test]
fn test_hosted_driver_runs_the_same_loop() {
    let mut setup = Setup::default();
    setup.settings.video.crossfade_on = false;
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    probe.render_limit.set(Some(3));
    let mut factory = factory_for(&probe, &harness.journal);
    let mut driver = HostedLoop::new(CallbackHost {
        budget: 100,
        fired: 0,
    });

    let outcome = harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut driver)
        .expect("run succeeds");

    assert_eq!(outcome, RunOutcome::Completed { iterations: 3 });
    // Three iterations plus the one that observed the finished simulation.
    assert_eq!(driver.host().fired, 4);
}

#[test]
fn test_host_failure_surfaces_as_driver_error() {
    let mut setup = Setup::default();
    setup.settings.video.crossfade_on = false;
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    let mut factory = factory_for(&probe, &harness.journal);
    let mut driver = HostedLoop::new(CallbackHost {
        budget: 5,
        fired: 0,
    });

    let result = harness
        .engine
        .run(&mut factory, &InitFlags::default(), &mut driver);

    assert!(matches!(result, Err(EngineError::Driver(_))));
    assert_eq!(harness.journal.count("sim dropped"), 1);
}

#[test]
fn test_screenshots_get_unique_names() {
    // --- ARRANGE ---
    let dir = tempfile::tempdir().expect("temp dir");
    let mut setup = Setup::default();
    setup.settings.engine.screenshot_dir = dir.path().to_path_buf();
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = harness.engine.new_context();
    ctx.attach_simulation(probe.boxed());
    harness.clock.set(1_000);

    // --- ACT: two captures on the same millisecond ---
    harness
        .engine
        .events()
        .publish(EngineEvent::KeyPressed { key: Key::F1 });
    harness.engine.run_one_iteration(&mut ctx);
    let first = ctx.last_report().screenshot.clone();

    ctx.request_screenshot();
    harness.engine.run_one_iteration(&mut ctx);
    let second = ctx.last_report().screenshot.clone();

    // --- ASSERT ---
    assert_eq!(first, Some(dir.path().join("screenshot_1000.png")));
    assert_eq!(second, Some(dir.path().join("screenshot_1001.png")));
    assert!(dir.path().join("screenshot_1000.png").exists());
    assert!(dir.path().join("screenshot_1001.png").exists());

    // No request, no screenshot.
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(ctx.last_report().screenshot, None);
}

#[test]
fn test_screenshot_falls_back_to_tga_without_png_support() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut setup = Setup {
        png: false,
        ..Setup::default()
    };
    setup.settings.engine.screenshot_dir = dir.path().to_path_buf();
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = harness.engine.new_context();
    ctx.attach_simulation(probe.boxed());
    harness.clock.set(42);

    ctx.request_screenshot();
    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(
        ctx.last_report().screenshot,
        Some(dir.path().join("screenshot_42.tga"))
    );
    assert_eq!(harness.journal.count("write tga"), 1);
}

#[test]
fn test_screenshot_failures_do_not_stop_the_loop() {
    for setup in [
        Setup {
            capture_fails: true,
            ..Setup::default()
        },
        Setup {
            write_fails: true,
            ..Setup::default()
        },
    ] {
        let mut harness = Harness::started_with(setup);
        let probe = SimProbe::new(&harness.journal, 16);
        let mut ctx = harness.engine.new_context();
        ctx.attach_simulation(probe.boxed());

        ctx.request_screenshot();
        let control = harness.engine.run_one_iteration(&mut ctx);

        assert_eq!(control, LoopControl::Continue);
        assert_eq!(ctx.last_report().screenshot, None);
        assert!(ctx.last_report().rendered);

        harness.clock.advance(10);
        assert_eq!(harness.engine.run_one_iteration(&mut ctx), LoopControl::Continue);
        assert_eq!(ctx.last_report().static_ticks, 1);
    }
}
