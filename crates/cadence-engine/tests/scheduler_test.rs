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

use cadence_core::event::WindowState;
use cadence_core::{Clock, EngineEvent, Key};
use cadence_engine::{EngineContext, LoopControl};
use common::{Harness, Setup, SimProbe};

fn context_with(harness: &Harness, probe: &SimProbe) -> EngineContext {
    let mut ctx = harness.engine.new_context();
    ctx.attach_simulation(probe.boxed());
    ctx
}

fn press(key: Key) -> EngineEvent {
    EngineEvent::KeyPressed { key }
}

#[test]
fn test_37ms_frame_runs_three_static_and_two_dynamic_ticks() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    // --- ACT ---
    harness.clock.advance(37);
    let control = harness.engine.run_one_iteration(&mut ctx);

    // --- ASSERT ---
    assert_eq!(control, LoopControl::Continue);
    let report = ctx.last_report();
    assert_eq!(report.elapsed_ms, 37);
    assert_eq!(report.static_ticks, 3);
    assert_eq!(report.dynamic_ticks, 2);
    assert_eq!(ctx.static_pending_ms(), 7);
    assert_eq!(ctx.dynamic_pending_ms(), 5);

    // Every static tick also ticks the console and the video driver.
    assert_eq!(harness.journal.count("sim static"), 3);
    assert_eq!(harness.journal.count("console tick"), 3);
    assert_eq!(harness.journal.count("video tick"), 3);
    assert_eq!(harness.journal.count("sim dynamic"), 2);
    assert_eq!(harness.journal.count("audio render"), 1);
}

#[test]
fn test_iteration_phases_run_in_order() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 10);
    let mut ctx = context_with(&harness, &probe);
    harness.engine.events().publish(press(Key::Char('x')));

    harness.clock.advance(10);
    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(
        harness.journal.entries(),
        vec![
            "sim event KeyPressed { key: Char('x') }",
            "sim controllers",
            "sim static",
            "console tick",
            "video tick",
            "sim dynamic",
            "audio render",
            "video prepare",
            "sim render",
            "console render",
            "video finish",
        ]
    );
}

#[test]
fn test_residual_time_carries_across_iterations() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.clock.advance(7);
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(ctx.last_report().static_ticks, 0);

    harness.clock.advance(4);
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(ctx.last_report().static_ticks, 1);
    assert_eq!(ctx.static_pending_ms(), 1);
    assert_eq!(ctx.dynamic_pending_ms(), 11);
}

#[test]
fn test_dynamic_period_is_requeried_every_tick() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 10);
    let mut ctx = context_with(&harness, &probe);

    harness.clock.advance(40);
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(ctx.last_report().dynamic_ticks, 4);

    probe.period.set(25);
    harness.clock.advance(40);
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(ctx.last_report().dynamic_ticks, 1);
    assert_eq!(ctx.dynamic_pending_ms(), 15);
}

#[test]
fn test_visual_debugger_freezes_time_until_single_step() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    // --- ACT: enable the debugger; wall time must not accumulate ---
    harness.engine.events().publish(press(Key::F5));
    harness.clock.advance(37);
    harness.engine.run_one_iteration(&mut ctx);

    // --- ASSERT ---
    assert!(ctx.debug_flags().visual_debugger);
    assert_eq!(ctx.last_report().static_ticks, 0);
    assert_eq!(ctx.last_report().dynamic_ticks, 0);
    assert_eq!(harness.journal.count("audio render"), 0);
    assert_eq!(harness.journal.count("sim render"), 1, "rendering continues");

    // --- ACT: one step feeds exactly 20 ms ---
    harness.engine.events().publish(press(Key::Space));
    harness.clock.advance(500);
    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(ctx.last_report().static_ticks, 2);
    assert_eq!(ctx.last_report().dynamic_ticks, 1);
    assert_eq!(ctx.static_pending_ms(), 0);
    assert_eq!(ctx.dynamic_pending_ms(), 4);
    assert!(!ctx.debug_flags().single_step_requested);

    // --- ACT: the step is consumed ---
    harness.clock.advance(500);
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(ctx.last_report().static_ticks, 0);
}

#[test]
fn test_debugger_steps_feed_exactly_twenty_ms_each() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);
    ctx.set_visual_debugger(true);
    let steps = 7u64;
    let (mut static_ticks, mut dynamic_ticks) = (0u64, 0u64);

    // --- ACT: steps interleaved with idle debugger frames ---
    for _ in 0..steps {
        harness.clock.advance(333);
        harness.engine.run_one_iteration(&mut ctx);
        assert_eq!(ctx.last_report().static_ticks, 0);
        assert_eq!(ctx.last_report().dynamic_ticks, 0);

        ctx.request_single_step();
        harness.clock.advance(1_000);
        harness.engine.run_one_iteration(&mut ctx);
        static_ticks += u64::from(ctx.last_report().static_ticks);
        dynamic_ticks += u64::from(ctx.last_report().dynamic_ticks);
    }

    // --- ASSERT: 7 * 20 ms = 140 ms of simulated time ---
    let fed = steps * 20;
    assert_eq!(static_ticks, fed / 10);
    assert_eq!(dynamic_ticks, fed / 16);
    assert_eq!(ctx.static_pending_ms(), fed % 10);
    assert_eq!(ctx.dynamic_pending_ms(), fed % 16);
}

#[test]
fn test_long_runs_drain_without_period_drift() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let period = 16u64;
    let probe = SimProbe::new(&harness.journal, period as u32);
    let mut ctx = context_with(&harness, &probe);
    let (mut total, mut static_ticks, mut dynamic_ticks) = (0u64, 0u64, 0u64);
    let mut seed = 0x2545_f491_u64;

    for _ in 0..10_000 {
        // --- ACT: deterministic frame deltas in 0..73 ms ---
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let delta = (seed >> 33) % 73;
        total += delta;
        harness.clock.advance(delta);
        assert_eq!(harness.engine.run_one_iteration(&mut ctx), LoopControl::Continue);
        static_ticks += u64::from(ctx.last_report().static_ticks);
        dynamic_ticks += u64::from(ctx.last_report().dynamic_ticks);
        harness.journal.clear();

        // --- ASSERT: every pass leaves less than one period banked ---
        assert!(ctx.static_pending_ms() < 10);
        assert!(ctx.dynamic_pending_ms() < period);
    }

    // --- ASSERT: nothing gained or lost over the whole run ---
    assert_eq!(static_ticks, total / 10);
    assert_eq!(dynamic_ticks, total / period);
    assert_eq!(ctx.static_pending_ms(), total % 10);
    assert_eq!(ctx.dynamic_pending_ms(), total % period);
}

#[test]
fn test_caller_requested_step_only_applies_under_debugger() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);
    ctx.set_visual_debugger(true);
    ctx.request_single_step();

    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(ctx.last_report().static_ticks, 2);
}

#[test]
fn test_cursor_hides_once_after_a_second_without_motion() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.clock.advance(600);
    harness.engine.run_one_iteration(&mut ctx);
    assert!(!ctx.last_report().cursor_hidden);

    harness.clock.advance(600);
    harness.engine.run_one_iteration(&mut ctx);
    assert!(ctx.last_report().cursor_hidden);

    for _ in 0..3 {
        harness.clock.advance(600);
        harness.engine.run_one_iteration(&mut ctx);
        assert!(!ctx.last_report().cursor_hidden);
    }
    assert_eq!(harness.journal.count("cursor false"), 1);

    // Motion shows the cursor and re-arms the timer.
    harness
        .engine
        .events()
        .publish(EngineEvent::MouseMoved { x: 1.0, y: 2.0 });
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(harness.journal.count("cursor true"), 1);
    assert_eq!(ctx.mouse_visible_countdown_ms(), 1000);

    harness.clock.advance(1000);
    harness.engine.run_one_iteration(&mut ctx);
    assert!(ctx.last_report().cursor_hidden);
    assert_eq!(harness.journal.count("cursor false"), 2);
}

#[test]
fn test_console_and_simulation_never_share_an_event() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);
    let events = harness.engine.events();
    events.publish(press(Key::Tab));
    events.publish(press(Key::Char('a')));
    events.publish(press(Key::Escape));
    events.publish(press(Key::Char('b')));

    // --- ACT ---
    harness.engine.run_one_iteration(&mut ctx);

    // --- ASSERT ---
    let report = ctx.last_report();
    assert_eq!(report.events_dispatched, 4);
    assert_eq!(report.routed_to_console, 1);
    assert_eq!(report.routed_to_simulation, 1);
    assert_eq!(
        harness.journal.count("console event KeyPressed { key: Char('a') }"),
        1
    );
    assert_eq!(
        harness.journal.count("sim event KeyPressed { key: Char('b') }"),
        1
    );
    // Toggle keys reach nobody.
    assert_eq!(harness.journal.count_prefix("sim event KeyPressed { key: Tab"), 0);
    assert_eq!(harness.journal.count_prefix("sim event KeyPressed { key: Escape"), 0);
    assert!(!harness.console_open.get());
}

#[test]
fn test_backquote_toggles_console_both_ways() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.engine.events().publish(press(Key::Backquote));
    harness.engine.run_one_iteration(&mut ctx);
    assert!(harness.console_open.get());

    harness.engine.events().publish(press(Key::Backquote));
    harness.engine.run_one_iteration(&mut ctx);
    assert!(!harness.console_open.get());
    assert_eq!(harness.journal.count_prefix("sim event"), 0);
}

#[test]
fn test_quit_stops_the_loop_even_with_console_open() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);
    harness.console_open.set(true);

    harness.engine.events().publish(EngineEvent::Quit);
    assert_eq!(harness.engine.run_one_iteration(&mut ctx), LoopControl::Continue);
    assert_eq!(harness.journal.count("console event Quit"), 1);
    assert!(harness.engine.run_state().is_stopped());

    harness.journal.clear();
    assert_eq!(harness.engine.run_one_iteration(&mut ctx), LoopControl::Stop);
    assert!(harness.journal.entries().is_empty(), "nothing runs after stop");
}

#[test]
fn test_finished_simulation_stops_the_loop() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    probe.running.set(false);

    assert_eq!(harness.engine.run_one_iteration(&mut ctx), LoopControl::Stop);
    assert_eq!(ctx.iterations(), 0);
    assert!(harness.engine.run_state().is_stopped());
}

#[test]
fn test_external_stop_request_stops_the_loop() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.engine.run_state().request_stop();

    assert_eq!(harness.engine.run_one_iteration(&mut ctx), LoopControl::Stop);
}

#[test]
fn test_minimized_window_idles_instead_of_rendering() {
    // --- ARRANGE ---
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);
    harness
        .engine
        .events()
        .publish(EngineEvent::Window(WindowState::Minimized));

    // --- ACT ---
    let before = harness.clock.now_ms();
    harness.engine.run_one_iteration(&mut ctx);

    // --- ASSERT ---
    assert!(!ctx.screen_updates_enabled());
    assert!(ctx.last_report().idled);
    assert!(!ctx.last_report().rendered);
    assert_eq!(harness.clock.now_ms(), before + 1);
    assert_eq!(harness.journal.count("video prepare"), 0);

    harness
        .engine
        .events()
        .publish(EngineEvent::Window(WindowState::Shown));
    harness.engine.run_one_iteration(&mut ctx);
    assert!(ctx.last_report().rendered);
}

#[test]
fn test_restore_reinitializes_fullscreen_renderer() {
    let mut harness = Harness::started_with(Setup {
        fullscreen: true,
        ..Setup::default()
    });
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);
    ctx.set_screen_updates(false);

    harness
        .engine
        .events()
        .publish(EngineEvent::Window(WindowState::Restored));
    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(harness.journal.count("video reinit"), 1);
    assert!(ctx.screen_updates_enabled());
    assert!(ctx.last_report().rendered);
}

#[test]
fn test_debug_overlay_toggle_adds_debug_render() {
    let mut harness = Harness::started();
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.engine.events().publish(press(Key::F6));
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(harness.journal.count("sim debug render"), 1);

    harness.engine.events().publish(press(Key::F6));
    harness.engine.run_one_iteration(&mut ctx);
    assert_eq!(harness.journal.count("sim debug render"), 1);
}

#[test]
fn test_catch_up_cap_drops_backlog() {
    let mut setup = Setup::default();
    setup.settings.engine.max_catch_up_ticks = Some(5);
    let mut harness = Harness::started_with(setup);
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.clock.advance(1_003);
    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(ctx.last_report().static_ticks, 5);
    assert_eq!(ctx.static_pending_ms(), 3);
    assert_eq!(ctx.last_report().dynamic_ticks, 5);
    assert_eq!(ctx.dynamic_pending_ms(), 1_003 % 16);
}

#[test]
fn test_no_audio_render_when_audio_is_disabled() {
    let mut harness = Harness::started_with(Setup {
        sinks: Vec::new(),
        ..Setup::default()
    });
    let probe = SimProbe::new(&harness.journal, 16);
    let mut ctx = context_with(&harness, &probe);

    harness.clock.advance(20);
    harness.engine.run_one_iteration(&mut ctx);

    assert_eq!(harness.journal.count("audio render"), 0);
}
