//! End-to-end checks that both engines rasterize real frames through the CPU
//! backend and honor their lifecycle contracts.

use glimmer::{CursorTrail, FieldOpts, ParticleField, TrailOpts, TrailPhase, Viewport};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Capture engine tracing output (surface-loss warnings and reseed events)
/// in the test harness. Idempotent across tests in one binary.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn particle_field_draws_visible_pixels() {
    init_tracing();
    let vp = Viewport::new(400.0, 300.0, 1.0).unwrap();
    let mut field = ParticleField::with_seed(vp, FieldOpts::default(), 7);
    assert_eq!(field.particles().len(), 4); // floor(120000 / 25000)

    for i in 0..3 {
        field.on_frame(ms(16 * i));
    }

    let surface = field.surface().expect("field is mounted");
    assert!(surface.pixels().iter().any(|&b| b != 0));
}

#[test]
fn resize_coalesces_and_reseeds_from_the_new_area() {
    init_tracing();
    let vp = Viewport::new(1000.0, 800.0, 1.0).unwrap();
    let mut field = ParticleField::with_seed(vp, FieldOpts::default(), 9);
    assert_eq!(field.particles().len(), 32);

    let smaller = Viewport::new(500.0, 500.0, 1.0).unwrap();
    field.on_resize(Viewport::new(900.0, 700.0, 1.0).unwrap(), ms(0));
    field.on_resize(smaller, ms(50));

    // Still inside the quiet period: old population survives.
    field.on_frame(ms(100));
    assert_eq!(field.particles().len(), 32);

    // Quiet period elapsed: one reseed, from the latest viewport only.
    field.on_frame(ms(250));
    assert_eq!(field.particles().len(), 10);
    let surface = field.surface().expect("field is mounted");
    assert_eq!(surface.physical_size(), (500, 500));
}

#[test]
fn field_dispose_stops_the_loop() {
    init_tracing();
    let vp = Viewport::new(400.0, 300.0, 1.0).unwrap();
    let mut field = ParticleField::with_seed(vp, FieldOpts::default(), 3);
    field.dispose();
    assert!(field.is_inert());
    field.on_frame(ms(16));
    assert!(field.particles().is_empty());
}

#[test]
fn cursor_trail_strokes_a_spline_once_sampled() {
    init_tracing();
    let vp = Viewport::new(320.0, 240.0, 2.0).unwrap();
    let mut trail = CursorTrail::new(vp, TrailOpts::default());
    assert_eq!(trail.phase(), TrailPhase::Idle);

    for i in 0..8 {
        trail.on_pointer_move(40.0 + 20.0 * i as f64, 40.0 + 20.0 * i as f64);
    }
    assert_eq!(trail.phase(), TrailPhase::Rendering);

    trail.on_frame(ms(0));
    trail.on_frame(ms(16));

    let surface = trail.surface().expect("trail is mounted");
    assert_eq!(surface.physical_size(), (640, 480));
    assert!(surface.pixels().iter().any(|&b| b != 0));
}

#[test]
fn trail_decays_to_idle_without_input() {
    init_tracing();
    let vp = Viewport::new(320.0, 240.0, 1.0).unwrap();
    let mut trail = CursorTrail::new(vp, TrailOpts::default());
    for i in 0..6 {
        trail.on_pointer_move(40.0 + 20.0 * i as f64, 60.0);
    }

    trail.on_frame(ms(0));
    let mut t = 0;
    while trail.phase() != TrailPhase::Idle {
        t += 16;
        trail.on_frame(ms(t));
        assert!(t < 2_000, "trail never drained");
    }
    assert!(trail.buffer().is_empty());
}

#[test]
fn engines_run_independently() {
    init_tracing();
    let vp = Viewport::new(400.0, 300.0, 1.0).unwrap();
    let mut field = ParticleField::with_seed(vp, FieldOpts::default(), 5);
    let mut trail = CursorTrail::new(vp, TrailOpts::default());

    trail.dispose();
    // The field keeps running after the trail is torn down.
    for i in 0..3 {
        field.on_frame(ms(16 * i));
        trail.on_frame(ms(16 * i));
    }
    assert!(!field.is_inert());
    assert!(field.surface().unwrap().pixels().iter().any(|&b| b != 0));
}
