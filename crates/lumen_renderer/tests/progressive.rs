//! End-to-end checks of the progressive renderer over the built-in presets.

use lumen_renderer::{
    presets, AccumulationBuffer, MoveAxis, ProgressiveRenderer, RenderConfig, RenderError,
    RenderTarget, SchedulerConfig,
};

fn small_renderer(world: &str) -> ProgressiveRenderer<AccumulationBuffer> {
    let _ = env_logger::builder().is_test(true).try_init();
    ProgressiveRenderer::with_presets(
        AccumulationBuffer::new(12, 8).unwrap(),
        world,
        RenderConfig {
            samples_per_pass: 1,
            max_depth: 8,
        },
        SchedulerConfig {
            workers: 4,
            max_in_flight: 6,
        },
    )
    .unwrap()
}

fn sample_counts(renderer: &ProgressiveRenderer<AccumulationBuffer>) -> Vec<u32> {
    let target = renderer.target();
    let mut counts = Vec::new();
    for y in 0..target.height() {
        for x in 0..target.width() {
            counts.push(target.get_pixel(x, y).unwrap().sample_count);
        }
    }
    counts
}

#[test]
fn every_preset_renders_finite_colors() {
    for name in presets::names() {
        let mut renderer = small_renderer(name);
        renderer.render_pass();
        assert_eq!(renderer.world_name(), *name);
        assert!(renderer
            .target()
            .means()
            .iter()
            .all(|c| c.is_finite() && c.min_element() >= 0.0));
    }
}

#[test]
fn passes_accumulate_uniformly() {
    let mut renderer = small_renderer("spheres");
    for _ in 0..3 {
        renderer.render_pass();
    }
    assert!(sample_counts(&renderer).iter().all(|&n| n == 3));

    renderer.set_samples_per_pass(2);
    renderer.render_pass();
    assert!(sample_counts(&renderer).iter().all(|&n| n == 5));
}

#[test]
fn pumping_eventually_reaches_every_row() {
    let mut renderer = small_renderer("checker");
    let mut dispatched = 0;
    while dispatched < 8 {
        dispatched += renderer.pump();
    }
    renderer.drain();

    // Rows are handed out in order, so the first full cycle touched all of them
    assert!(sample_counts(&renderer).iter().all(|&n| n >= 1));
}

#[test]
fn switching_worlds_restarts_accumulation() {
    let mut renderer = small_renderer("spheres");
    renderer.render_pass();
    renderer.render_pass();

    renderer.set_world("cornell").unwrap();
    assert!(sample_counts(&renderer).iter().all(|&n| n == 0));
    renderer.render_pass();
    assert!(sample_counts(&renderer).iter().all(|&n| n == 1));

    let err = renderer.set_world("mandelbrot").unwrap_err();
    assert!(matches!(err, RenderError::UnknownWorld(ref name) if name == "mandelbrot"));
    assert_eq!(renderer.world_name(), "cornell");
}

#[test]
fn cameras_are_kept_per_world() {
    let mut renderer = small_renderer("spheres");
    let start = renderer.camera().position();
    renderer.update_camera(|camera| camera.move_along(2.0, MoveAxis::UpDown));
    let moved = renderer.camera().position();
    assert!((moved - start).length() > 1.9);

    renderer.set_world("checker").unwrap();
    renderer.set_world("spheres").unwrap();
    assert_eq!(renderer.camera().position(), moved);
}

#[test]
fn resize_reaspects_every_world() {
    let mut renderer = small_renderer("simple_light");
    renderer.render_pass();
    renderer.resize(20, 5).unwrap();

    for name in presets::names() {
        renderer.set_world(name).unwrap();
        assert_eq!(renderer.camera().resolution(), (20, 5));
        assert!((renderer.camera().aspect() - 4.0).abs() < 1e-12);
    }

    renderer.render_pass();
    assert!(sample_counts(&renderer).iter().all(|&n| n >= 1));
}

#[test]
fn save_writes_png() {
    let mut renderer = small_renderer("spheres");
    renderer.render_pass();

    let path = std::env::temp_dir().join(format!("lumen-save-{}.png", std::process::id()));
    renderer.save(&path).unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (12, 8));
    assert_eq!(saved.as_raw(), &renderer.target().to_rgba());
    std::fs::remove_file(&path).unwrap();
}
