use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use efflux::assets::{load_sprites, BuiltinResources};
use efflux::config::{FaceConfig, MarkerVariant};
use efflux::core::{Canvas, ClockSample, RecordingCanvas};
use efflux::face::{FaceRenderer, RenderMode};
use efflux::math::Color;

fn renderer(variant: MarkerVariant, size: u32) -> FaceRenderer {
    let config = FaceConfig::default();
    let sprites = load_sprites(&BuiltinResources::new(&config), variant).unwrap();
    let mut renderer = FaceRenderer::new(sprites, &config);
    renderer.on_surface_changed(size, size);
    renderer
}

/// Full-face rasterization, the per-second cost in interactive mode
fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");
    group.sample_size(20);
    let sample = ClockSample::new(9, 41, 17, "UTC").unwrap();

    for variant in [MarkerVariant::Bitmap, MarkerVariant::Wedge] {
        for size in [320u32, 400, 454] {
            let renderer = renderer(variant, size);
            let id = BenchmarkId::new(format!("{:?}", variant), size);
            group.bench_with_input(id, &size, |b, &size| {
                b.iter(|| {
                    let mut canvas = Canvas::new(size, size);
                    canvas.clear(Color::BLACK);
                    renderer.draw(&mut canvas, black_box(&sample), RenderMode::interactive());
                    canvas
                })
            });
        }
    }
    group.finish();
}

/// Draw-call generation alone, without pixels
fn bench_record(c: &mut Criterion) {
    let renderer = renderer(MarkerVariant::Wedge, 400);
    let sample = ClockSample::new(9, 41, 17, "UTC").unwrap();

    c.bench_function("record_wedge_400", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new(400, 400);
            renderer.draw(&mut canvas, black_box(&sample), RenderMode::ambient());
            canvas.ops().len()
        })
    });
}

/// Rebuilding every scaled sprite on a surface change
fn bench_resize(c: &mut Criterion) {
    let mut renderer = renderer(MarkerVariant::Bitmap, 400);
    c.bench_function("resize_bitmap_400", |b| {
        b.iter(|| renderer.on_surface_changed(black_box(400), black_box(400)))
    });
}

criterion_group!(benches, bench_rasterize, bench_record, bench_resize);
criterion_main!(benches);
