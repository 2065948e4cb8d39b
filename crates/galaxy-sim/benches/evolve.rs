use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};

use galaxy_gen::{GalaxyGenParams, generate_with};
use galaxy_sim::{GalaxyScene, GravitySettings, SimState};

fn scene_with(count: u32) -> GalaxyScene {
    let params = GalaxyGenParams::default().with_particle_count(count);
    GalaxyScene::new(generate_with("bench-galaxy", &params))
}

fn bench_frame_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_advance");
    for (label, gravity) in [
        ("no_gravity", GravitySettings::default()),
        (
            "gravity",
            GravitySettings {
                enabled: true,
                ..GravitySettings::default()
            },
        ),
    ] {
        let scene = scene_with(20_000);
        let mut sim = SimState::new(gravity);
        group.bench_function(format!("20k_{label}"), |b| {
            b.iter(|| {
                sim.advance(&scene, 1.0 / 60.0);
                black_box(sim.positions().len());
            })
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.bench_function("default_seed", |b| {
        b.iter(|| black_box(galaxy_gen::generate(black_box("galaxy-42"))))
    });
    group.finish();
}

fn long_config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(30)
}

criterion_group! {
    name = benches;
    config = long_config();
    targets =
        bench_frame_advance,
        bench_generate
}
criterion_main!(benches);
