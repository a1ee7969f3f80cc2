use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marquee::animation::{EasingFunction, Glide};
use marquee::scene::{drift, Scene};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuadraticOut;
    c.bench_function("quadratic_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn glide_benchmark(c: &mut Criterion) {
    c.bench_function("glide_retarget_and_advance", |b| {
        let mut glide = Glide::at(0.0);
        let mut target = 1.0f32;
        b.iter(|| {
            glide.retarget(black_box(target));
            glide.advance(1.0 / 60.0);
            target = -target;
            black_box(glide.value())
        })
    });
}

fn drift_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_drift");

    for count in [70usize, 280, 1120] {
        let mut scene = Scene::new();
        scene.build(false, count, &mut rand::rng());
        let mut pairs = scene.pairs().to_vec();

        let _ = group.bench_function(format!("{count}_pairs"), |b| {
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                drift::apply(black_box(&mut pairs), black_box(t));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, easing_benchmark, glide_benchmark, drift_benchmark);
criterion_main!(benches);
