use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use tripgen_shared::{generate_plan, render_plan, Budget, Pace, Style, TripRequest};

fn request(days: u32) -> TripRequest {
    TripRequest {
        city: "Barcelona".to_string(),
        days,
        budget: Budget::Medium,
        style: Style::Balanced,
        diet: Some("vegetarian".to_string()),
        pace: Pace::Packed,
    }
}

fn benchmark_plan_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_generation");

    // Short weekend up to the 30-day cap
    for days in [2u32, 7, 30] {
        let req = request(days);
        group.bench_with_input(BenchmarkId::from_parameter(days), &req, |b, req| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| generate_plan(black_box(req), &mut rng));
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let req = request(14);
    let mut rng = StdRng::seed_from_u64(1);
    let days = generate_plan(&req, &mut rng);

    c.bench_function("render_plan_14_days", |b| {
        b.iter(|| render_plan(black_box(&days), black_box(&req)));
    });
}

criterion_group!(benches, benchmark_plan_generation, benchmark_render);
criterion_main!(benches);
