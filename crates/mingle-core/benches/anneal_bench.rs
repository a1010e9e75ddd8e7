use criterion::{criterion_group, criterion_main, Criterion};
use mingle_core::{Schedule, Sex};
use std::hint::black_box;

fn bench_moves(c: &mut Criterion) {
    c.bench_function("contact_delta", |b| {
        let schedule = Schedule::new(6, 6, 6, 6, Some(42)).unwrap();
        b.iter(|| {
            black_box(schedule.contact_delta(
                black_box(1),
                Sex::Male,
                black_box(0),
                black_box(0),
                black_box(3),
                black_box(2),
            ))
        });
    });

    c.bench_function("sa_step", |b| {
        let mut schedule = Schedule::new(6, 6, 6, 6, Some(42)).unwrap();
        b.iter(|| {
            schedule.sa_step(black_box(10.0));
            black_box(schedule.score())
        });
    });

    c.bench_function("hillclimb_step", |b| {
        let mut schedule = Schedule::new(6, 6, 6, 6, Some(42)).unwrap();
        b.iter(|| {
            schedule.hillclimb_step();
            black_box(schedule.score())
        });
    });
}

criterion_group!(benches, bench_moves);
criterion_main!(benches);
