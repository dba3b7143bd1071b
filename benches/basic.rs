use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use keyed_compose::{App, AppConfig, KeyPolicy, ToDoRecord};

fn records(count: usize) -> Vec<ToDoRecord> {
    (0..count)
        .map(|i| ToDoRecord::new(format!("todo{}", i), format!("{:02}:{:02}", i / 60 % 24, i % 60)))
        .collect()
}

fn run_app(count: usize, key_policy: KeyPolicy) {
    let mut app = App::with_records(AppConfig::keyed_by(key_policy), records(count)).unwrap();
    app.type_into(0, "hello").unwrap();
    app.reverse();
    app.reverse();
}

fn criterion_benchmark(c: &mut Criterion) {
    for count in [100, 1000, 5000] {
        for key_policy in [KeyPolicy::Index, KeyPolicy::Id] {
            c.bench_function(&format!("reverse {} {}", key_policy, count), |b| {
                b.iter(|| run_app(black_box(count), key_policy))
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
