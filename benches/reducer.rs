// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use gesture_lens::gestures::{eye_detected, reduce, single_hand_detected, GestureAction};
use gesture_lens::regression::{self, TrainOptions};
use gesture_lens::store::Store;
use std::hint::black_box;

fn dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    group.bench_function("dispatch_1000_actions", |b| {
        b.iter(|| {
            let mut store = Store::new(reduce);
            for i in 0..1000u32 {
                let action = match i % 3 {
                    0 => single_hand_detected(),
                    1 => eye_detected(),
                    _ => GestureAction::Unrecognized,
                };
                black_box(store.dispatch(action));
            }
            black_box(store.state().label.len())
        });
    });

    group.bench_function("replay_1000_actions", |b| {
        let mut store = Store::new(reduce);
        for i in 0..1000u32 {
            let action = if i % 2 == 0 {
                single_hand_detected()
            } else {
                eye_detected()
            };
            store.dispatch(action);
        }

        b.iter(|| black_box(store.replay()));
    });

    group.finish();
}

fn training_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression");

    let xs: Vec<f64> = (0..200).map(|i| 50.0 + i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 46.0 - 0.15 * x).collect();

    group.bench_function("train_200_samples_200_epochs", |b| {
        b.iter(|| {
            let model = regression::train(&xs, &ys, TrainOptions::default()).unwrap();
            black_box(model.predict(120.0))
        });
    });

    group.finish();
}

criterion_group!(benches, dispatch_benchmark, training_benchmark);
criterion_main!(benches);
