//! Latency benchmarks for the prediction pipeline
//!
//! The serving contract expects predict to stay well under typical HTTP
//! handling overhead on CPU; these benches watch the full pipeline and
//! the ranker in isolation.
//!
//! Run with: cargo bench -p signserve-model

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

use candle_core::{DType, Device, Tensor};
use signserve_model::{
    rank, FeatureMap, FeatureSchema, LabelSet, MlpClassifier, ModelBundle, NormalizationParams,
};

const NUM_FEATURES: usize = 17;
const NUM_CLASSES: usize = 26;

/// Build a network with the trained model's layer sizes and random weights
fn synthetic_bundle() -> ModelBundle {
    let device = Device::Cpu;
    let dims = [NUM_FEATURES, 256, 128, 64, NUM_CLASSES];
    let weights: Vec<(Tensor, Tensor)> = dims
        .windows(2)
        .map(|pair| {
            let (input, output) = (pair[0], pair[1]);
            let weight = Tensor::randn(0f32, 0.1f32, (output, input), &device).unwrap();
            let bias = Tensor::zeros(output, DType::F32, &device).unwrap();
            (weight, bias)
        })
        .collect();
    let classifier = MlpClassifier::from_weights("bench", weights).unwrap();

    let schema =
        FeatureSchema::new((0..NUM_FEATURES).map(|i| format!("feature_{i}")).collect()).unwrap();
    let labels = LabelSet::new(
        (0..NUM_CLASSES)
            .map(|i| char::from(b'A' + i as u8).to_string())
            .collect(),
    )
    .unwrap();
    let scaler =
        NormalizationParams::new(vec![10.0; NUM_FEATURES], vec![2.5; NUM_FEATURES]).unwrap();

    ModelBundle::from_parts(schema, labels, scaler, Arc::new(classifier)).unwrap()
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let bundle = synthetic_bundle();

    let input: FeatureMap = (0..NUM_FEATURES)
        .map(|i| (format!("feature_{i}"), 42.0 + i as f32))
        .collect();

    let mut group = c.benchmark_group("predict");
    group.sample_size(100);

    group.bench_function("full_pipeline_top5", |b| {
        b.iter(|| {
            rt.block_on(async { bundle.predict(black_box(&input), 5).await.unwrap() })
        });
    });

    group.finish();
}

fn benchmark_ranker(c: &mut Criterion) {
    let labels = LabelSet::new(
        (0..NUM_CLASSES)
            .map(|i| char::from(b'A' + i as u8).to_string())
            .collect(),
    )
    .unwrap();
    let probabilities: Vec<f32> = (0..NUM_CLASSES)
        .map(|i| ((i * 7919) % 100) as f32 / 100.0)
        .collect();

    c.bench_function("rank_top5", |b| {
        b.iter(|| rank(black_box(&probabilities), &labels, 5));
    });
}

criterion_group!(benches, benchmark_full_pipeline, benchmark_ranker);
criterion_main!(benches);
