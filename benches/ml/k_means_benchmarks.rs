use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kmeans::{Dataset, Example, KMeansConfig, KMeansModel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const FEATURES: usize = 8;

fn generate_blobs(n: usize, classes: i32, seed: u64) -> Dataset {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let examples = (0..n)
        .map(|i| {
            let label = i as i32 % classes;
            let features = (0..FEATURES)
                .map(|_| label as f64 * 10.0 + rng.gen_range(-1.0..1.0))
                .collect();
            Example::new(features, label)
        })
        .collect();
    Dataset::new(examples, FEATURES).unwrap()
}

fn bench_fit_and_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_means");
    let test = generate_blobs(1_000, 5, 2);

    for size in [1_000, 10_000] {
        let train = generate_blobs(size, 5, 1);
        group.bench_with_input(BenchmarkId::new("fit_evaluate", size), &train, |b, train| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                let model = KMeansModel::fit(train, &KMeansConfig::new(5), &mut rng).unwrap();
                black_box(model.evaluate(&test).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit_and_evaluate);
criterion_main!(benches);
