// Matching engine benchmarks: raw distance and full registry scans
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use facematch_core::{matcher, Embedding, InMemoryRegistry, PersonRecord, Registry};
use rand::Rng;

fn random_embedding(rng: &mut impl Rng, dim: usize) -> Embedding {
    Embedding::new((0..dim).map(|_| rng.random_range(-1.0f32..1.0)).collect())
}

fn benchmark_distance(c: &mut Criterion) {
    let mut rng = rand::rng();
    let a = random_embedding(&mut rng, 128);
    let b = random_embedding(&mut rng, 128);

    c.bench_function("euclidean_distance_128", |bench| {
        bench.iter(|| matcher::distance(black_box(&a), black_box(&b)));
    });
}

fn benchmark_identify(c: &mut Criterion) {
    let mut group = c.benchmark_group("identify_full_scan");

    for size in [100, 1_000, 10_000] {
        let mut rng = rand::rng();
        let registry = InMemoryRegistry::new(128);
        for i in 0..size {
            registry
                .register(
                    &format!("person-{i}"),
                    &format!("{i:08}"),
                    random_embedding(&mut rng, 128),
                )
                .unwrap();
        }
        let records: Vec<PersonRecord> = registry.list_all().unwrap();

        // A probe far from everything forces a scan of the whole registry.
        let probe = Embedding::new(vec![100.0; 128]);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| matcher::identify(black_box(&probe), &records, 0.6));
        });
    }

    group.finish();
}

fn benchmark_register(c: &mut Criterion) {
    c.bench_function("register_in_memory", |bench| {
        let mut rng = rand::rng();
        let registry = InMemoryRegistry::new(128);
        let mut i = 0u64;

        bench.iter(|| {
            let embedding = random_embedding(&mut rng, 128);
            i += 1;
            registry
                .register("bench", &i.to_string(), black_box(embedding))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    benchmark_distance,
    benchmark_identify,
    benchmark_register
);
criterion_main!(benches);
