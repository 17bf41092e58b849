//! Benchmarks for the rating engine and the full pipeline.
//!
//! Measures:
//! - Rating generation for growing candidate pools
//! - End-to-end generation of the reference scenario

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lafs_core::{
    DataGenerator, ItemProfileGenerator, LatentFactorGenerator, NormalParams, ParameterSet,
    RatingEngine, UserProfileGenerator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scenario(pool: usize) -> ParameterSet {
    ParameterSet::new(1000, 10, 200)
        .with_agents(
            3,
            vec![
                NormalParams::new(0.5, 0.1),
                NormalParams::new(0.0, 0.0),
                NormalParams::new(0.0, 0.0),
            ],
        )
        .with_list_sizes(pool, 50)
}

fn bench_rating_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("rating_engine");

    for pool in [50, 200, 1000] {
        let params = scenario(pool);
        let mut rng = StdRng::seed_from_u64(42);
        let users = UserProfileGenerator::new(&params)
            .generate(&mut rng)
            .expect("users");
        let items = ItemProfileGenerator::new(&params)
            .generate(&mut rng)
            .expect("items");
        let factors = LatentFactorGenerator::new(&params);
        let user_factors = factors.generate(&users, &mut rng).expect("user factors");
        let item_factors = factors.generate(&items, &mut rng).expect("item factors");
        let engine = RatingEngine::new(&params, &items, &user_factors, &item_factors);

        group.throughput(Throughput::Elements((pool * users.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pool), &pool, |b, _| {
            b.iter(|| black_box(engine.generate(&mut rng).expect("ratings")));
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let params = scenario(200);
    c.bench_function("pipeline_reference_scenario", |b| {
        b.iter(|| {
            black_box(
                DataGenerator::from_seed(7)
                    .generate(&params)
                    .expect("dataset"),
            )
        });
    });
}

criterion_group!(benches, bench_rating_engine, bench_full_pipeline);
criterion_main!(benches);
