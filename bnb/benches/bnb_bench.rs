use bnb::BnbOptimizer;
use bnb::config::BnbConfig;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mkp_rs::entities::{Catalog, MKProblem};
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

criterion_main!(benches);
criterion_group!(benches, sequential_bench, parallel_bench);

const N_ITEMS: [usize; 3] = [12, 16, 20];
const N_BINS: usize = 3;

fn create_catalog(n_items: usize, seed: u64) -> Catalog {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut catalog = Catalog::new(None);
    for i in 0..n_items {
        catalog
            .add_item(
                format!("item_{i}"),
                rng.random_range(1.0..15.0),
                rng.random_range(0.0..20.0),
                rng.random_range(3.0..5.0),
            )
            .expect("generated item is valid");
    }
    catalog
}

/// Time to prove optimality with a single thread, for catalogs of increasing size.
fn sequential_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_sequential");
    group.sample_size(10);
    for n_items in N_ITEMS {
        let catalog = create_catalog(n_items, 0);
        let problem = MKProblem::new(&catalog, N_BINS, 20.0, 25.0).expect("valid problem");
        group.bench_function(BenchmarkId::from_parameter(n_items), |b| {
            b.iter(|| BnbOptimizer::new(problem, BnbConfig::default()).solve())
        });
    }
    group.finish();
}

/// Same catalogs, explored by 4 threads.
fn parallel_bench(c: &mut Criterion) {
    let config = BnbConfig {
        n_threads: 4,
        split_depth: 4,
        ..BnbConfig::default()
    };
    let mut group = c.benchmark_group("bnb_parallel_4");
    group.sample_size(10);
    for n_items in N_ITEMS {
        let catalog = create_catalog(n_items, 0);
        let problem = MKProblem::new(&catalog, N_BINS, 20.0, 25.0).expect("valid problem");
        group.bench_function(BenchmarkId::from_parameter(n_items), |b| {
            b.iter(|| BnbOptimizer::new(problem, config).solve())
        });
    }
    group.finish();
}
