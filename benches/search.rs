use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dh_mitm::math::mod_pow;
use dh_mitm::{DiscreteLogCracker, PrimalityMode, PrimeGenerator, PrimitiveRootFinder};

fn bench_prime_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("prime_candidates");
    group.sample_size(10);
    for mode in [PrimalityMode::Exact, PrimalityMode::Fast] {
        let gen = PrimeGenerator::new(mode);
        group.bench_function(format!("{:?}", mode), |b| {
            b.iter(|| gen.candidates(black_box(10_000..100_000)))
        });
    }
    group.finish();
}

fn bench_root_window(c: &mut Criterion) {
    let finder = PrimitiveRootFinder::default();
    c.bench_function("root_window_99991", |b| {
        b.iter(|| finder.search_window(black_box(99_991), black_box(5_000)))
    });
}

fn bench_discrete_log(c: &mut Criterion) {
    let cracker = DiscreteLogCracker;
    let observed = mod_pow(6, 87_654, 99_991);
    c.bench_function("discrete_log_99991", |b| {
        b.iter(|| cracker.recover_private_exponent(black_box(99_991), 6, black_box(observed)))
    });
}

criterion_group!(benches, bench_prime_candidates, bench_root_window, bench_discrete_log);
criterion_main!(benches);
