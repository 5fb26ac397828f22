use bitdist::distance::multi::MultiLevenshtein;
use bitdist::distance::{levenshtein, CachedLevenshtein};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect()
}

/// Copy of `s` with `edits` random substitutions.
fn with_edits(rng: &mut StdRng, s: &[u8], edits: usize) -> Vec<u8> {
    let mut res = s.to_vec();
    for _ in 0..edits {
        let pos = rng.gen_range(0..res.len());
        res[pos] = rng.gen_range(b'a'..=b'z');
    }
    res
}

fn bench_levenshtein_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein_distance");
    let mut rng = StdRng::seed_from_u64(42);

    for &len in &[16, 64, 256, 1024] {
        let s1 = random_bytes(&mut rng, len);
        let s2 = random_bytes(&mut rng, len);

        group.bench_with_input(BenchmarkId::new("free", len), &len, |b, _| {
            b.iter(|| levenshtein::distance(black_box(&s1), black_box(&s2), None, None))
        });

        let cached = CachedLevenshtein::new(&s1, None);
        group.bench_with_input(BenchmarkId::new("cached", len), &len, |b, _| {
            b.iter(|| cached.distance(black_box(&s2), None))
        });
    }

    group.finish();
}

fn bench_levenshtein_cutoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein_cutoff");
    let mut rng = StdRng::seed_from_u64(7);
    let s1 = random_bytes(&mut rng, 2048);
    let s2 = with_edits(&mut rng, &s1, 20);

    for &cutoff in &[2, 32, 256, 2048] {
        group.bench_with_input(BenchmarkId::from_parameter(cutoff), &cutoff, |b, &cutoff| {
            b.iter(|| levenshtein::distance(black_box(&s1), black_box(&s2), None, cutoff))
        });
    }

    group.finish();
}

fn bench_levenshtein_editops(c: &mut Criterion) {
    let mut group = c.benchmark_group("levenshtein_editops");
    let mut rng = StdRng::seed_from_u64(11);

    for &len in &[64, 512] {
        let s1 = random_bytes(&mut rng, len);
        let s2 = with_edits(&mut rng, &s1, len / 8);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| levenshtein::editops(black_box(&s1), black_box(&s2)))
        });
    }

    group.finish();
}

fn bench_multi_levenshtein(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let mut scorer = MultiLevenshtein::new(256, None).unwrap();
    for _ in 0..256 {
        let len = rng.gen_range(4..=64);
        scorer.insert(&random_bytes(&mut rng, len)).unwrap();
    }
    let query = random_bytes(&mut rng, 32);

    c.bench_function("multi_levenshtein_256", |b| {
        b.iter(|| scorer.distance_all(black_box(&query), None))
    });
}

criterion_group!(
    benches,
    bench_levenshtein_lengths,
    bench_levenshtein_cutoff,
    bench_levenshtein_editops,
    bench_multi_levenshtein
);
criterion_main!(benches);
