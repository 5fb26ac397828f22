use bitdist::distance::{indel, lcs_seq, CachedIndel, CachedLcsSeq};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect()
}

fn bench_lcs_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs_similarity");
    let mut rng = StdRng::seed_from_u64(42);

    for &len in &[16, 64, 256, 1024] {
        let s1 = random_bytes(&mut rng, len);
        let s2 = random_bytes(&mut rng, len);

        group.bench_with_input(BenchmarkId::new("free", len), &len, |b, _| {
            b.iter(|| lcs_seq::similarity(black_box(&s1), black_box(&s2), None))
        });

        let cached = CachedLcsSeq::new(&s1);
        group.bench_with_input(BenchmarkId::new("cached", len), &len, |b, _| {
            b.iter(|| cached.similarity(black_box(&s2), None))
        });
    }

    group.finish();
}

fn bench_indel_normalized(c: &mut Criterion) {
    let mut group = c.benchmark_group("indel_normalized_similarity");
    let mut rng = StdRng::seed_from_u64(5);
    let s1 = random_bytes(&mut rng, 512);
    let s2 = random_bytes(&mut rng, 480);
    let cached = CachedIndel::new(&s1);

    for &cutoff in &[0.0, 0.5, 0.9] {
        group.bench_with_input(BenchmarkId::from_parameter(cutoff), &cutoff, |b, &cutoff| {
            b.iter(|| cached.normalized_similarity(black_box(&s2), cutoff))
        });
    }

    group.finish();
}

fn bench_indel_editops(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(9);
    let s1 = random_bytes(&mut rng, 300);
    let s2 = random_bytes(&mut rng, 300);

    c.bench_function("indel_editops_300", |b| {
        b.iter(|| indel::editops(black_box(&s1), black_box(&s2)))
    });
}

criterion_group!(benches, bench_lcs_lengths, bench_indel_normalized, bench_indel_editops);
criterion_main!(benches);
