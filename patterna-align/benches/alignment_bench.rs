use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use patterna_align::alignment::{
    merge_profiles, pad_rows, Aligner, PairwiseAligner, Profile, ProfileCosts, ProgressiveAligner,
};
use patterna_align::clustering::{GroupId, GroupMap};
use patterna_core::{Sequence, Token, TokenType};
use std::hint::black_box;

const CYCLE: [TokenType; 4] = [
    TokenType::Digit,
    TokenType::Space,
    TokenType::Alpha,
    TokenType::Punctuation,
];

fn create_row(index: usize, length: usize) -> Sequence {
    let tokens = (0..length)
        .map(|i| Token::new(CYCLE[i % CYCLE.len()], "x", index))
        .collect();
    Sequence::new(index, tokens)
}

fn create_row_with_mutations(index: usize, base: &Sequence, mutation_rate: f64) -> Sequence {
    let tokens = base
        .iter()
        .filter(|_| rand::random::<f64>() >= mutation_rate / 2.0)
        .map(|t| {
            if rand::random::<f64>() < mutation_rate {
                // Swap to a type from another family
                let token_type = match t.token_type {
                    TokenType::Digit => TokenType::Alpha,
                    TokenType::Alpha => TokenType::Space,
                    TokenType::Space => TokenType::Punctuation,
                    _ => TokenType::Digit,
                };
                Token::new(token_type, "y", index)
            } else {
                Token::new(t.token_type, t.text.clone(), index)
            }
        })
        .collect();
    Sequence::new(index, tokens)
}

fn create_rows(count: usize, length: usize) -> Vec<Sequence> {
    let base = create_row(0, length);
    (0..count)
        .map(|i| create_row_with_mutations(i, &base, 0.1))
        .collect()
}

fn bench_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_alignment");

    for length in &[10, 50, 100, 500] {
        let x = create_row(0, *length);
        let y = create_row_with_mutations(1, &x, 0.1);

        group.throughput(Throughput::Elements(*length as u64));

        group.bench_with_input(
            BenchmarkId::new("needleman_wunsch", length),
            &(x.clone(), y.clone()),
            |b, (x, y)| {
                let aligner = PairwiseAligner::new(false);
                b.iter(|| aligner.align_pair(black_box(x), black_box(y)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("keep_gaps_together", length),
            &(x, y),
            |b, (x, y)| {
                let aligner = PairwiseAligner::new(true);
                b.iter(|| aligner.align_pair(black_box(x), black_box(y)));
            },
        );
    }

    group.finish();
}

fn bench_profile_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile_merge");
    let costs = ProfileCosts::default();

    for depth in &[2, 8, 32] {
        let rows = create_rows(depth * 2, 40);
        let aligner = ProgressiveAligner::new().with_guide_tree(false);
        let first: Profile = aligner
            .align_column(rows[..*depth].iter().cloned().map(Profile::from).collect())
            .unwrap()
            .into();
        let second: Profile = aligner
            .align_column(rows[*depth..].iter().cloned().map(Profile::from).collect())
            .unwrap()
            .into();

        group.throughput(Throughput::Elements((depth * 2) as u64));

        group.bench_with_input(
            BenchmarkId::new("merge", depth),
            &(first, second),
            |b, (first, second)| {
                b.iter(|| merge_profiles(black_box(first), black_box(second), &costs, 1));
            },
        );
    }

    group.finish();
}

fn bench_progressive(c: &mut Criterion) {
    let mut group = c.benchmark_group("progressive_alignment");
    group.sample_size(20);

    for count in &[4, 16, 64] {
        let rows = create_rows(*count, 20);
        let groups: GroupMap = (0..rows.len()).map(|i| (GroupId::Id(0), i)).collect();

        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("guide_tree", count), &rows, |b, rows| {
            let aligner = ProgressiveAligner::new();
            b.iter(|| aligner.align(black_box(rows), &groups));
        });

        group.bench_with_input(BenchmarkId::new("left_fold", count), &rows, |b, rows| {
            let aligner = ProgressiveAligner::new().with_guide_tree(false);
            b.iter(|| aligner.align(black_box(rows), &groups));
        });
    }

    group.finish();
}

fn bench_padding(c: &mut Criterion) {
    let rows = create_rows(256, 12);

    c.bench_function("pad_rows", |b| {
        b.iter(|| pad_rows(black_box(rows.clone())));
    });
}

criterion_group!(
    benches,
    bench_pairwise,
    bench_profile_merge,
    bench_progressive,
    bench_padding
);
criterion_main!(benches);
