use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use patterna::distance::{AbsoluteDistance, TreeEditDistance};
use patterna::{ClusterCollector, Collector, GroupCollector, NeighborJoin};
use patterna_test::generate_rows;
use std::hint::black_box;

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for count in &[50, 200, 500] {
        let rows = generate_rows(*count, 11);
        group.throughput(Throughput::Elements((count * count) as u64));

        let sequential = ClusterCollector::new(Box::new(TreeEditDistance::default()), 0.2, 4).unwrap();
        group.bench_with_input(BenchmarkId::new("tree_edit", count), &rows, |b, rows| {
            b.iter(|| sequential.distance_matrix(black_box(rows)));
        });

        let parallel = ClusterCollector::new(Box::new(TreeEditDistance::default()), 0.2, 4)
            .unwrap()
            .with_parallel(1);
        group.bench_with_input(
            BenchmarkId::new("tree_edit_parallel", count),
            &rows,
            |b, rows| {
                b.iter(|| parallel.distance_matrix(black_box(rows)));
            },
        );

        let absolute = ClusterCollector::new(Box::new(AbsoluteDistance), 0.0, 2).unwrap();
        group.bench_with_input(BenchmarkId::new("absolute", count), &rows, |b, rows| {
            b.iter(|| absolute.distance_matrix(black_box(rows)));
        });
    }

    group.finish();
}

fn bench_collectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("collectors");
    group.sample_size(10);

    for count in &[20, 80] {
        let rows = generate_rows(*count, 5);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("group", count), &rows, |b, rows| {
            b.iter(|| GroupCollector.collect(black_box(rows)));
        });

        let cluster = ClusterCollector::new(Box::new(TreeEditDistance::default()), 0.2, 4).unwrap();
        group.bench_with_input(BenchmarkId::new("cluster", count), &rows, |b, rows| {
            b.iter(|| cluster.collect(black_box(rows)));
        });

        group.bench_with_input(BenchmarkId::new("neighbor_join", count), &rows, |b, rows| {
            b.iter(|| NeighborJoin::new().collect(black_box(rows)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distance_matrix, bench_collectors);
criterion_main!(benches);
