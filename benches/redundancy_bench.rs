use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use seqprune::core::compare::identity;
use seqprune::{Dataset, RedundancyRemover, SequenceRecord};
use std::hint::black_box;

fn generate_dataset(count: usize, length: usize, similarity: f64) -> Dataset {
    let residues = b"ACDEFGHIKLMNPQRSTVY";

    let reference: Vec<u8> = (0..length).map(|i| residues[(i * 7) % residues.len()]).collect();

    let records = (0..count)
        .map(|i| {
            let mut seq = reference.clone();

            // Pseudo-random substitutions scaled by the target similarity
            let num_mutations = ((1.0 - similarity) * length as f64) as usize;
            for m in 0..num_mutations {
                let pos = (i * 7 + m * 13) % length;
                seq[pos] = b'W';
            }

            SequenceRecord::new(format!("seq_{}", i), String::from_utf8_lossy(&seq).into_owned())
                .with_metric("partial", (i % 4) as f64)
        })
        .collect();

    Dataset::new(records).with_metric_names(["partial"])
}

fn bench_identity(c: &mut Criterion) {
    let dataset = generate_dataset(2, 1000, 0.9);
    let a = dataset.records[0].sequence.as_bytes();
    let b = dataset.records[1].sequence.as_bytes();

    c.bench_function("redundancy/identity_1000", |bench| {
        bench.iter(|| black_box(identity(black_box(a), black_box(b))));
    });
}

fn bench_remove_redundancy(c: &mut Criterion) {
    let mut group = c.benchmark_group("redundancy/remove");
    group.sample_size(10);

    for num_seqs in [100, 500, 1000].iter() {
        let dataset = generate_dataset(*num_seqs, 300, 0.9);

        for threads in [1i64, 4] {
            let remover = RedundancyRemover::new(0.95)
                .with_num_threads(threads)
                .with_silent(true);

            group.bench_with_input(
                BenchmarkId::new(format!("threads_{}", threads), num_seqs),
                num_seqs,
                |b, _| {
                    b.iter(|| black_box(remover.run(black_box(&dataset)).unwrap()));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_identity, bench_remove_redundancy);
criterion_main!(benches);
