#![allow(dead_code)]

use seqprune::{Dataset, SequenceRecord};

const RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVY";

pub const SPECIES: [&str; 5] = [
    "Homo sapiens",
    "Mus musculus",
    "Gallus gallus",
    "Danio rerio",
    "Xenopus laevis",
];

/// 80 residues, never containing `W`, so substituting `W` always mismatches.
pub fn base_sequence() -> Vec<u8> {
    (0..80).map(|i| RESIDUES[(i * 7) % RESIDUES.len()]).collect()
}

pub fn mutate(seq: &[u8], positions: &[usize]) -> String {
    let mut out = seq.to_vec();
    for &p in positions {
        out[p] = b'W';
    }
    String::from_utf8(out).unwrap()
}

/// Five orthologs whose pairwise identities fall between 0.925 and 0.975.
pub fn five_orthologs() -> Dataset {
    let base = base_sequence();
    let mutations: [&[usize]; 5] = [&[], &[0, 1], &[10, 11, 12], &[20, 21], &[30, 31, 32]];

    let records = mutations
        .iter()
        .zip(SPECIES)
        .enumerate()
        .map(|(i, (positions, species))| {
            SequenceRecord::new(format!("seq{}", i), mutate(&base, positions)).with_species(species)
        })
        .collect();

    Dataset::new(records)
}

/// Same as `five_orthologs` with two quality metrics attached.
pub fn five_orthologs_with_quality() -> Dataset {
    let metrics = [
        (1.0, 0.0),
        (0.0, 1.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (0.0, 0.5),
    ];
    let mut dataset = five_orthologs().with_metric_names(["partial", "diff_from_median"]);
    for (record, (partial, diff)) in dataset.records.iter_mut().zip(metrics) {
        record.metrics.insert("partial".to_string(), partial);
        record.metrics.insert("diff_from_median".to_string(), diff);
    }
    dataset
}

pub fn pairwise_identities(dataset: &Dataset) -> Vec<f64> {
    let mut out = Vec::new();
    for i in 0..dataset.len() {
        for j in (i + 1)..dataset.len() {
            out.push(seqprune::core::compare::identity(
                dataset.records[i].sequence.as_bytes(),
                dataset.records[j].sequence.as_bytes(),
            ));
        }
    }
    out
}
