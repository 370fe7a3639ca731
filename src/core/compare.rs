/// Pairwise redundancy decision
use crate::core::quality::QualityVector;
use std::cmp::Ordering;

/// Fraction of identical residues over the overlapping positions of two
/// pre-aligned sequences. Residues are compared byte for byte, position by
/// position; no re-alignment and no case folding.
pub fn identity(a: &[u8], b: &[u8]) -> f64 {
    let compared = a.len().min(b.len());
    if compared == 0 {
        return 0.0;
    }

    let matches = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x == y)
        .count();

    matches as f64 / compared as f64
}

/// Decide which of two sequences survive their pairwise comparison.
///
/// `a` must be the lower-index record: it wins a complete quality tie.
/// Returns `(keep_a, keep_b)`; a `true` only means this pair does not
/// condemn the record.
pub fn compare_pair(
    seq_a: &[u8],
    seq_b: &[u8],
    qual_a: &QualityVector,
    qual_b: &QualityVector,
    cutoff: f64,
    discard_key: bool,
) -> (bool, bool) {
    if identity(seq_a, seq_b) < cutoff {
        return (true, true);
    }

    // A protected record is never removed, and it does not remove its
    // partner either.
    if qual_a.is_always_keep() || qual_b.is_always_keep() {
        return (true, true);
    }

    if !discard_key && (qual_a.is_key_species() || qual_b.is_key_species()) {
        return (true, true);
    }

    match rank(qual_a, qual_b) {
        Ordering::Greater => (false, true),
        Ordering::Less | Ordering::Equal => (true, false),
    }
}

/// Lexicographic comparison of the ranking tails; first difference decides.
///
/// Values are finite after validation, and `0.0` and `-0.0` must tie.
fn rank(qual_a: &QualityVector, qual_b: &QualityVector) -> Ordering {
    qual_a
        .ranking
        .iter()
        .zip(&qual_b.ranking)
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
