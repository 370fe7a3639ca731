/// Block worker: runs the pairwise comparator over one work block
use crate::core::compare::compare_pair;
use crate::core::keep_state::KeepState;
use crate::core::partition::WorkBlock;
use crate::core::quality::QualityVector;
use crate::PruneError;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};

/// Read-only inputs shared by every worker of a run, plus the keep state.
pub struct ComparisonContext<'a> {
    pub sequences: &'a [&'a [u8]],
    pub qualities: &'a [QualityVector],
    pub keep_state: &'a KeepState,
    pub cutoff: f64,
    pub discard_key: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    pub pairs_visited: u64,
    /// Pairs skipped because both records were already discarded
    pub pairs_skipped: u64,
    pub comparisons: u64,
    /// Number of `false` verdicts written to the keep state
    pub discard_verdicts: u64,
}

impl BlockStats {
    pub fn merge(&mut self, other: &BlockStats) {
        self.pairs_visited += other.pairs_visited;
        self.pairs_skipped += other.pairs_skipped;
        self.comparisons += other.comparisons;
        self.discard_verdicts += other.discard_verdicts;
    }
}

impl ComparisonContext<'_> {
    fn check_block(&self, block: &WorkBlock) -> Result<(), PruneError> {
        let n = self.sequences.len();
        if self.qualities.len() != n || self.keep_state.len() != n {
            return Err(PruneError::WorkerFailure(format!(
                "inconsistent inputs: {} sequences, {} quality vectors, {} keep flags",
                n,
                self.qualities.len(),
                self.keep_state.len()
            )));
        }
        if block.rows.end > n || block.cols.end > n {
            return Err(PruneError::WorkerFailure(format!(
                "block rows {:?} cols {:?} exceed {} records",
                block.rows, block.cols, n
            )));
        }
        Ok(())
    }
}

/// Compare every `i < j` pair of `block`, discarding records that lose.
///
/// Progress advances by one per row.
pub fn run_block(
    block: &WorkBlock,
    ctx: &ComparisonContext<'_>,
    progress: &ProgressBar,
) -> Result<BlockStats, PruneError> {
    ctx.check_block(block)?;

    let keep = ctx.keep_state;
    let mut stats = BlockStats::default();

    for i in block.rows.clone() {
        let start = block.cols.start.max(i + 1);
        for j in start..block.cols.end.max(start) {
            stats.pairs_visited += 1;

            if !keep.is_kept(i) && !keep.is_kept(j) {
                stats.pairs_skipped += 1;
                continue;
            }

            stats.comparisons += 1;
            let (keep_i, keep_j) = compare_pair(
                ctx.sequences[i],
                ctx.sequences[j],
                &ctx.qualities[i],
                &ctx.qualities[j],
                ctx.cutoff,
                ctx.discard_key,
            );

            if !keep_i {
                keep.discard(i);
                stats.discard_verdicts += 1;
            }
            if !keep_j {
                keep.discard(j);
                stats.discard_verdicts += 1;
            }
        }
        progress.inc(1);
    }

    tracing::debug!(
        rows = ?block.rows,
        comparisons = stats.comparisons,
        skipped = stats.pairs_skipped,
        "block complete"
    );

    Ok(stats)
}
