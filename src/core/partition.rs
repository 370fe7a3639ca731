/// Decomposition of the all-vs-all pair space into worker blocks
///
/// A block is a rectangle `rows × cols` of the n×n index grid. Workers only
/// visit cells with `i < j`, so the upper triangle is covered exactly once as
/// long as the row ranges partition `[0, n)` and every block spans all columns.
use std::ops::Range;

/// Below this many pairs the whole problem runs as one block on one thread.
pub const SMALL_PROBLEM_PAIRS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkBlock {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl WorkBlock {
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    /// Number of `i < j` pairs inside the block.
    pub fn pair_count(&self) -> usize {
        self.rows
            .clone()
            .map(|i| {
                let start = self.cols.start.max(i + 1);
                self.cols.end.saturating_sub(start)
            })
            .sum()
    }

    /// Iterate the `i < j` pairs of the block in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.clone().flat_map(move |i| {
            let start = self.cols.start.max(i + 1);
            (start..self.cols.end.max(start)).map(move |j| (i, j))
        })
    }
}

pub fn total_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Split `n` records into blocks for at most `num_threads` workers.
///
/// Returns the blocks and the number of threads actually worth using.
pub fn construct_blocks(n: usize, num_threads: usize) -> (Vec<WorkBlock>, usize) {
    construct_blocks_with_threshold(n, num_threads, SMALL_PROBLEM_PAIRS)
}

pub fn construct_blocks_with_threshold(
    n: usize,
    num_threads: usize,
    min_pairs: usize,
) -> (Vec<WorkBlock>, usize) {
    let pairs = total_pairs(n);

    if pairs < min_pairs || num_threads <= 1 || num_threads > n {
        return (vec![WorkBlock::new(0..n, 0..n)], 1);
    }

    // Row i owns n-1-i pairs; cut where the cumulative pair count crosses
    // each k/num_threads share.
    let mut bounds = Vec::with_capacity(num_threads + 1);
    bounds.push(0);

    let mut row = 0;
    let mut covered = 0usize;
    for k in 1..num_threads {
        let target = pairs * k / num_threads;
        while row < n && covered < target {
            covered += n - 1 - row;
            row += 1;
        }
        bounds.push(row);
    }
    bounds.push(n);

    let blocks: Vec<WorkBlock> = bounds
        .windows(2)
        .filter(|w| w[0] < w[1])
        .map(|w| WorkBlock::new(w[0]..w[1], 0..n))
        .collect();

    let effective = blocks.len();
    (blocks, effective)
}
