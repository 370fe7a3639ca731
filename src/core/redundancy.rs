/// Redundancy removal pipeline
///
/// Scores every record, splits the pair space into blocks, runs one worker
/// per block on a dedicated pool and folds the shared keep state back into a
/// fresh copy of the dataset. The caller's dataset is never modified.
use crate::bio::sequence::Dataset;
use crate::core::config::Config;
use crate::core::keep_state::KeepState;
use crate::core::partition::{construct_blocks, WorkBlock};
use crate::core::quality::score_dataset;
use crate::core::worker::{run_block, BlockStats, ComparisonContext};
use crate::utils::parallel::{build_thread_pool, resolve_thread_count, ALL_THREADS};
use crate::PruneError;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct RedundancyRemover {
    cutoff: f64,
    discard_key: bool,
    num_threads: i64,
    key_species: HashSet<String>,
    silent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundancyReport {
    pub input_records: usize,
    pub kept_before: usize,
    pub kept_after: usize,
    pub removed: usize,
    pub cutoff: f64,
    pub discard_key: bool,
    pub threads_used: usize,
    pub blocks: usize,
    pub stats: BlockStats,
    pub elapsed_ms: u128,
}

impl Default for RedundancyRemover {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl RedundancyRemover {
    pub fn new(cutoff: f64) -> Self {
        Self {
            cutoff,
            discard_key: false,
            num_threads: ALL_THREADS,
            key_species: HashSet::new(),
            silent: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.redundancy.cutoff)
            .with_discard_key(config.redundancy.discard_key)
            .with_num_threads(config.performance.num_threads)
            .with_key_species(config.redundancy.key_species.iter().cloned())
            .with_silent(config.performance.silent)
    }

    pub fn with_discard_key(mut self, discard_key: bool) -> Self {
        self.discard_key = discard_key;
        self
    }

    pub fn with_num_threads(mut self, num_threads: i64) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_key_species<I, S>(mut self, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_species.extend(species.into_iter().map(Into::into));
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Validate parameters and resolve the thread budget. Runs before any
    /// record is touched.
    fn check_parameters(&self) -> Result<usize, PruneError> {
        if !self.cutoff.is_finite() || !(0.0..=1.0).contains(&self.cutoff) {
            return Err(PruneError::ParameterRange(format!(
                "cutoff must be between 0 and 1, got {}",
                self.cutoff
            )));
        }
        resolve_thread_count(self.num_threads)
    }

    fn progress_bar(&self, rows: usize) -> ProgressBar {
        if self.silent {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(rows as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} Comparing sequences")
            .map(|s| s.progress_chars("##-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Remove redundant records, returning the updated copy and a run report.
    pub fn run(&self, dataset: &Dataset) -> Result<(Dataset, RedundancyReport), PruneError> {
        let started = Instant::now();
        let requested_threads = self.check_parameters()?;
        dataset.validate()?;

        let n = dataset.len();
        let kept_before = dataset.kept_count();
        let _span = tracing::debug_span!("remove_redundancy", records = n).entered();

        let mut report = RedundancyReport {
            input_records: n,
            kept_before,
            kept_after: kept_before,
            removed: 0,
            cutoff: self.cutoff,
            discard_key: self.discard_key,
            threads_used: 1,
            blocks: 0,
            stats: BlockStats::default(),
            elapsed_ms: 0,
        };

        if n < 2 {
            report.elapsed_ms = started.elapsed().as_millis();
            return Ok((dataset.clone(), report));
        }

        let (blocks, threads) = construct_blocks(n, requested_threads);
        let pool = build_thread_pool(threads)?;
        tracing::debug!(
            requested = requested_threads,
            threads,
            blocks = blocks.len(),
            "partitioned pair space"
        );

        let qualities = pool.install(|| score_dataset(dataset, &self.key_species))?;
        let sequences: Vec<&[u8]> = dataset.records.iter().map(|r| r.sequence.as_bytes()).collect();
        let keep_state = KeepState::from_flags(&dataset.keep_flags());

        let pb = self.progress_bar(n);
        let ctx = ComparisonContext {
            sequences: &sequences,
            qualities: &qualities,
            keep_state: &keep_state,
            cutoff: self.cutoff,
            discard_key: self.discard_key,
        };

        let block_stats = dispatch_blocks(&pool, &blocks, |block| run_block(block, &ctx, &pb))?;

        for stats in &block_stats {
            report.stats.merge(stats);
        }
        pb.finish_and_clear();

        let flags = keep_state.into_flags();
        let output = dataset.with_keep_flags(&flags)?;

        report.kept_after = output.kept_count();
        report.removed = kept_before - report.kept_after;
        report.threads_used = threads;
        report.blocks = blocks.len();
        report.elapsed_ms = started.elapsed().as_millis();

        tracing::info!(
            records = n,
            kept_before,
            kept_after = report.kept_after,
            comparisons = report.stats.comparisons,
            threads,
            "redundancy removal complete"
        );

        Ok((output, report))
    }
}

/// Remove redundant records from `dataset`, returning an updated copy.
///
/// `num_threads` of -1 uses every available hardware thread. Progress output
/// is suppressed.
pub fn remove_redundancy(
    dataset: &Dataset,
    cutoff: f64,
    key_species: Option<&HashSet<String>>,
    discard_key: bool,
    num_threads: i64,
) -> Result<Dataset, PruneError> {
    let mut remover = RedundancyRemover::new(cutoff)
        .with_discard_key(discard_key)
        .with_num_threads(num_threads)
        .with_silent(true);
    if let Some(species) = key_species {
        remover = remover.with_key_species(species.iter().cloned());
    }
    remover.run(dataset).map(|(out, _)| out)
}

/// Run `worker` once per block on `pool`. The first error or panic from any
/// worker fails the whole dispatch.
fn dispatch_blocks<F>(
    pool: &rayon::ThreadPool,
    blocks: &[WorkBlock],
    worker: F,
) -> Result<Vec<BlockStats>, PruneError>
where
    F: Fn(&WorkBlock) -> Result<BlockStats, PruneError> + Sync,
{
    pool.install(|| {
        blocks
            .par_iter()
            .map(|block| {
                catch_unwind(AssertUnwindSafe(|| worker(block))).unwrap_or_else(|panic| {
                    Err(PruneError::WorkerFailure(panic_message(panic.as_ref())))
                })
            })
            .collect()
    })
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("worker panicked: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("worker panicked: {}", msg)
    } else {
        "worker panicked".to_string()
    }
}
