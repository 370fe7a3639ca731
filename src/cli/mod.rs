pub mod commands;
pub mod formatter;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "seqprune",
    version,
    about = "Quality-ranked redundancy removal for annotated sequence tables",
    long_about = "seqprune compares every pair of pre-aligned sequences in a table and, for \
                  each pair at or above the identity cutoff, keeps the record with the better \
                  quality metrics. Always-keep records and key species are protected."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (-1 = all available, default from config)
    #[arg(short = 'j', long, allow_hyphen_values = true, global = true)]
    pub threads: Option<i64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flag redundant sequences in a table
    Prune(commands::prune::PruneArgs),

    /// Summarize a sequence table
    Stats(commands::stats::StatsArgs),

    /// Print or write the default configuration
    Config(commands::config::ConfigArgs),
}
