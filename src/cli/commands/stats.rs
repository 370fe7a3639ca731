use crate::bio::sequence::Dataset;
use crate::bio::table::SequenceTable;
use crate::cli::formatter::{count_with_share, group_digits, print_metric_means, print_summary};
use clap::Args;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Args)]
pub struct StatsArgs {
    /// Input CSV table
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Quality metric columns to summarize (can be repeated)
    #[arg(short = 'm', long = "metric", value_name = "COLUMN")]
    pub metrics: Vec<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub records: usize,
    pub kept: usize,
    pub always_keep: usize,
    pub key_species_flagged: usize,
    pub species: usize,
    pub min_length: usize,
    pub median_length: usize,
    pub max_length: usize,
    pub mean_length: f64,
    pub metric_means: Vec<(String, f64)>,
}

impl TableStats {
    pub fn calculate(dataset: &Dataset) -> Self {
        let mut lengths: Vec<usize> = dataset.records.iter().map(|r| r.len()).collect();
        lengths.sort_unstable();

        let total: usize = lengths.iter().sum();
        let mean_length = if lengths.is_empty() {
            0.0
        } else {
            total as f64 / lengths.len() as f64
        };

        let species: HashSet<&str> = dataset.records.iter().map(|r| r.species.as_str()).collect();

        let metric_means = dataset
            .metric_names
            .iter()
            .map(|name| {
                let values: Vec<f64> = dataset
                    .records
                    .iter()
                    .filter_map(|r| r.metrics.get(name).copied())
                    .collect();
                let mean = if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                };
                (name.clone(), mean)
            })
            .collect();

        Self {
            records: dataset.len(),
            kept: dataset.kept_count(),
            always_keep: dataset.records.iter().filter(|r| r.is_always_keep()).count(),
            key_species_flagged: dataset
                .records
                .iter()
                .filter(|r| r.key_species.unwrap_or(false))
                .count(),
            species: species.len(),
            min_length: lengths.first().copied().unwrap_or(0),
            median_length: lengths.get(lengths.len() / 2).copied().unwrap_or(0),
            max_length: lengths.last().copied().unwrap_or(0),
            mean_length,
            metric_means,
        }
    }
}

pub fn run(args: StatsArgs) -> anyhow::Result<()> {
    let table = SequenceTable::read_csv(&args.input)?;
    let dataset = table.to_dataset(&args.metrics)?;
    let stats = TableStats::calculate(&dataset);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        "text" => print_text_stats(&stats),
        other => anyhow::bail!("Unknown output format '{}'. Options: text, json", other),
    }

    Ok(())
}

fn print_text_stats(stats: &TableStats) {
    print_summary(
        "Sequence Table",
        &[
            ("Records", group_digits(stats.records as u64)),
            ("Kept", count_with_share(stats.kept, stats.records)),
            ("Always keep", group_digits(stats.always_keep as u64)),
            ("Key species flagged", group_digits(stats.key_species_flagged as u64)),
            ("Species", group_digits(stats.species as u64)),
            (
                "Length min/median/max",
                format!("{} / {} / {}", stats.min_length, stats.median_length, stats.max_length),
            ),
            ("Mean length", format!("{:.1}", stats.mean_length)),
        ],
    );
    print_metric_means(&stats.metric_means);
}
