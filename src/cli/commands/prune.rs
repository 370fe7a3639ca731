use crate::bio::table::SequenceTable;
use crate::cli::formatter::{count_with_share, done, group_digits, print_summary, warn};
use crate::core::config::{default_config, load_config, Config};
use crate::core::redundancy::RedundancyRemover;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Input CSV table (requires a `sequence` column)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output CSV table with the `keep` column updated
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Identity at or above which two sequences are redundant (0.0-1.0)
    #[arg(long, value_name = "IDENTITY")]
    pub cutoff: Option<f64>,

    /// Resolve redundancy between key species instead of keeping both
    #[arg(long)]
    pub discard_key: bool,

    /// Species to protect from removal (can be repeated)
    #[arg(long = "key-species", value_name = "SPECIES")]
    pub key_species: Vec<String>,

    /// File with one key species per line
    #[arg(long, value_name = "FILE")]
    pub key_species_file: Option<PathBuf>,

    /// Quality metric column, most significant first (can be repeated)
    #[arg(short = 'm', long = "metric", value_name = "COLUMN")]
    pub metrics: Vec<String>,

    /// Write a JSON run report
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long)]
    pub silent: bool,

    /// Number of threads (passed from global)
    #[arg(skip)]
    pub threads: Option<i64>,
}

/// Merge the config file (or defaults) with command line overrides.
pub fn build_config(args: &PruneArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => default_config(),
    };

    if let Some(cutoff) = args.cutoff {
        config.redundancy.cutoff = cutoff;
    }
    if args.discard_key {
        config.redundancy.discard_key = true;
    }
    if !args.metrics.is_empty() {
        config.redundancy.metric_columns = args.metrics.clone();
    }
    config.redundancy.key_species.extend(args.key_species.iter().cloned());
    if let Some(path) = &args.key_species_file {
        config.redundancy.key_species.extend(read_key_species(path)?);
    }
    if let Some(threads) = args.threads {
        config.performance.num_threads = threads;
    }
    if args.silent {
        config.performance.silent = true;
    }

    Ok(config)
}

/// One species per line; blank lines and `#` comments are ignored.
pub fn read_key_species(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read key species file {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

pub fn run(args: PruneArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let silent = config.performance.silent;

    let table = SequenceTable::read_csv(&args.input)?;
    let dataset = table.to_dataset(&config.redundancy.metric_columns)?;

    if !silent && config.redundancy.metric_columns.is_empty() {
        warn("No quality metric columns given; ties are broken by sequence length only");
    }

    let remover = RedundancyRemover::from_config(&config);
    let (pruned, report) = remover.run(&dataset)?;

    table.with_keep(&pruned)?.write_csv(&args.output)?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    if !silent {
        print_summary(
            "Redundancy Removal",
            &[
                ("Records", group_digits(report.input_records as u64)),
                ("Kept before", group_digits(report.kept_before as u64)),
                ("Kept after", group_digits(report.kept_after as u64)),
                ("Removed", count_with_share(report.removed, report.kept_before)),
                ("Cutoff", format!("{:.3}", report.cutoff)),
                ("Comparisons", group_digits(report.stats.comparisons)),
                ("Skipped pairs", group_digits(report.stats.pairs_skipped)),
                ("Threads", report.threads_used.to_string()),
            ],
        );
        done(&format!("Wrote {}", args.output.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PruneArgs,
    }

    fn parse(argv: &[&str]) -> PruneArgs {
        TestCli::parse_from(std::iter::once("prune").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("seqprune.toml");
        std::fs::write(
            &config_path,
            "[redundancy]\ncutoff = 0.8\nmetric_columns = [\"partial\"]\n[performance]\nnum_threads = 2\n",
        )
        .unwrap();

        let mut args = parse(&[
            "-i", "in.csv", "-o", "out.csv",
            "-c", config_path.to_str().unwrap(),
            "--cutoff", "0.9",
            "--key-species", "Homo sapiens",
        ]);
        args.threads = None;

        let config = build_config(&args).unwrap();
        assert_eq!(config.redundancy.cutoff, 0.9);
        assert_eq!(config.redundancy.metric_columns, vec!["partial".to_string()]);
        assert_eq!(config.redundancy.key_species, vec!["Homo sapiens".to_string()]);
        assert_eq!(config.performance.num_threads, 2);
    }

    #[test]
    fn test_key_species_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("species.txt");
        std::fs::write(&path, "# protected\nHomo sapiens\n\n  Mus musculus  \n").unwrap();

        assert_eq!(
            read_key_species(&path).unwrap(),
            vec!["Homo sapiens".to_string(), "Mus musculus".to_string()]
        );
    }

    #[test]
    fn test_run_writes_table_and_report() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        let report = dir.path().join("report.json");
        std::fs::write(
            &input,
            "uid,species,sequence,note\n\
             a,Homo sapiens,MKLVAGHTWE,first\n\
             b,Mus musculus,MKLVAGHTWQ,second\n\
             c,Danio rerio,PPPPPPPPPP,third\n",
        )
        .unwrap();

        let mut args = parse(&[
            "-i", input.to_str().unwrap(),
            "-o", output.to_str().unwrap(),
            "--cutoff", "0.9",
            "--report", report.to_str().unwrap(),
            "--silent",
        ]);
        args.threads = Some(1);
        run(args).unwrap();

        let written = SequenceTable::read_csv(&output).unwrap();
        assert_eq!(written.headers.last().unwrap(), "keep");
        assert_eq!(written.rows[1][3], "second");
        let keep: Vec<&str> = written.rows.iter().map(|r| r[4].as_str()).collect();
        assert_eq!(keep, vec!["True", "False", "True"]);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json["removed"], 1);
    }
}
