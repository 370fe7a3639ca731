use crate::cli::formatter::done;
use crate::core::config::{default_config, save_config, to_toml};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration here instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config = default_config();
    match args.output {
        Some(path) => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            save_config(&path, &config)?;
            done(&format!("Wrote default configuration to {}", path.display()));
        }
        None => print!("{}", to_toml(&config)?),
    }
    Ok(())
}
