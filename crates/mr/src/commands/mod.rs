pub mod bundle;
pub mod stats;

use std::process::ExitCode;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Group features by external id and write one bundle per line
    Bundle(bundle::BundleArgs),
    /// Summarize how features would be bundled
    Stats(stats::StatsArgs),
}

impl Commands {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Commands::Bundle(args) => bundle::run(args),
            Commands::Stats(args) => stats::run(args),
        }
    }
}
