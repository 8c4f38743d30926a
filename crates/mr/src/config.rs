use std::path::PathBuf;

use clap::Args;
use mr_bundle::{BundleConfig, BundleEngine};

/// Grouping options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GroupingArgs {
    /// Property holding the external identifier
    #[arg(long, short)]
    key: Option<String>,
    /// Interpret --key as a JSON pointer into `properties` (e.g. /source/ext)
    #[arg(long)]
    pointer: bool,
    /// Consecutive stalled iterations before grouping gives up
    #[arg(long)]
    stall_threshold: Option<usize>,
    /// TOML file with `key`, `pointer` and `stall_threshold`
    #[arg(long)]
    config: Option<PathBuf>,
}

impl GroupingArgs {
    /// Config file values, then command-line overrides.
    pub fn resolve(&self) -> anyhow::Result<BundleConfig> {
        let mut config = match &self.config {
            Some(path) => BundleConfig::load(path)
                .map_err(|e| anyhow::anyhow!("loading {}: {e}", path.display()))?,
            None => BundleConfig::default(),
        };
        if let Some(key) = &self.key {
            config.key = key.clone();
        }
        if self.pointer {
            config.pointer = true;
        }
        if let Some(threshold) = self.stall_threshold {
            config.stall_threshold = threshold;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn engine(&self) -> anyhow::Result<BundleEngine> {
        let config = self.resolve()?;
        tracing::debug!(key = %config.key, pointer = config.pointer, "resolved grouping config");
        Ok(BundleEngine::from_config(&config)?)
    }
}
