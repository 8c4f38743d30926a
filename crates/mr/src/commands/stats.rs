use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use mr_bundle::BundleEngine;

use crate::config::GroupingArgs;
use crate::input::read_features;
use crate::output::{stats_json, stats_report};

#[derive(Args)]
pub struct StatsArgs {
    /// GeoJSON input; reads stdin when omitted or `-`
    input: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    grouping: GroupingArgs,
}

pub fn run(args: StatsArgs) -> anyhow::Result<ExitCode> {
    let config = args.grouping.resolve()?;
    let engine = BundleEngine::from_config(&config)?;
    let outcome = engine.run(read_features(args.input.as_deref())?);
    let stats = outcome.stats();

    if args.json {
        let value = stats_json(&config.key, &stats, &outcome.termination);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for line in stats_report(&config.key, &stats, &outcome.termination) {
            println!("{line}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
