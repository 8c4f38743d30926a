use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use mr_bundle::BundleOutcome;

use crate::config::GroupingArgs;
use crate::input::read_features;

/// Exit status when grouping stalled and only partial output was written.
pub const EXIT_STALLED: u8 = 2;

#[derive(Args)]
pub struct BundleArgs {
    /// GeoJSON input; reads stdin when omitted or `-`
    input: Option<PathBuf>,
    /// Write line-delimited bundles here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    #[command(flatten)]
    grouping: GroupingArgs,
}

pub fn run(args: BundleArgs) -> anyhow::Result<ExitCode> {
    let engine = args.grouping.engine()?;
    let records = read_features(args.input.as_deref())?;
    let outcome = engine.run(records);
    write_outcome(&outcome, args.output.as_deref())
}

/// Write every resolved group, partial or not, then map the run to an exit code.
pub fn write_outcome(outcome: &BundleOutcome, output: Option<&Path>) -> anyhow::Result<ExitCode> {
    let lines = outcome.serialize()?;

    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            mr_bundle::write_lines(BufWriter::new(file), &lines)?;
        }
        None => mr_bundle::write_lines(std::io::stdout().lock(), &lines)?,
    }

    let stats = outcome.stats();
    tracing::info!(
        groups = stats.groups,
        bundles = stats.collections,
        features = stats.members,
        "wrote bundles"
    );

    if outcome.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("warning: grouping stalled; output is partial");
        Ok(ExitCode::from(EXIT_STALLED))
    }
}
