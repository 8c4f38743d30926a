use std::io::Read;
use std::path::Path;

use anyhow::Context;
use mr_bundle::FeatureRecord;

/// Read features from `path`, or stdin when it is absent or `-`.
pub fn read_features(path: Option<&Path>) -> anyhow::Result<Vec<FeatureRecord>> {
    let (label, content) = match path {
        Some(p) if p != Path::new("-") => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("reading {}", p.display()))?;
            (p.display().to_string(), content)
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("reading stdin")?;
            ("<stdin>".to_string(), content)
        }
    };

    let records = mr_bundle::parse_document(&content).with_context(|| format!("parsing {label}"))?;
    tracing::info!(source = %label, features = records.len(), "read features");
    Ok(records)
}
