use mr_bundle::{BundleStats, Termination};

fn kv(key: &str, value: impl std::fmt::Display) -> String {
    format!("{key:>20}: {value}")
}

/// Human-readable summary of a grouping run.
pub fn stats_report(key: &str, stats: &BundleStats, termination: &Termination) -> Vec<String> {
    let mut lines = vec![format!("=== bundles by {key} ===")];
    lines.push(kv("features", stats.members));
    lines.push(kv("groups", stats.groups));
    lines.push(kv("single tasks", stats.singletons));
    lines.push(kv("bundles", stats.collections));
    lines.push(kv("largest bundle", stats.largest_collection));
    match termination {
        Termination::Completed => lines.push(kv("status", "complete")),
        Termination::Stalled { remaining, .. } => {
            lines.push(kv("status", "stalled"));
            lines.push(kv("ungrouped", remaining));
        }
    }
    lines
}

pub fn stats_json(key: &str, stats: &BundleStats, termination: &Termination) -> serde_json::Value {
    let mut value = serde_json::json!({
        "key": key,
        "stats": stats,
        "complete": matches!(termination, Termination::Completed),
    });
    if let Termination::Stalled { remaining, .. } = termination {
        value["ungrouped"] = serde_json::json!(remaining);
    }
    value
}
