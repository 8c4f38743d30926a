use std::io::Write;

use serde_json::Value;

use crate::record::{json_kind, FeatureRecord};
use crate::BundleError;

/// Read features from a GeoJSON `FeatureCollection`, a JSON array of
/// features, or line-delimited GeoJSON (one feature or collection per line).
pub fn parse_document(input: &str) -> Result<Vec<FeatureRecord>, BundleError> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => features_of(value),
        // A trailing-characters error means several documents: treat as line-delimited.
        Err(_) if trimmed.starts_with('{') => parse_lines(input),
        Err(e) => Err(BundleError::InvalidJson(e.to_string())),
    }
}

/// Line-delimited GeoJSON. Blank lines are skipped.
pub fn parse_lines(input: &str) -> Result<Vec<FeatureRecord>, BundleError> {
    let mut records = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_err = |reason: String| BundleError::InvalidLine {
            line: i + 1,
            reason,
        };
        let value: Value = serde_json::from_str(line).map_err(|e| line_err(e.to_string()))?;
        let features = features_of(value).map_err(|e| line_err(e.to_string()))?;
        records.extend(features);
    }
    Ok(records)
}

fn features_of(value: Value) -> Result<Vec<FeatureRecord>, BundleError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object)
            if object.get("type").and_then(Value::as_str) == Some("FeatureCollection") =>
        {
            match object.remove("features") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(BundleError::InvalidJson(format!(
                        "`features` must be an array, found {}",
                        json_kind(&other)
                    )))
                }
                None => Vec::new(),
            }
        }
        single => vec![single],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            FeatureRecord::from_value(item).map_err(|e| BundleError::InvalidFeature {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Write one serialized group per line.
pub fn write_lines<W: Write>(mut writer: W, lines: &[String]) -> Result<(), BundleError> {
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
