use std::fmt;

use serde_json::Value;

use crate::config::BundleConfig;
use crate::group::GroupRecord;
use crate::guard::{ProgressGuard, DEFAULT_STALL_THRESHOLD};
use crate::key::{KeyExtractor, KeyPath};
use crate::partition::partition;
use crate::record::FeatureRecord;
use crate::stats::BundleStats;
use crate::BundleError;

/// Reported when the progress guard gives up on an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StallDiagnostic {
    pub iterations: usize,
    pub remaining: usize,
    pub threshold: usize,
    pub groups_emitted: usize,
}

impl fmt::Display for StallDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grouping stalled after {} iterations ({} consecutive without progress); \
             {} records left ungrouped, {} groups emitted",
            self.iterations, self.threshold, self.remaining, self.groups_emitted
        )
    }
}

pub trait DiagnosticSink {
    fn stalled(&self, diagnostic: &StallDiagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&StallDiagnostic),
{
    fn stalled(&self, diagnostic: &StallDiagnostic) {
        self(diagnostic)
    }
}

/// Sends stall diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn stalled(&self, diagnostic: &StallDiagnostic) {
        tracing::warn!(
            iterations = diagnostic.iterations,
            remaining = diagnostic.remaining,
            "{diagnostic}"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Completed,
    Stalled {
        stalled_iterations: usize,
        remaining: usize,
    },
}

#[derive(Debug)]
pub struct BundleOutcome {
    pub groups: Vec<GroupRecord>,
    pub termination: Termination,
    pub iterations: usize,
}

impl BundleOutcome {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }

    /// One JSON string per group, in emission order.
    pub fn serialize(&self) -> Result<Vec<String>, BundleError> {
        self.groups.iter().map(GroupRecord::to_json).collect()
    }

    pub fn stats(&self) -> BundleStats {
        BundleStats::from_groups(&self.groups)
    }
}

/// Groups features by key. Stateless between runs; each run owns its input.
pub struct BundleEngine<K = KeyPath, S = TracingSink> {
    extractor: K,
    sink: S,
    stall_threshold: usize,
}

impl BundleEngine {
    pub fn new(key: KeyPath) -> Self {
        Self {
            extractor: key,
            sink: TracingSink,
            stall_threshold: DEFAULT_STALL_THRESHOLD,
        }
    }

    pub fn from_config(config: &BundleConfig) -> Result<Self, BundleError> {
        config.validate()?;
        Ok(Self::new(config.key_path()?).with_stall_threshold(config.stall_threshold))
    }
}

impl<K: KeyExtractor, S: DiagnosticSink> BundleEngine<K, S> {
    pub fn with_extractor<K2: KeyExtractor>(self, extractor: K2) -> BundleEngine<K2, S> {
        BundleEngine {
            extractor,
            sink: self.sink,
            stall_threshold: self.stall_threshold,
        }
    }

    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> BundleEngine<K, S2> {
        BundleEngine {
            extractor: self.extractor,
            sink,
            stall_threshold: self.stall_threshold,
        }
    }

    pub fn with_stall_threshold(mut self, threshold: usize) -> Self {
        self.stall_threshold = threshold;
        self
    }

    pub fn stall_threshold(&self) -> usize {
        self.stall_threshold
    }

    pub fn run(&self, records: Vec<FeatureRecord>) -> BundleOutcome {
        let mut guard = ProgressGuard::new(self.stall_threshold);
        let result = partition(records, &self.extractor, &mut guard);

        let termination = if result.remaining.is_empty() {
            Termination::Completed
        } else {
            let diagnostic = StallDiagnostic {
                iterations: result.iterations,
                remaining: result.remaining.len(),
                threshold: guard.threshold(),
                groups_emitted: result.groups.len(),
            };
            self.sink.stalled(&diagnostic);
            Termination::Stalled {
                stalled_iterations: guard.stalls(),
                remaining: result.remaining.len(),
            }
        };

        BundleOutcome {
            groups: result.groups,
            termination,
            iterations: result.iterations,
        }
    }

    /// Validate raw JSON features, then run. Fails on the first malformed one.
    pub fn run_values(&self, values: Vec<Value>) -> Result<BundleOutcome, BundleError> {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                FeatureRecord::from_value(value).map_err(|e| BundleError::InvalidFeature {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.run(records))
    }
}

/// Group `records` by the top-level property `key_name` and serialize each
/// group. A stalled run yields the groups resolved so far and logs a warning.
pub fn group_by_key(records: Vec<FeatureRecord>, key_name: &str) -> Result<Vec<String>, BundleError> {
    BundleEngine::new(KeyPath::name(key_name)).run(records).serialize()
}
