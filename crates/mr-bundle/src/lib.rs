pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod guard;
pub mod json;
pub mod key;
pub mod partition;
pub mod record;
pub mod source;
pub mod stats;

pub use config::BundleConfig;
pub use engine::{
    group_by_key, BundleEngine, BundleOutcome, DiagnosticSink, StallDiagnostic, Termination,
    TracingSink,
};
pub use error::BundleError;
pub use group::{flatten, GroupRecord};
pub use guard::{GuardState, ProgressGuard, DEFAULT_STALL_THRESHOLD};
pub use key::{GroupKey, KeyExtractor, KeyPath};
pub use record::FeatureRecord;
pub use source::{parse_document, parse_lines, write_lines};
pub use stats::BundleStats;
