use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("feature is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },
    #[error("feature has no `properties` object")]
    MissingProperties,
    #[error("invalid key path: {0}")]
    InvalidKeyPath(String),
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("invalid json on line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error("feature {index}: {source}")]
    InvalidFeature {
        index: usize,
        #[source]
        source: Box<BundleError>,
    },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
