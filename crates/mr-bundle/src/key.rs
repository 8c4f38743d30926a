use std::fmt;

use serde_json::Value;

use crate::json::format_number;
use crate::record::FeatureRecord;
use crate::BundleError;

/// The grouping key of a record. `Absent` is a key value of its own, so all
/// records without the property land in one group. Numbers compare by
/// numeric value, so `1` and `1.0` (or `0` and `-0`) are the same key.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    Absent,
    Number(f64),
    Value(Value),
}

impl GroupKey {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) if f == 0.0 => GroupKey::Number(0.0),
                Some(f) => GroupKey::Number(f),
                None => GroupKey::Value(value.clone()),
            },
            other => GroupKey::Value(other.clone()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Absent => f.write_str("<absent>"),
            GroupKey::Number(n) => f.write_str(&format_number(*n)),
            GroupKey::Value(v) => write!(f, "{v}"),
        }
    }
}

pub trait KeyExtractor {
    fn extract(&self, record: &FeatureRecord) -> GroupKey;
}

impl<F> KeyExtractor for F
where
    F: Fn(&FeatureRecord) -> GroupKey,
{
    fn extract(&self, record: &FeatureRecord) -> GroupKey {
        self(record)
    }
}

/// Where to find the key inside a record's `properties`: a top-level
/// property, plus an optional JSON pointer into its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    property: String,
    /// Remainder of the pointer below `property`; empty for a plain name.
    nested: String,
    is_pointer: bool,
}

impl KeyPath {
    /// A single top-level property name, taken literally.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            property: name.into(),
            nested: String::new(),
            is_pointer: false,
        }
    }

    /// A JSON pointer relative to `properties`, e.g. `/source/ext`.
    pub fn pointer(pointer: &str) -> Result<Self, BundleError> {
        let rest = pointer
            .strip_prefix('/')
            .ok_or_else(|| BundleError::InvalidKeyPath(format!("{pointer:?} must start with '/'")))?;
        let (first, nested) = match rest.find('/') {
            Some(at) => rest.split_at(at),
            None => (rest, ""),
        };
        Ok(Self {
            property: first.replace("~1", "/").replace("~0", "~"),
            nested: nested.to_string(),
            is_pointer: true,
        })
    }

    /// The top-level property the key lives under.
    pub fn property(&self) -> &str {
        &self.property
    }

    fn lookup<'a>(&self, record: &'a FeatureRecord) -> Option<&'a Value> {
        record.properties().get(&self.property)?.pointer(&self.nested)
    }
}

impl KeyExtractor for KeyPath {
    fn extract(&self, record: &FeatureRecord) -> GroupKey {
        match self.lookup(record) {
            Some(v) => GroupKey::from_value(v),
            None => GroupKey::Absent,
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pointer {
            let escaped = self.property.replace('~', "~0").replace('/', "~1");
            write!(f, "/{escaped}{}", self.nested)
        } else {
            f.write_str(&self.property)
        }
    }
}
