use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::record::FeatureRecord;
use crate::BundleError;

/// One output bundle: a lone feature, or every feature that shared a key.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupRecord {
    Singleton(FeatureRecord),
    Collection(Vec<FeatureRecord>),
}

impl GroupRecord {
    /// Build a group from a partition. Returns `None` for an empty partition.
    pub fn synthesize(mut members: Vec<FeatureRecord>) -> Option<Self> {
        match members.len() {
            0 => None,
            1 => members.pop().map(GroupRecord::Singleton),
            _ => Some(GroupRecord::Collection(members)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GroupRecord::Singleton(_) => 1,
            GroupRecord::Collection(features) => features.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, GroupRecord::Collection(_))
    }

    pub fn members(&self) -> &[FeatureRecord] {
        match self {
            GroupRecord::Singleton(record) => std::slice::from_ref(record),
            GroupRecord::Collection(features) => features,
        }
    }

    pub fn into_members(self) -> Vec<FeatureRecord> {
        match self {
            GroupRecord::Singleton(record) => vec![record],
            GroupRecord::Collection(features) => features,
        }
    }

    pub fn to_json(&self) -> Result<String, BundleError> {
        crate::json::to_string(self)
    }
}

impl Serialize for GroupRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupRecord::Singleton(record) => record.serialize(serializer),
            GroupRecord::Collection(features) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "FeatureCollection")?;
                map.serialize_entry("features", features)?;
                map.end()
            }
        }
    }
}

/// Member records of all groups, in emission order.
pub fn flatten(groups: impl IntoIterator<Item = GroupRecord>) -> Vec<FeatureRecord> {
    groups.into_iter().flat_map(GroupRecord::into_members).collect()
}
