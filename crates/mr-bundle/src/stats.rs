use serde::Serialize;

use crate::group::GroupRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BundleStats {
    pub groups: usize,
    pub singletons: usize,
    pub collections: usize,
    pub largest_collection: usize,
    pub members: usize,
}

impl BundleStats {
    pub fn from_groups(groups: &[GroupRecord]) -> Self {
        groups.iter().fold(Self::default(), |mut acc, group| {
            acc.groups += 1;
            acc.members += group.len();
            if group.is_collection() {
                acc.collections += 1;
                acc.largest_collection = acc.largest_collection.max(group.len());
            } else {
                acc.singletons += 1;
            }
            acc
        })
    }
}
