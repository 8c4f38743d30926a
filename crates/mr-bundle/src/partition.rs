use crate::group::GroupRecord;
use crate::guard::{GuardState, ProgressGuard};
use crate::key::KeyExtractor;
use crate::record::FeatureRecord;

/// Result of draining a working set.
#[derive(Debug)]
pub struct Partition {
    pub groups: Vec<GroupRecord>,
    /// Records never assigned to a group. Empty unless the guard aborted.
    pub remaining: Vec<FeatureRecord>,
    pub iterations: usize,
}

/// Split `records` into groups of strictly equal keys, anchored on the first
/// ungrouped record each round. Stops early if `guard` aborts.
pub fn partition<K>(records: Vec<FeatureRecord>, extractor: &K, guard: &mut ProgressGuard) -> Partition
where
    K: KeyExtractor + ?Sized,
{
    let mut working = records;
    let mut groups = Vec::new();
    let mut iterations = 0;

    loop {
        let Some(anchor) = working.first() else {
            break;
        };
        let anchor_key = extractor.extract(anchor);
        let old_len = working.len();

        let (matching, rest): (Vec<_>, Vec<_>) = working
            .into_iter()
            .partition(|record| extractor.extract(record) == anchor_key);
        working = rest;
        iterations += 1;

        if let Some(group) = GroupRecord::synthesize(matching) {
            tracing::debug!(key = %anchor_key, members = group.len(), "grouped records");
            groups.push(group);
        }

        if guard.observe(old_len, working.len()) == GuardState::Aborted {
            break;
        }
    }

    Partition {
        groups,
        remaining: working,
        iterations,
    }
}
