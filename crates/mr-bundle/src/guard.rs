/// Consecutive stalled iterations before the partition loop gives up: the
/// 10th stall in a row aborts, so at most 9 are tolerated.
pub const DEFAULT_STALL_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Running,
    Aborted,
}

/// Watches the working-set length across partition iterations and aborts
/// once it has failed to shrink `threshold` times in a row.
#[derive(Debug, Clone)]
pub struct ProgressGuard {
    threshold: usize,
    stalls: usize,
    state: GuardState,
}

impl ProgressGuard {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            stalls: 0,
            state: GuardState::Running,
        }
    }

    /// Record one iteration. Once aborted, the guard stays aborted.
    pub fn observe(&mut self, old_len: usize, new_len: usize) -> GuardState {
        debug_assert!(new_len <= old_len, "working set grew from {old_len} to {new_len}");
        if self.state == GuardState::Aborted {
            return self.state;
        }

        if new_len < old_len {
            self.stalls = 0;
        } else {
            self.stalls += 1;
            if self.stalls >= self.threshold {
                self.state = GuardState::Aborted;
            }
        }
        self.state
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn stalls(&self) -> usize {
        self.stalls
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for ProgressGuard {
    fn default() -> Self {
        Self::new(DEFAULT_STALL_THRESHOLD)
    }
}
