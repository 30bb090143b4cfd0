use crate::feed::PoseFeed;
use crate::scene::pose::Pose;
use std::collections::VecDeque;

/// Feed replaying a fixed sequence of reads, for tests and debugging.
///
/// Once the script is exhausted every further read reports "no update".
#[derive(Debug, Default, Clone)]
pub struct ScriptedPoseFeed {
    reads: VecDeque<Option<Vec<Pose>>>,
    calls: u64,
}

impl ScriptedPoseFeed {
    /// Feed returning `reads` in order.
    pub fn new(reads: impl IntoIterator<Item = Option<Vec<Pose>>>) -> Self {
        Self {
            reads: reads.into_iter().collect(),
            calls: 0,
        }
    }

    /// Number of `read` calls so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl PoseFeed for ScriptedPoseFeed {
    fn read(&mut self) -> Option<Vec<Pose>> {
        self.calls += 1;
        self.reads.pop_front().flatten()
    }
}
