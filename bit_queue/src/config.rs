//! Runtime knobs for a [`BitQueue`](crate::BitQueue).

/// When the cursors snap back to zero.
///
/// Cursors only ever grow, so a queue that is never drained to empty walks off
/// the end of its store. Draining resets them to `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compaction {
    /// Only `dequeue_bit` resets the cursors when it takes the last bit.
    /// A `dequeue_run` that empties the queue leaves them where they are.
    #[default]
    SingleBit,
    /// Any dequeue that empties the queue resets the cursors.
    OnDrain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueConfig {
    pub compaction: Compaction,
}

impl QueueConfig {
    pub const fn new() -> Self {
        Self {
            compaction: Compaction::SingleBit,
        }
    }

    pub const fn with_compaction(mut self, compaction: Compaction) -> Self {
        self.compaction = compaction;
        self
    }
}
