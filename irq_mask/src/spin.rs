//! A spin-flag mask for targets where several cores share a queue.

use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::InterruptMask;

/// Mutual exclusion through a single atomic flag.
///
/// Not reentrant: entering it again from an interrupt that preempted a holder
/// on the same core spins forever. Pair it with interrupt masking on each core
/// when interrupt handlers are among the users.
#[derive(Debug, Default)]
pub struct SpinMask {
    locked: AtomicBool,
}

impl SpinMask {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Whether some context currently holds the mask.
    pub fn is_held(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

unsafe impl InterruptMask for SpinMask {
    type Restore = ();

    fn enter(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                spin_loop();
            }
        }
    }

    unsafe fn leave(&self, _restore: ()) {
        self.locked.store(false, Ordering::Release);
    }
}
