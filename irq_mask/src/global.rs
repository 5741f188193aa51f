//! Global interrupt masking through the `critical-section` crate.
//!
//! The platform (or the `critical-section/std` implementation on a host)
//! decides what "acquire" means: disabling interrupts on a single-core MCU, a
//! global lock on a host.

use critical_section::RestoreState;

use crate::InterruptMask;

/// The system-wide "disable interrupts" / "enable interrupts" pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalMask;

unsafe impl InterruptMask for GlobalMask {
    type Restore = RestoreState;

    #[inline]
    fn enter(&self) -> RestoreState {
        // SAFETY: every `enter` is paired with a `leave` by `MaskGuard`, in
        // reverse order of acquisition.
        unsafe { critical_section::acquire() }
    }

    #[inline]
    unsafe fn leave(&self, restore: RestoreState) {
        unsafe { critical_section::release(restore) }
    }
}
