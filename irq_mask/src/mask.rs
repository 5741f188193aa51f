//! The critical-section trait and its scoped guard.
//!
//! # Examples
//!
//! ```rust
//! use irq_mask::{MaskGuard, NoMask};
//!
//! let mask = NoMask::new();
//! {
//!     let _guard = MaskGuard::enter(&mask);
//!     // touch shared state here
//! }
//! ```

use core::cell::Cell;
use core::marker::PhantomData;

/// An "enter critical section" / "leave critical section" pair.
///
/// `enter` hands back whatever state `leave` needs to restore the previous
/// masking level (saved interrupt flags, nothing at all for a spin flag).
///
/// # Safety
///
/// Implementors promise that while one execution context is between `enter`
/// and the matching `leave`, no other context that shares this mask can be
/// inside its own `enter`/`leave` pair. Types that cannot keep that promise
/// across contexts must not be `Sync`.
pub unsafe trait InterruptMask {
    type Restore;

    fn enter(&self) -> Self::Restore;

    /// # Safety
    ///
    /// `restore` must come from the most recent unmatched `enter` on this mask.
    unsafe fn leave(&self, restore: Self::Restore);
}

unsafe impl<M: InterruptMask + ?Sized> InterruptMask for &M {
    type Restore = M::Restore;

    #[inline]
    fn enter(&self) -> Self::Restore {
        (**self).enter()
    }

    #[inline]
    unsafe fn leave(&self, restore: Self::Restore) {
        unsafe { (**self).leave(restore) }
    }
}

/// Holds a mask entered until dropped.
#[must_use = "the critical section ends as soon as the guard is dropped"]
pub struct MaskGuard<'m, M: InterruptMask + ?Sized> {
    mask: &'m M,
    restore: Option<M::Restore>,
}

impl<'m, M: InterruptMask + ?Sized> MaskGuard<'m, M> {
    #[inline]
    pub fn enter(mask: &'m M) -> Self {
        let restore = mask.enter();
        Self {
            mask,
            restore: Some(restore),
        }
    }
}

impl<M: InterruptMask + ?Sized> Drop for MaskGuard<'_, M> {
    #[inline]
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            // SAFETY: `restore` was produced by the `enter` in `MaskGuard::enter`,
            // and guards borrow the mask so they drop in reverse order of entry.
            unsafe { self.mask.leave(restore) }
        }
    }
}

/// A mask for state that never leaves one execution context.
///
/// Entering and leaving are no-ops. `NoMask` is `!Sync`, so anything guarded
/// only by it cannot be shared with another context in the first place.
#[derive(Debug, Default)]
pub struct NoMask {
    _single_context: PhantomData<Cell<()>>,
}

impl NoMask {
    pub const fn new() -> Self {
        Self {
            _single_context: PhantomData,
        }
    }
}

unsafe impl InterruptMask for NoMask {
    type Restore = ();

    #[inline(always)]
    fn enter(&self) {}

    #[inline(always)]
    unsafe fn leave(&self, _restore: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Depth {
        depth: Cell<usize>,
        entries: Cell<usize>,
    }

    unsafe impl InterruptMask for Depth {
        type Restore = usize;

        fn enter(&self) -> usize {
            let previous = self.depth.get();
            self.depth.set(previous + 1);
            self.entries.set(self.entries.get() + 1);
            previous
        }

        unsafe fn leave(&self, restore: usize) {
            self.depth.set(restore);
        }
    }

    #[test]
    fn guard_leaves_on_drop() {
        let mask = Depth::default();
        {
            let _guard = MaskGuard::enter(&mask);
            assert_eq!(mask.depth.get(), 1);
        }
        assert_eq!(mask.depth.get(), 0);
        assert_eq!(mask.entries.get(), 1);
    }

    #[test]
    fn nested_guards_restore_in_order() {
        let mask = Depth::default();
        let outer = MaskGuard::enter(&mask);
        {
            let _inner = MaskGuard::enter(&mask);
            assert_eq!(mask.depth.get(), 2);
        }
        assert_eq!(mask.depth.get(), 1);
        drop(outer);
        assert_eq!(mask.depth.get(), 0);
    }

    #[test]
    fn guard_leaves_on_unwind() {
        let mask = Depth::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = MaskGuard::enter(&mask);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(mask.depth.get(), 0);
    }

    #[test]
    fn reference_forwards_to_mask() {
        let mask = Depth::default();
        let by_ref = &mask;
        drop(MaskGuard::enter(&by_ref));
        assert_eq!(mask.entries.get(), 1);
        assert_eq!(mask.depth.get(), 0);
    }

    #[test]
    fn no_mask_is_free() {
        let mask = NoMask::new();
        let _guard = MaskGuard::enter(&mask);
        assert_eq!(core::mem::size_of::<NoMask>(), 0);
    }
}
