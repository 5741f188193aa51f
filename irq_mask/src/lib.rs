//! # irq_mask
//!
//! Critical-section collaborators for code shared between normal and interrupt
//! context.
//!
//! ```rust
//! use irq_mask::{MaskGuard, SpinMask};
//!
//! static MASK: SpinMask = SpinMask::new();
//!
//! let guard = MaskGuard::enter(&MASK);
//! assert!(MASK.is_held());
//! drop(guard);
//! assert!(!MASK.is_held());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod mask;
pub mod spin;

#[cfg(feature = "critical-section")]
pub mod global;

pub use mask::{InterruptMask, MaskGuard, NoMask};
pub use spin::SpinMask;

#[cfg(feature = "critical-section")]
pub use global::GlobalMask;
