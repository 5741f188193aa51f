//! # bit_queue
//!
//! A `no_std` compatible FIFO of bits over a caller-supplied byte buffer.
//!
//! Bits go in and come out MSB-first, either one at a time or as runs of any
//! length that need not start or end on a byte boundary. Runs whose cursor
//! happens to sit on a byte boundary are copied a byte at a time.
//!
//! ```rust
//! use bit_queue::BitQueue;
//! use irq_mask::NoMask;
//!
//! let mut storage = [0u8; 16];
//! let queue = BitQueue::new(&mut storage, 128, NoMask::new()).expect("buffer fits");
//!
//! queue.enqueue_bit(true).unwrap();
//! queue.enqueue_run(&[0x39, 0x62, 0x5e, 0x99], 31).unwrap();
//! assert_eq!(queue.occupancy(), 32);
//!
//! assert_eq!(queue.dequeue_bit(), Some(true));
//! let mut out = [0u8; 4];
//! assert_eq!(queue.dequeue_run(&mut out, 31), 31);
//! assert_eq!(out, [0x39, 0x62, 0x5e, 0x98]);
//! ```
//!
//! ## Sharing with an interrupt handler
//!
//! Every operation takes `&self` and runs inside the queue's
//! [`InterruptMask`](irq_mask::InterruptMask). With a mask that is `Sync`
//! the queue itself is `Sync` and can be fed from another context:
//!
//! ```rust
//! use bit_queue::BitQueue;
//! use irq_mask::SpinMask;
//!
//! static MASK: SpinMask = SpinMask::new();
//!
//! let mut storage = [0u8; 4];
//! let queue = BitQueue::new(&mut storage, 32, &MASK).expect("buffer fits");
//! std::thread::scope(|scope| {
//!     scope.spawn(|| queue.enqueue_run(&[0xA0], 3).unwrap());
//! });
//! assert_eq!(queue.occupancy(), 3);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[macro_use]
mod trace;

pub mod bit_ops;
pub mod config;
pub mod cursor;
pub mod error;
pub mod queue;

pub use config::{Compaction, QueueConfig};
pub use cursor::BitIndex;
pub use error::BitQueueError;
pub use queue::{BitQueue, Cursors, Drain};
