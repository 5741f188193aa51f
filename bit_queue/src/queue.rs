//! The bit queue: a bounded FIFO of bits over caller-owned byte storage.
//!
//! # Examples
//!
//! ## Single bits
//!
//! ```rust
//! use bit_queue::BitQueue;
//! use irq_mask::NoMask;
//!
//! let mut storage = [0u8; 2];
//! let queue = BitQueue::new(&mut storage, 16, NoMask::new()).expect("buffer fits");
//!
//! queue.enqueue_bit(true).unwrap();
//! queue.enqueue_bit(false).unwrap();
//! assert_eq!(queue.peek_bit(1), Some(false));
//! assert_eq!(queue.dequeue_bit(), Some(true));
//! assert_eq!(queue.occupancy(), 1);
//! ```
//!
//! ## Runs
//!
//! ```rust
//! use bit_queue::BitQueue;
//! use irq_mask::NoMask;
//!
//! let mut storage = [0u8; 4];
//! let queue = BitQueue::new(&mut storage, 32, NoMask::new()).expect("buffer fits");
//!
//! // a 3-bit field, then a 7-bit one
//! queue.enqueue_run(&[0b1010_0000], 3).unwrap();
//! queue.enqueue_run(&[0b1111_1110], 7).unwrap();
//!
//! let mut out = [0u8; 2];
//! assert_eq!(queue.dequeue_run(&mut out, 10), 10);
//! assert_eq!(out, [0b1011_1111, 0b1100_0000]);
//! ```
//!
use core::cell::UnsafeCell;
use core::fmt;

use bytemuck::Pod;
use irq_mask::{InterruptMask, MaskGuard, NoMask};

use crate::BitQueueError;
use crate::bit_ops::{self, bytes_for};
use crate::config::{Compaction, QueueConfig};

type Result<T> = core::result::Result<T, BitQueueError>;

/// Both cursors, read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursors {
    /// Absolute bit position of the oldest queued bit.
    pub start: usize,
    /// Absolute bit position of the next free slot.
    pub end: usize,
}

struct State<'a> {
    store: &'a mut [u8],
    start: usize,
    end: usize,
}

impl State<'_> {
    #[inline]
    fn occupancy(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn store_bits(&self) -> usize {
        self.store.len() * 8
    }

    fn check_room(&self, capacity_bits: usize, count: usize) -> Result<()> {
        let free = capacity_bits - self.occupancy();
        if count > free {
            debug_event!(requested = count, free, "enqueue rejected: queue full");
            return Err(BitQueueError::QueueFull {
                requested: count,
                free,
            });
        }
        if self.end + count > self.store_bits() {
            debug_event!(
                end = self.end,
                requested = count,
                store_bits = self.store_bits(),
                "enqueue rejected: store exhausted"
            );
            return Err(BitQueueError::StoreExhausted {
                end: self.end,
                requested: count,
                store_bits: self.store_bits(),
            });
        }
        Ok(())
    }

    /// Bit position `index` bits past `start`, if it holds queued data.
    #[inline]
    fn position(&self, index: usize) -> Option<usize> {
        self.start.checked_add(index).filter(|&at| at < self.end)
    }

    #[inline]
    fn reset(&mut self) {
        self.start = 0;
        self.end = 0;
    }
}

/// A fixed-capacity FIFO of bits, stored MSB-first.
///
/// The cursors are absolute bit offsets into the backing store and are never
/// wrapped. They snap back to zero only when a dequeue empties the queue (see
/// [`Compaction`]), so producers and consumers must let the queue drain to
/// empty now and then. An enqueue that would run past the end of the store is
/// rejected with [`BitQueueError::StoreExhausted`]. Backing buffers larger than
/// `capacity_bits` give the cursors extra room before that happens.
///
/// Every operation runs inside the injected [`InterruptMask`]. The queue is
/// `Sync` exactly when the mask is, so one built on [`NoMask`] stays in a
/// single execution context.
pub struct BitQueue<'a, M: InterruptMask = NoMask> {
    state: UnsafeCell<State<'a>>,
    capacity_bits: usize,
    config: QueueConfig,
    mask: M,
}

// SAFETY: `state` is only reached through `locked`, which holds `mask` for the
// whole access, and `InterruptMask` implementors promise that no two contexts
// hold the same mask at once.
unsafe impl<M: InterruptMask + Sync> Sync for BitQueue<'_, M> {}

impl<'a, M: InterruptMask> BitQueue<'a, M> {
    /// Binds a queue of `capacity_bits` bits to `buffer` and zero-fills the
    /// first `ceil(capacity_bits / 8)` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_queue::{BitQueue, BitQueueError};
    /// use irq_mask::NoMask;
    ///
    /// let mut small = [0u8; 1];
    /// let err = BitQueue::new(&mut small, 9, NoMask::new()).unwrap_err();
    /// assert!(matches!(err, BitQueueError::InsufficientBytes { capacity_bits: 9, bytes: 1 }));
    /// ```
    pub fn new(buffer: &'a mut [u8], capacity_bits: usize, mask: M) -> Result<Self> {
        Self::with_config(buffer, capacity_bits, mask, QueueConfig::default())
    }

    pub fn with_config(
        buffer: &'a mut [u8],
        capacity_bits: usize,
        mask: M,
        config: QueueConfig,
    ) -> Result<Self> {
        let region = bytes_for(capacity_bits);
        if buffer.len() < region {
            return Err(BitQueueError::InsufficientBytes {
                capacity_bits,
                bytes: buffer.len(),
            });
        }

        let queue = Self {
            state: UnsafeCell::new(State {
                store: buffer,
                start: 0,
                end: 0,
            }),
            capacity_bits,
            config,
            mask,
        };
        queue.locked(|s| {
            s.reset();
            s.store[..region].fill(0);
        });
        trace_event!(capacity_bits, "bit queue initialized");
        Ok(queue)
    }

    /// Backs the queue with a slice of plain words, e.g. a DMA-aligned
    /// `[u32]` buffer. Bits are addressed over the words' bytes in memory order.
    pub fn from_words<W: Pod>(words: &'a mut [W], capacity_bits: usize, mask: M) -> Result<Self> {
        Self::new(bytemuck::cast_slice_mut(words), capacity_bits, mask)
    }

    fn locked<R>(&self, f: impl FnOnce(&mut State<'a>) -> R) -> R {
        let _guard = MaskGuard::enter(&self.mask);
        // SAFETY: the mask is held until `_guard` drops, and `f` cannot reach
        // another operation on this queue.
        let state = unsafe { &mut *self.state.get() };
        f(state)
    }

    pub fn capacity_bits(&self) -> usize {
        self.capacity_bits
    }

    pub fn config(&self) -> QueueConfig {
        self.config
    }

    /// Number of bits currently queued.
    pub fn occupancy(&self) -> usize {
        self.locked(|s| s.occupancy())
    }

    pub fn free_bits(&self) -> usize {
        self.capacity_bits - self.occupancy()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupancy() == self.capacity_bits
    }

    pub fn cursors(&self) -> Cursors {
        self.locked(|s| Cursors {
            start: s.start,
            end: s.end,
        })
    }

    /// Appends the first `count` bits of `bits`, read MSB-first.
    ///
    /// Either all `count` bits are queued or none are.
    pub fn enqueue_run(&self, bits: &[u8], count: usize) -> Result<()> {
        let available = bits.len() * 8;
        if count > available {
            debug_event!(count, available, "enqueue rejected: source too short");
            return Err(BitQueueError::SourceTooShort { count, available });
        }

        let capacity_bits = self.capacity_bits;
        self.locked(|s| {
            s.check_room(capacity_bits, count)?;
            bit_ops::copy_bits(bits, 0, s.store, s.end, count);
            s.end += count;
            trace_event!(count, end = s.end, "enqueued run");
            Ok(())
        })
    }

    /// Moves up to `count` bits into `dest`, MSB-first from its first bit.
    ///
    /// Returns how many bits were moved: the smallest of `count`, the
    /// occupancy, and what `dest` can hold. Bits of `dest` past that are left
    /// as they were.
    pub fn dequeue_run(&self, dest: &mut [u8], count: usize) -> usize {
        let compaction = self.config.compaction;
        self.locked(|s| {
            let taken = count.min(s.occupancy()).min(dest.len() * 8);
            bit_ops::copy_bits(&*s.store, s.start, dest, 0, taken);
            s.start += taken;
            trace_event!(taken, start = s.start, "dequeued run");

            if taken > 0 && s.occupancy() == 0 && compaction == Compaction::OnDrain {
                s.reset();
                trace_event!("queue drained, cursors reset");
            }
            taken
        })
    }

    /// Copies up to `count` bits starting `index` bits past the oldest one,
    /// leaving the queue untouched. Returns 0 when `index` is past the data.
    pub fn peek_run(&self, dest: &mut [u8], count: usize, index: usize) -> usize {
        self.locked(|s| {
            let Some(at) = s.position(index) else {
                return 0;
            };
            let read = count.min(s.end - at).min(dest.len() * 8);
            bit_ops::copy_bits(&*s.store, at, dest, 0, read);
            read
        })
    }

    pub fn enqueue_bit(&self, bit: bool) -> Result<()> {
        let capacity_bits = self.capacity_bits;
        self.locked(|s| {
            s.check_room(capacity_bits, 1)?;
            bit_ops::set_bit(s.store, s.end, bit);
            s.end += 1;
            Ok(())
        })
    }

    /// The bit `index` positions past the oldest one, without removing it.
    pub fn peek_bit(&self, index: usize) -> Option<bool> {
        self.locked(|s| s.position(index).map(|at| bit_ops::get_bit(&*s.store, at)))
    }

    /// Removes the oldest bit. Taking the last bit resets both cursors to zero.
    pub fn dequeue_bit(&self) -> Option<bool> {
        self.locked(|s| {
            let at = s.position(0)?;
            let bit = bit_ops::get_bit(&*s.store, at);
            s.start += 1;
            if s.occupancy() == 0 {
                s.reset();
                trace_event!("queue drained, cursors reset");
            }
            Some(bit)
        })
    }

    /// Drops every queued bit and resets the cursors. The store is not re-zeroed.
    pub fn clear(&self) {
        self.locked(|s| s.reset());
    }

    /// Dequeues bits one at a time until the queue is empty.
    pub fn drain(&self) -> Drain<'_, 'a, M> {
        Drain { queue: self }
    }

    /// Ends the queue and hands the backing store back.
    pub fn into_inner(self) -> &'a mut [u8] {
        self.state.into_inner().store
    }
}

impl<M: InterruptMask> fmt::Debug for BitQueue<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cursors = self.cursors();
        f.debug_struct("BitQueue")
            .field("capacity_bits", &self.capacity_bits)
            .field("start", &cursors.start)
            .field("end", &cursors.end)
            .field("config", &self.config)
            .finish()
    }
}

pub struct Drain<'q, 'a, M: InterruptMask> {
    queue: &'q BitQueue<'a, M>,
}

impl<M: InterruptMask> Iterator for Drain<'_, '_, M> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.queue.dequeue_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.occupancy(), None)
    }
}
