//! Property-based tests for the bit queue against a `VecDeque<bool>` model.

use std::collections::VecDeque;

use proptest::prelude::*;

use bit_queue::bit_ops::bytes_for;
use bit_queue::{BitQueue, BitQueueError, Compaction, Cursors, QueueConfig};
use irq_mask::NoMask;

fn bit_at(bytes: &[u8], i: usize) -> bool {
    bytes[i / 8] & (0x80 >> (i % 8)) != 0
}

fn bits(bytes: &[u8], count: usize) -> Vec<bool> {
    (0..count).map(|i| bit_at(bytes, i)).collect()
}

#[derive(Debug, Clone)]
enum Op {
    PushBit(bool),
    PushRun(Vec<u8>, usize),
    PopBit,
    PopRun(usize),
    PeekBit(usize),
    PeekRun(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::PushBit),
        prop::collection::vec(any::<u8>(), 0..6)
            .prop_flat_map(|bytes| {
                let max = bytes.len() * 8;
                (Just(bytes), 0..=max)
            })
            .prop_map(|(bytes, count)| Op::PushRun(bytes, count)),
        Just(Op::PopBit),
        (0usize..50).prop_map(Op::PopRun),
        (0usize..64).prop_map(Op::PeekBit),
        (0usize..50, 0usize..64).prop_map(|(count, index)| Op::PeekRun(count, index)),
    ]
}

/// Reference behaviour: the queued bits plus where the cursors should be.
struct Model {
    bits: VecDeque<bool>,
    start: usize,
    end: usize,
    capacity: usize,
    store_bits: usize,
    compaction: Compaction,
}

impl Model {
    fn push(&mut self, run: &[bool]) -> Result<(), BitQueueError> {
        let free = self.capacity - self.bits.len();
        if run.len() > free {
            return Err(BitQueueError::QueueFull {
                requested: run.len(),
                free,
            });
        }
        if self.end + run.len() > self.store_bits {
            return Err(BitQueueError::StoreExhausted {
                end: self.end,
                requested: run.len(),
                store_bits: self.store_bits,
            });
        }
        self.bits.extend(run.iter().copied());
        self.end += run.len();
        Ok(())
    }

    fn pop_bit(&mut self) -> Option<bool> {
        let bit = self.bits.pop_front()?;
        self.start += 1;
        if self.bits.is_empty() {
            self.start = 0;
            self.end = 0;
        }
        Some(bit)
    }

    fn pop_run(&mut self, count: usize) -> Vec<bool> {
        let taken = count.min(self.bits.len());
        let out: Vec<bool> = self.bits.drain(..taken).collect();
        self.start += taken;
        if taken > 0 && self.bits.is_empty() && self.compaction == Compaction::OnDrain {
            self.start = 0;
            self.end = 0;
        }
        out
    }
}

proptest! {
    #[test]
    fn prop_matches_model(
        capacity in 0usize..=64,
        extra_bytes in 0usize..4,
        on_drain in any::<bool>(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let compaction = if on_drain { Compaction::OnDrain } else { Compaction::SingleBit };
        let mut storage = vec![0u8; bytes_for(capacity) + extra_bytes];
        let store_bits = storage.len() * 8;
        let config = QueueConfig::new().with_compaction(compaction);
        let queue = BitQueue::with_config(&mut storage, capacity, NoMask::new(), config).unwrap();

        let mut model = Model {
            bits: VecDeque::new(),
            start: 0,
            end: 0,
            capacity,
            store_bits,
            compaction,
        };

        for op in ops {
            match op {
                Op::PushBit(bit) => {
                    prop_assert_eq!(queue.enqueue_bit(bit), model.push(&[bit]));
                }
                Op::PushRun(bytes, count) => {
                    let run = bits(&bytes, count);
                    prop_assert_eq!(queue.enqueue_run(&bytes, count), model.push(&run));
                }
                Op::PopBit => {
                    prop_assert_eq!(queue.dequeue_bit(), model.pop_bit());
                }
                Op::PopRun(count) => {
                    let mut dest = vec![0u8; bytes_for(count)];
                    let taken = queue.dequeue_run(&mut dest, count);
                    let expected = model.pop_run(count);
                    prop_assert_eq!(taken, expected.len());
                    prop_assert_eq!(bits(&dest, taken), expected);
                }
                Op::PeekBit(index) => {
                    prop_assert_eq!(queue.peek_bit(index), model.bits.get(index).copied());
                }
                Op::PeekRun(count, index) => {
                    let mut dest = vec![0u8; bytes_for(count)];
                    let read = queue.peek_run(&mut dest, count, index);
                    let expected: Vec<bool> =
                        model.bits.iter().skip(index).take(count).copied().collect();
                    prop_assert_eq!(read, expected.len());
                    prop_assert_eq!(bits(&dest, read), expected);
                }
            }

            prop_assert!(queue.occupancy() <= capacity);
            prop_assert_eq!(queue.occupancy(), model.bits.len());
            prop_assert_eq!(queue.cursors(), Cursors { start: model.start, end: model.end });
        }
    }
}

proptest! {
    #[test]
    fn prop_rejected_enqueue_changes_nothing(
        fill in 0usize..=32,
        bytes in prop::collection::vec(any::<u8>(), 1..8),
    ) {
        let mut storage = [0u8; 4];
        let queue = BitQueue::new(&mut storage, 32, NoMask::new()).unwrap();
        queue.enqueue_run(&[0xA5; 4], fill).unwrap();

        let count = bytes.len() * 8;
        let before = queue.cursors();
        let mut snapshot = [0u8; 4];
        let held = queue.peek_run(&mut snapshot, 32, 0);

        if fill + count > 32 {
            prop_assert!(queue.enqueue_run(&bytes, count).is_err());
            prop_assert_eq!(queue.cursors(), before);
            let mut after = [0u8; 4];
            prop_assert_eq!(queue.peek_run(&mut after, 32, 0), held);
            prop_assert_eq!(after, snapshot);
        } else {
            prop_assert!(queue.enqueue_run(&bytes, count).is_ok());
        }
    }
}

proptest! {
    #[test]
    fn prop_aligned_and_misaligned_paths_agree(
        bytes in prop::collection::vec(any::<u8>(), 1..12),
        offset in 1usize..8,
    ) {
        let count = bytes.len() * 8 - offset;

        // aligned: cursor starts on a byte boundary
        let mut aligned_store = [0u8; 16];
        let aligned = BitQueue::new(&mut aligned_store, 128, NoMask::new()).unwrap();
        aligned.enqueue_run(&bytes, count).unwrap();
        let mut aligned_out = [0xFFu8; 12];
        prop_assert_eq!(aligned.dequeue_run(&mut aligned_out, count), count);

        // misaligned: `offset` filler bits shift every cursor off the boundary
        let mut shifted_store = [0u8; 17];
        let shifted = BitQueue::new(&mut shifted_store, 136, NoMask::new()).unwrap();
        shifted.enqueue_run(&[0xFF], offset).unwrap();
        shifted.enqueue_run(&bytes, count).unwrap();
        let mut filler = [0u8; 1];
        prop_assert_eq!(shifted.dequeue_run(&mut filler, offset), offset);
        let mut shifted_out = [0xFFu8; 12];
        prop_assert_eq!(shifted.dequeue_run(&mut shifted_out, count), count);

        prop_assert_eq!(aligned_out, shifted_out);
    }
}

#[test]
fn run_round_trip_every_length_and_alignment() {
    let pattern: Vec<u8> = (0u8..8).map(|i| i.wrapping_mul(0x37) ^ 0x5A).collect();
    let capacity = pattern.len() * 8;

    for offset in 0..8 {
        for count in 1..=capacity {
            let mut storage = vec![0u8; bytes_for(capacity + offset)];
            let queue = BitQueue::new(&mut storage, capacity + offset, NoMask::new()).unwrap();

            // push and pop `offset` bits so both cursors sit at `offset`
            queue.enqueue_run(&[0xFF], offset).unwrap();
            let mut filler = [0u8; 1];
            assert_eq!(queue.dequeue_run(&mut filler, offset), offset);

            queue.enqueue_run(&pattern, count).unwrap();
            let mut out = vec![0u8; pattern.len()];
            assert_eq!(queue.dequeue_run(&mut out, count), count);
            assert_eq!(
                bits(&out, count),
                bits(&pattern, count),
                "offset {offset}, count {count}"
            );
        }
    }
}

#[test]
fn single_bit_drain_resets_cursors() {
    let mut storage = [0u8; 8];
    let queue = BitQueue::new(&mut storage, 64, NoMask::new()).unwrap();
    queue.enqueue_run(&[0xDE, 0xAD, 0xBE], 21).unwrap();

    let mut out = [0u8; 1];
    assert_eq!(queue.dequeue_run(&mut out, 5), 5);
    assert_eq!(queue.cursors(), Cursors { start: 5, end: 21 });

    let drained: Vec<bool> = queue.drain().collect();
    assert_eq!(drained.as_slice(), &bits(&[0xDE, 0xAD, 0xBE], 21)[5..]);
    assert_eq!(queue.cursors(), Cursors { start: 0, end: 0 });
}
