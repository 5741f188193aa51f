//! Packs variable-length frame fields into a bit queue and parses them back out.
//!
//! Run with `RUST_LOG=bit_queue=trace` to watch the queue's events.

use bit_queue::{BitQueue, BitQueueError, Compaction, QueueConfig};
use irq_mask::SpinMask;
use tracing_subscriber::EnvFilter;

/// 3-bit frame kind, 5-bit length, then `length` 7-bit characters.
struct Frame<'s> {
    kind: u8,
    text: &'s str,
}

/// Left-aligns the low `width` bits of `value` for `enqueue_run`.
fn field(value: u32, width: usize) -> [u8; 4] {
    (value << (32 - width)).to_be_bytes()
}

fn read_field(queue: &BitQueue<'_, &SpinMask>, width: usize) -> Option<u32> {
    let mut raw = [0u8; 4];
    if queue.dequeue_run(&mut raw, width) < width {
        return None;
    }
    Some(u32::from_be_bytes(raw) >> (32 - width))
}

fn send(queue: &BitQueue<'_, &SpinMask>, frame: &Frame<'_>) -> Result<(), BitQueueError> {
    queue.enqueue_run(&field(frame.kind as u32, 3), 3)?;
    queue.enqueue_run(&field(frame.text.len() as u32, 5), 5)?;
    for ch in frame.text.bytes() {
        queue.enqueue_run(&field(ch as u32 & 0x7F, 7), 7)?;
    }
    Ok(())
}

fn receive(queue: &BitQueue<'_, &SpinMask>) -> Option<(u8, String)> {
    let kind = read_field(queue, 3)? as u8;
    let len = read_field(queue, 5)? as usize;
    let mut text = String::with_capacity(len);
    for _ in 0..len {
        text.push(read_field(queue, 7)? as u8 as char);
    }
    Some((kind, text))
}

fn main() -> Result<(), BitQueueError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bit Queue Framing ===\n");

    static MASK: SpinMask = SpinMask::new();
    let mut storage = [0u8; 64];
    let config = QueueConfig::new().with_compaction(Compaction::OnDrain);
    let queue = BitQueue::with_config(&mut storage, 512, &MASK, config)?;

    let frames = [
        Frame { kind: 1, text: "HELLO" },
        Frame { kind: 5, text: "AX25" },
        Frame { kind: 2, text: "bits, not bytes" },
    ];

    for frame in &frames {
        send(&queue, frame)?;
        println!(
            "  queued kind {} \"{}\": {} bits waiting",
            frame.kind,
            frame.text,
            queue.occupancy()
        );
    }
    println!();

    while let Some((kind, text)) = receive(&queue) {
        println!("  received kind {kind} \"{text}\"");
    }

    let cursors = queue.cursors();
    println!(
        "\n  drained: start {}, end {}",
        cursors.start, cursors.end
    );

    Ok(())
}
