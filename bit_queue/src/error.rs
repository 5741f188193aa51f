#[cfg(feature = "std")]
use thiserror::Error;

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitQueueError {
    #[cfg_attr(
        feature = "std",
        error("queue full: {requested} bits requested, {free} bits free")
    )]
    QueueFull { requested: usize, free: usize },

    #[cfg_attr(
        feature = "std",
        error("store exhausted: cursor at bit {end} cannot take {requested} more bits of a {store_bits}-bit store")
    )]
    StoreExhausted {
        end: usize,
        requested: usize,
        store_bits: usize,
    },

    #[cfg_attr(
        feature = "std",
        error("source holds {available} bits, {count} requested")
    )]
    SourceTooShort { count: usize, available: usize },

    #[cfg_attr(
        feature = "std",
        error("{bytes} bytes cannot hold {capacity_bits} bits")
    )]
    InsufficientBytes { capacity_bits: usize, bytes: usize },
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitQueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitQueueError::QueueFull { requested, free } => {
                write!(f, "queue full: {} bits requested, {} bits free", requested, free)
            }
            BitQueueError::StoreExhausted {
                end,
                requested,
                store_bits,
            } => write!(
                f,
                "store exhausted: cursor at bit {} cannot take {} more bits of a {}-bit store",
                end, requested, store_bits
            ),
            BitQueueError::SourceTooShort { count, available } => {
                write!(f, "source holds {} bits, {} requested", available, count)
            }
            BitQueueError::InsufficientBytes {
                capacity_bits,
                bytes,
            } => write!(f, "{} bytes cannot hold {} bits", bytes, capacity_bits),
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::error::Error for BitQueueError {}
