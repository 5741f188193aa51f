// Event shims: compiled away entirely without the `trace` feature.

macro_rules! trace_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        {
            tracing::debug!($($arg)*);
        }
    };
}
