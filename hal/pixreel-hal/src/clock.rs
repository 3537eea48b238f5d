//! Monotonic time source

/// Monotonic millisecond clock
///
/// Only differences between readings are meaningful. The clock must never go
/// backwards.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin (usually boot)
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since an earlier reading, saturating at `u32::MAX`
    fn elapsed_ms(&self, since_ms: u64) -> u32 {
        let elapsed = self.now_ms().saturating_sub(since_ms);
        u32::try_from(elapsed).unwrap_or(u32::MAX)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
