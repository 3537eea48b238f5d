//! Watchdog abstraction

/// Hardware watchdog timer
///
/// Once armed, the device resets unless [`feed`](Watchdog::feed) is called
/// at least once per timeout window. Arming and disarming are
/// board-specific and stay outside this trait.
pub trait Watchdog {
    /// Restart the timeout window
    fn feed(&mut self);
}

impl<W: Watchdog + ?Sized> Watchdog for &mut W {
    fn feed(&mut self) {
        (**self).feed();
    }
}
