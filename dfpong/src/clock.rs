//! Millisecond time source.
//!
//! All timers in the firmware compare a 32-bit millisecond counter that wraps after about 49.7 days. Elapsed
//! time is always computed as `now.wrapping_sub(then)`, which stays correct across the wrap as long as the
//! compared interval is shorter than the counter range.
use embassy_time::Instant;

/// Monotonic millisecond counter
pub trait Clock {
    /// Current time in milliseconds, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping 32-bit counter
        Instant::now().as_millis() as u32
    }
}

/// Milliseconds between `since` and `now`, modulo 2^32
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Whether at least `interval` milliseconds passed between `since` and `now`
#[inline]
pub fn interval_elapsed(now: u32, since: u32, interval: u32) -> bool {
    elapsed_ms(now, since) >= interval
}
