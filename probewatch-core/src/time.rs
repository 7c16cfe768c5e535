//! Wrapping millisecond timestamps
//!
//! Timestamps are `u32` milliseconds since boot and wrap after ~49 days.
//! Every interval check goes through these helpers.

/// Milliseconds elapsed from `since` to `now`, across wraparound
#[inline]
pub fn elapsed(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

/// True once at least `interval_ms` has passed since `since_ms`
#[inline]
pub fn interval_elapsed(now_ms: u32, since_ms: u32, interval_ms: u32) -> bool {
    elapsed(now_ms, since_ms) >= interval_ms
}
