//! Time sources for timing host objects.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

lazy_static! {
    static ref MONOTONIC_ORIGIN: Instant = Instant::now();
}

/// Fractional milliseconds on the monotonic clock since the first clock read
/// of the process. Never decreases and ignores wall-clock adjustments.
pub fn monotonic_now_ms() -> f64 {
    MONOTONIC_ORIGIN.elapsed().as_secs_f64() * 1_000.0
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn epoch_now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_decreases() {
        let mut last = monotonic_now_ms();
        for _ in 0..10_000 {
            let now = monotonic_now_ms();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_epoch_is_after_2020() {
        assert!(epoch_now_ms() > 1_577_836_800_000);
    }
}
