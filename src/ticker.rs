use std::time::{Duration, Instant};

/// Event poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Countdown resolution in milliseconds
pub const TIMER_PERIOD_MS: u64 = 1000;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Repeating one-second tick source.
///
/// A `Ticker` only exists inside the running timer state, so leaving that
/// state drops it and no stale tick can fire afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// Start a one-second ticker; the first tick is due one period after `now`
    pub fn start(now: Instant) -> Self {
        Self::with_period(now, Duration::from_millis(TIMER_PERIOD_MS))
    }

    pub fn with_period(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Count the ticks that became due up to `now` and advance past them.
    /// A slow frame yields several ticks at once instead of drifting.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while now >= self.next_due {
            fired += 1;
            self.next_due += self.period;
        }
        fired
    }
}

/// One-shot action scheduled for later. Not cancellable; callers drop it
/// if they no longer care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    due: Instant,
    action: T,
}

impl<T> Deferred<T> {
    pub fn after(now: Instant, delay: Duration, action: T) -> Self {
        Self {
            due: now + delay,
            action,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn into_action(self) -> T {
        self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_ticker_fires_once_per_second() {
        let start = Instant::now();
        let mut ticker = Ticker::start(start);

        assert_eq!(ticker.poll(start), 0);
        assert_eq!(ticker.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(ticker.poll(start + Duration::from_secs(1)), 1);
        // Already consumed
        assert_eq!(ticker.poll(start + Duration::from_millis(1500)), 0);
    }

    #[test]
    fn test_ticker_catches_up_without_drift() {
        let start = Instant::now();
        let mut ticker = Ticker::start(start);

        assert_eq!(ticker.poll(start + Duration::from_millis(3200)), 3);
        assert_eq!(ticker.poll(start + Duration::from_millis(4000)), 1);
    }

    #[test]
    fn test_deferred_is_due() {
        let start = Instant::now();
        let deferred = Deferred::after(start, Duration::from_millis(300), 4usize);

        assert!(!deferred.is_due(start + Duration::from_millis(299)));
        assert!(deferred.is_due(start + Duration::from_millis(300)));
        assert_eq!(deferred.into_action(), 4);
    }
}
