use std::time::Duration;

/// Fixed-period timer driven by an injected monotonic clock.
///
/// `advance` reports how many whole periods elapsed since the last firing, so
/// a slow frame catches up instead of silently stretching the period.
#[derive(Debug)]
pub struct IntervalTimer {
    period: Duration,
    last: Option<Duration>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Advance the clock to `now` and return the number of periods due.
    ///
    /// The first call establishes the baseline and never fires. A zero period
    /// never fires. `now` values that move backwards are ignored.
    pub fn advance(&mut self, now: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };
        let Some(elapsed) = now.checked_sub(last) else {
            return 0;
        };
        let fires = (elapsed.as_nanos() / self.period.as_nanos()).min(u128::from(u32::MAX)) as u32;
        if fires > 0 {
            self.last = Some(last + self.period * fires);
        }
        fires
    }

    /// Forget the baseline; the next `advance` re-establishes it.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Coalesce bursts of events into one, cancel-on-new-event semantics.
///
/// Every `poke` replaces the pending value and re-arms the quiet-period
/// deadline; `fire` yields the value once the burst has gone quiet.
#[derive(Debug)]
pub struct Debounce<T> {
    quiet: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn poke(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn fire(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
