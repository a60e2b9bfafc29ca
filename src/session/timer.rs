use std::time::{Duration, Instant};

use crate::constants::TICK_PERIOD;

/// Periodic source installed by [`SessionTimer::start`].
#[derive(Debug, Clone, Copy)]
struct TickSource {
    next_due: Instant,
}

/// Counts whole seconds of an active call.
///
/// The timer never owns a thread. The host loop feeds it the current instant
/// through [`SessionTimer::advance`] on every idle poll, and the timer works
/// out how many periods have elapsed since it last fired. At most one tick
/// source exists at a time.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    period: Duration,
    source: Option<TickSource>,
    elapsed: u64,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl SessionTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            source: None,
            elapsed: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.source.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed
    }

    /// Install the tick source. Returns `false` when one is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.source.is_some() {
            return false;
        }
        self.source = Some(TickSource {
            next_due: now + self.period,
        });
        true
    }

    /// Drop the tick source and zero the elapsed duration.
    pub fn stop(&mut self) {
        self.source = None;
        self.elapsed = 0;
    }

    /// Apply a single tick. Ticks arriving after [`stop`](Self::stop) are
    /// ignored.
    pub fn tick(&mut self) -> bool {
        if self.source.is_none() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    /// Apply every period that has fully elapsed up to `now` and return how
    /// many ticks fired.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let Some(source) = self.source.as_mut() else {
            return 0;
        };
        if now < source.next_due {
            return 0;
        }
        let behind = now.duration_since(source.next_due);
        let periods = behind.as_nanos() / self.period.as_nanos() + 1;
        let periods = u32::try_from(periods).unwrap_or(u32::MAX);
        source.next_due += self.period.saturating_mul(periods);
        self.elapsed = self.elapsed.saturating_add(u64::from(periods));
        periods
    }
}

/// Render a duration as `H:MM:SS` once an hour has passed, `M:SS` before.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
