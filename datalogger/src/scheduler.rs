/// Fixed-interval readiness check over unix-second timestamps.
///
/// `tick` reports whether the bound action is due and, when it is,
/// advances `last_run` to `now`; the schedule moves on whether or not
/// the caller's action then succeeds. Intervals are measured from the
/// last actual run, so a consistently slow action stretches the
/// effective period.
#[derive(Debug)]
pub struct Schedule {
    interval: i64,
    last_run: i64,
}

impl Schedule {
    /// `run_on_start` backdates `last_run` by one interval so the first
    /// tick fires immediately.
    pub fn new(interval_secs: i64, run_on_start: bool, now: i64) -> Self {
        let last_run = if run_on_start {
            now - interval_secs
        } else {
            now
        };
        Self {
            interval: interval_secs,
            last_run,
        }
    }

    pub fn tick(&mut self, now: i64) -> bool {
        if now - self.last_run >= self.interval {
            self.last_run = now;
            true
        } else {
            false
        }
    }
}
