use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Default period between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A single cancellable periodic task.
///
/// `start` always aborts the previous task first, so at most one ticker is
/// alive. Each run gets a fresh epoch; callbacks should ignore firings whose
/// epoch no longer matches `epoch()`.
#[derive(Debug)]
pub struct SessionTimer {
    period: Duration,
    handle: Option<JoinHandle<()>>,
    epoch: u64,
}

impl SessionTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn the ticker on the current Tokio runtime.
    ///
    /// The first firing happens one period after the call. `on_tick` receives
    /// the epoch of this run and returns `false` to end the task.
    pub fn start<F>(&mut self, on_tick: F)
    where
        F: Fn(u64) -> bool + Send + 'static,
    {
        self.stop();
        self.epoch = self.epoch.wrapping_add(1);
        let epoch = self.epoch;
        let period = self.period;

        debug!(epoch, "session timer started");
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick(epoch) {
                    break;
                }
            }
        }));
    }

    /// Abort the running task. Returns `true` if one was live.
    pub fn stop(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        // Bumping the epoch invalidates a firing that is already past its await point.
        self.epoch = self.epoch.wrapping_add(1);
        let was_live = !handle.is_finished();
        handle.abort();
        if was_live {
            debug!(epoch = self.epoch, "session timer stopped");
        }
        was_live
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
