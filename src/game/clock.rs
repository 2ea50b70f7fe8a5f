use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::debug;

/// Fixed-period tick source for the simulation.
///
/// At most one schedule is live at a time: `start` replaces any previous one
/// and `stop` discards it. `tick` is cancel-safe, so it can sit in a
/// `tokio::select!` next to input handling.
#[derive(Debug)]
pub struct SimulationClock {
    period: Duration,
    next_deadline: Option<Instant>,
    ticks: u64,
}

impl SimulationClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
            ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm the clock. The first tick fires one full period from now.
    pub fn start(&mut self) {
        self.next_deadline = Some(Instant::now() + self.period);
        self.ticks = 0;
        debug!(period_ms = self.period.as_millis() as u64, "clock started");
    }

    /// Disarm the clock. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if self.next_deadline.take().is_some() {
            debug!(ticks = self.ticks, "clock stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Ticks fired since the last `start`
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wait for the next tick. Never resolves while the clock is stopped.
    pub async fn tick(&mut self) {
        let Some(deadline) = self.next_deadline else {
            std::future::pending::<()>().await;
            return;
        };

        time::sleep_until(deadline).await;

        // A late tick does not trigger a burst of catch-up steps.
        let now = Instant::now();
        let next = deadline + self.period;
        self.next_deadline = Some(if next <= now { now + self.period } else { next });
        self.ticks += 1;
    }
}
