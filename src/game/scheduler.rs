use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Cancellable periodic timer driving the game loop
///
/// A stopped ticker never fires, so `tick()` can sit in a `tokio::select!`
/// arm whether or not a game is running.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    timer: Option<Interval>,
}

impl Ticker {
    /// Create a stopped ticker
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// (Re)start the timer; the first tick fires one full period from now
    pub fn start(&mut self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    /// Change the period; a running timer restarts at the new rate
    pub fn reschedule(&mut self, period: Duration) {
        self.period = period;
        if self.is_running() {
            self.start();
        }
    }

    /// Wait for the next tick, forever if the ticker is stopped
    pub async fn tick(&mut self) -> Instant {
        match self.timer.as_mut() {
            Some(timer) => timer.tick().await,
            None => std::future::pending().await,
        }
    }
}
