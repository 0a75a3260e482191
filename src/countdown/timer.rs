//! Per-session countdown timer.
//!
//! [`Countdown`] is the pure state machine; [`CountdownHandle`] drives it once per
//! second on a Tokio task and owns that task. Dropping the handle stops the timer in
//! whatever state it is in.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running, with the seconds left after this tick.
    Running(i64),
    /// This tick ran the clock out. Happens exactly once.
    Expired,
    /// Already expired; nothing happened.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: i64,
    state: CountdownState,
}

impl Countdown {
    /// A countdown from `initial` seconds. Zero or less starts out Expired.
    pub fn new(initial: i64) -> Self {
        let state = if initial <= 0 {
            CountdownState::Expired
        } else {
            CountdownState::Running
        };
        Self {
            remaining: initial,
            state,
        }
    }

    pub fn remaining(&self) -> i64 {
        self.remaining.max(0)
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn tick(&mut self) -> Tick {
        if self.state == CountdownState::Expired {
            return Tick::Idle;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            self.state = CountdownState::Expired;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}

/// Owner of a running countdown task.
///
/// `on_time_update` receives the seconds left after every tick, the final `0` included.
/// `on_timeout` runs exactly once, right after the tick that reaches zero, or straight
/// away if the countdown was started at zero or below.
pub struct CountdownHandle {
    task: JoinHandle<()>,
    joined: bool,
    remaining: watch::Receiver<i64>,
}

impl CountdownHandle {
    pub fn spawn_with_updates<U, T>(initial: i64, mut on_time_update: U, on_timeout: T) -> Self
    where
        U: FnMut(i64) + Send + 'static,
        T: FnOnce() + Send + 'static,
    {
        let mut countdown = Countdown::new(initial);
        let (tx, remaining) = watch::channel(countdown.remaining());

        let task = tokio::spawn(async move {
            if countdown.state() == CountdownState::Expired {
                debug!(initial, "Countdown started expired");
                on_timeout();
                return;
            }

            let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                ticker.tick().await;
                match countdown.tick() {
                    Tick::Running(left) => {
                        let _ = tx.send(left);
                        on_time_update(left);
                    }
                    Tick::Expired => {
                        let _ = tx.send(0);
                        on_time_update(0);
                        debug!(initial, "Countdown expired");
                        on_timeout();
                        break;
                    }
                    Tick::Idle => break,
                }
            }
        });

        Self {
            task,
            joined: false,
            remaining,
        }
    }

    pub fn remaining(&self) -> i64 {
        *self.remaining.borrow()
    }

    /// Waits for the countdown to run out or be cancelled. Returns immediately once it
    /// has been waited for.
    pub async fn finished(&mut self) {
        if self.joined {
            return;
        }
        let _ = (&mut self.task).await;
        self.joined = true;
    }

    /// Stops the timer. `on_timeout` will not run if it has not already.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
