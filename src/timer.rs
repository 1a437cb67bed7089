use crate::models::TimerTick;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns the background task that emits one tick per period. Dropping the timer
/// aborts the task, so no tick is produced after release.
#[derive(Debug)]
pub struct SessionTimer {
    handle: JoinHandle<()>,
}

impl SessionTimer {
    /// Must be called from inside a tokio runtime.
    pub fn spawn(period: Duration, epoch: u64, tx: UnboundedSender<TimerTick>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(TimerTick { epoch }).is_err() {
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
