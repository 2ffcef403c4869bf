use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::service::QuestionKey;

/// One countdown period elapsed for the timer started with `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub generation: u64,
    pub key: QuestionKey,
}

pub type TickReceiver = mpsc::UnboundedReceiver<TimerTick>;

/// Periodic countdown task for a single question.
///
/// The task is aborted when the handle is dropped, so replacing the handle is
/// enough to guarantee the previous question's timer never fires again.
#[derive(Debug)]
pub struct QuestionTimer {
    generation: u64,
    key: QuestionKey,
    handle: JoinHandle<()>,
}

impl QuestionTimer {
    /// Spawn the countdown on the current tokio runtime.
    ///
    /// The first tick arrives one full `period` after start.
    #[must_use]
    pub fn start(
        generation: u64,
        key: QuestionKey,
        period: Duration,
        ticks: mpsc::UnboundedSender<TimerTick>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(TimerTick { generation, key }).is_err() {
                    break;
                }
            }
        });
        tracing::trace!(generation, ?key, "question timer started");
        Self {
            generation,
            key,
            handle,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn key(&self) -> QuestionKey {
        self.key
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::trace!(generation = self.generation, "question timer stopped");
    }
}
