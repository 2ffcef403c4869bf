use std::time::Duration;

/// Seconds each question gets unless configured otherwise.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// Timing knobs for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit_secs: u32,
    tick_period: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            tick_period: Duration::from_secs(1),
        }
    }
}

impl QuizSettings {
    /// A zero time limit or period is raised to the smallest usable value.
    #[must_use]
    pub fn new(time_limit_secs: u32, tick_period: Duration) -> Self {
        Self {
            time_limit_secs: time_limit_secs.max(1),
            tick_period: tick_period.max(Duration::from_millis(1)),
        }
    }

    #[must_use]
    pub fn with_time_limit_secs(self, time_limit_secs: u32) -> Self {
        Self::new(time_limit_secs, self.tick_period)
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }
}
