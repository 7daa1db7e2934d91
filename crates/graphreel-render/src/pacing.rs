//! Presentation timing
//!
//! Pauses only throttle output so a renderer can show one visible change at
//! a time. They carry no coordination meaning, so headless runs use
//! [`NoPacer`].

use async_trait::async_trait;
use graphreel_core::AnimationConfig;
use std::time::Duration;

/// Kind of pause requested by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// After a node or edge appears
    Reveal,
    /// Before the next snapshot is loaded
    Step,
}

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, pause: Pause);
}

/// Sleeps for a fixed duration per pause kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPacer {
    reveal: Duration,
    step: Duration,
}

impl SleepPacer {
    pub fn new(reveal: Duration, step: Duration) -> Self {
        Self { reveal, step }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.reveal_delay(), config.step_delay())
    }

    pub fn duration(&self, pause: Pause) -> Duration {
        match pause {
            Pause::Reveal => self.reveal,
            Pause::Step => self.step,
        }
    }
}

impl Default for SleepPacer {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, pause: Pause) {
        let duration = self.duration(pause);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacer;

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self, _pause: Pause) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let pacer = SleepPacer::default();
        assert_eq!(pacer.duration(Pause::Reveal), Duration::from_millis(500));
        assert_eq!(pacer.duration(Pause::Step), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_pacer_waits() {
        let pacer = SleepPacer::new(Duration::from_millis(500), Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        pacer.pause(Pause::Reveal).await;
        pacer.pause(Pause::Step).await;

        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
