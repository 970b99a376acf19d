//! Animated statistic counters on the overview page

use std::time::{Duration, Instant};

/// Number of increments from zero to the target
const STEPS: u32 = 50;
/// Total animation time
const DURATION: Duration = Duration::from_millis(2000);

/// A number that counts up from zero the first time it is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCounter {
    pub label: String,
    pub target: u64,
    started_at: Option<Instant>,
}

impl StatCounter {
    pub fn new(label: &str, target: u64) -> Self {
        Self {
            label: label.to_string(),
            target,
            started_at: None,
        }
    }

    /// Begin animating. Only the first call has an effect.
    pub fn start(&mut self, now: Instant) {
        self.started_at.get_or_insert(now);
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Value to display at `now`: whole increments of `target / 50`
    /// every 40ms, landing exactly on the target at the end
    pub fn value_at(&self, now: Instant) -> u64 {
        let Some(start) = self.started_at else {
            return 0;
        };
        let step_time = DURATION / STEPS;
        let ticks = now.saturating_duration_since(start).as_millis() / step_time.as_millis();
        if ticks >= STEPS as u128 {
            return self.target;
        }
        let current = self.target as f64 * ticks as f64 / STEPS as f64;
        current.floor() as u64
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_duration_since(start) < DURATION)
    }
}

/// All counters shown together
#[derive(Debug, Clone, Default)]
pub struct StatCounters {
    pub counters: Vec<StatCounter>,
}

impl StatCounters {
    pub fn new(counters: Vec<StatCounter>) -> Self {
        Self { counters }
    }

    /// Start every counter; called when the overview first becomes visible
    pub fn reveal(&mut self, now: Instant) {
        for counter in &mut self.counters {
            counter.start(now);
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.counters.iter().any(|c| c.is_animating(now))
    }
}
