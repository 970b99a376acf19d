//! Countdown to the event start

use chrono::{DateTime, Utc};

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownParts {
    /// Labelled, zero-padded cells in display order
    pub fn cells(&self) -> [(String, &'static str); 4] {
        [
            (format!("{:02}", self.days), "Days"),
            (format!("{:02}", self.hours), "Hours"),
            (format!("{:02}", self.minutes), "Minutes"),
            (format!("{:02}", self.seconds), "Seconds"),
        ]
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Counts down to a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub target: DateTime<Utc>,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    /// Time left at `now`, all zeros once the target has passed
    pub fn remaining_at(&self, now: DateTime<Utc>) -> CountdownParts {
        let distance = self.target.signed_duration_since(now);
        if distance.num_milliseconds() < 0 {
            return CountdownParts::default();
        }
        let total = distance.num_seconds();
        CountdownParts {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn remaining(&self) -> CountdownParts {
        self.remaining_at(Utc::now())
    }

    pub fn has_started_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.target
    }
}
