//! Configuration handling for the portal

use crate::state::{StatCounter, StatCounters};
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_EVENT_NAME: &str = "Mozilla Firefox Club Event";
const DEFAULT_SUBMIT_LATENCY_MS: u64 = 2000;
const DEFAULT_RESET_DELAY_MS: u64 = 3000;

/// One statistic shown on the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatConfig {
    pub label: String,
    pub target: u64,
}

/// User configuration for the portal. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Event title shown on the overview and splash
    pub event_name: Option<String>,
    /// Event start in local time, e.g. "2026-03-15T10:00:00"
    pub event_date: Option<NaiveDateTime>,
    /// Simulated submission latency in milliseconds
    pub submit_latency_ms: Option<u64>,
    /// How long the success dialog stays before the form resets
    pub reset_delay_ms: Option<u64>,
    /// Counters on the overview page
    pub stats: Option<Vec<StatConfig>>,
}

impl PortalConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "eventportal", "event-portal")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: PortalConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn event_name(&self) -> &str {
        self.event_name.as_deref().unwrap_or(DEFAULT_EVENT_NAME)
    }

    /// Event start as a UTC instant, reading the configured time as local
    pub fn event_start(&self) -> DateTime<Utc> {
        let naive = self.event_date.unwrap_or_else(default_event_date);
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms.unwrap_or(DEFAULT_SUBMIT_LATENCY_MS))
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms.unwrap_or(DEFAULT_RESET_DELAY_MS))
    }

    pub fn stat_counters(&self) -> StatCounters {
        let counters = match &self.stats {
            Some(stats) => stats
                .iter()
                .map(|s| StatCounter::new(&s.label, s.target))
                .collect(),
            None => vec![
                StatCounter::new("Participants", 500),
                StatCounter::new("Workshops", 12),
                StatCounter::new("Speakers", 8),
                StatCounter::new("Hours of Hacking", 24),
            ],
        };
        StatCounters::new(counters)
    }
}

fn default_event_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 15)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap_or_default()
}
