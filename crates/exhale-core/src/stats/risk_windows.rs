//! High-risk window analysis.
//!
//! Buckets craving events by hour of day to find when urges cluster. A
//! point-in-time snapshot recomputed on each request; holds no state of its
//! own.

use chrono::{TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::events::CravingEvent;

/// Labeled part of day for an hour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    LateMorning,
    Afternoon,
    EarlyEvening,
    Evening,
    LateNight,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=9 => TimeOfDay::Morning,
            10..=12 => TimeOfDay::LateMorning,
            13..=15 => TimeOfDay::Afternoon,
            16..=18 => TimeOfDay::EarlyEvening,
            19..=22 => TimeOfDay::Evening,
            _ => TimeOfDay::LateNight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::LateMorning => "late morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::EarlyEvening => "early evening",
            TimeOfDay::Evening => "evening",
            TimeOfDay::LateNight => "late night",
        }
    }
}

/// One hour-of-day bucket with elevated craving frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWindow {
    /// Hour of day (0-23).
    pub hour: u32,
    pub craving_count: usize,
    pub time_of_day: TimeOfDay,
}

/// High-risk window analyzer.
#[derive(Debug, Clone)]
pub struct RiskWindowAnalyzer {
    /// Minimum cravings in a window before it is forwarded to scheduling.
    pub schedule_threshold: usize,
    /// How many top hours to report.
    pub top_n: usize,
}

impl Default for RiskWindowAnalyzer {
    fn default() -> Self {
        Self {
            schedule_threshold: 3,
            top_n: 3,
        }
    }
}

impl RiskWindowAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 24-bucket histogram of cravings by hour of day in `tz`.
    pub fn histogram<Tz: TimeZone>(&self, events: &[CravingEvent], tz: &Tz) -> [usize; 24] {
        let mut buckets = [0usize; 24];
        for event in events {
            let hour = event.timestamp.with_timezone(tz).hour() as usize;
            buckets[hour] += 1;
        }
        buckets
    }

    /// The top hours by craving count, descending; zero-count hours are
    /// excluded and ties keep ascending hour order.
    pub fn analyze<Tz: TimeZone>(&self, events: &[CravingEvent], tz: &Tz) -> Vec<RiskWindow> {
        let buckets = self.histogram(events, tz);
        let mut windows: Vec<RiskWindow> = buckets
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(hour, &count)| RiskWindow {
                hour: hour as u32,
                craving_count: count,
                time_of_day: TimeOfDay::from_hour(hour as u32),
            })
            .collect();
        // Stable sort: equal counts stay in ascending hour order.
        windows.sort_by(|a, b| b.craving_count.cmp(&a.craving_count));
        windows.truncate(self.top_n);
        windows
    }

    /// The subset of [`analyze`](Self::analyze) output that crosses the
    /// scheduling threshold.
    pub fn schedulable<Tz: TimeZone>(&self, events: &[CravingEvent], tz: &Tz) -> Vec<RiskWindow> {
        self.analyze(events, tz)
            .into_iter()
            .filter(|w| w.craving_count >= self.schedule_threshold)
            .collect()
    }
}
