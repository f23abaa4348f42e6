use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::timer::TimerState;

/// Craving intensity as reported by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CravingIntensity {
    Low,
    Medium,
    High,
}

// Unknown stored values decode as Medium rather than failing the whole
// collection.
impl<'de> Deserialize<'de> for CravingIntensity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "low" => CravingIntensity::Low,
            "high" => CravingIntensity::High,
            _ => CravingIntensity::Medium,
        })
    }
}

/// A logged instance of actually smoking.
///
/// Immutable after creation; only the bulk privacy operations remove or
/// rewrite stored events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokingEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Number of cigarettes smoked, at least 1.
    pub cigarettes: u32,
    #[serde(default)]
    pub context: String,
    /// Always false for this event kind; kept for the export shape.
    #[serde(default)]
    pub resisted: bool,
}

impl SmokingEvent {
    pub fn new(cigarettes: u32, context: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            cigarettes,
            context: context.into(),
            resisted: false,
        }
    }
}

/// A logged instance of an urge to smoke, with its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CravingEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub intensity: CravingIntensity,
    #[serde(default)]
    pub context: String,
    pub resisted: bool,
    /// Present if and only if `resisted` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_duration_secs: Option<u32>,
}

impl CravingEvent {
    /// A craving flagged in the moment, not (yet) resisted.
    pub fn flagged(context: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            intensity: CravingIntensity::High,
            context: context.into(),
            resisted: false,
            resistance_duration_secs: None,
        }
    }

    /// A craving withstood for `duration_secs` during an intervention episode.
    pub fn resisted_for(duration_secs: u32, context: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            intensity: CravingIntensity::High,
            context: context.into(),
            resisted: true,
            resistance_duration_secs: Some(duration_secs),
        }
    }
}

/// Every state change in the system produces an Event.
/// Front ends render these; nothing in the core mutates observable state
/// without returning one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CravingLogged {
        id: Uuid,
        intensity: CravingIntensity,
        at: DateTime<Utc>,
    },
    SmokingLogged {
        id: Uuid,
        cigarettes: u32,
        at: DateTime<Utc>,
    },
    CravingResisted {
        id: Uuid,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    InterventionStarted {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    InterventionCompleted {
        total_secs: u32,
        at: DateTime<Utc>,
    },
    /// Terminal outcome of an intervention episode.
    /// `duration_secs` is present only for a resisted outcome.
    InterventionResolved {
        resisted: bool,
        duration_secs: Option<u32>,
        at: DateTime<Utc>,
    },
    /// Full timer state snapshot for presentation layers.
    TimerSnapshot {
        state: TimerState,
        remaining_secs: u32,
        total_secs: u32,
        guidance: String,
        at: DateTime<Utc>,
    },
}
