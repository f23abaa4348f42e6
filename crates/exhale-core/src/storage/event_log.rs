//! Persistent event log over the key-value store.
//!
//! Collections are rewritten whole on every append. Decode failures never
//! escape as errors: a corrupt or missing record degrades to an empty
//! collection (or the default settings), logged once here and nowhere else.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CoreError;
use crate::events::{CravingEvent, SmokingEvent};

use super::settings::{
    default_cigarette_price, default_cigarettes_per_day, NotificationPrefs, UserConfig,
};
use super::store::Store;

/// Keys in the kv table.
pub(crate) mod keys {
    pub const SMOKING_EVENTS: &str = "smoking_events";
    pub const CRAVING_EVENTS: &str = "craving_events";
    pub const USER_SETTINGS: &str = "user_settings";
    pub const QUIT_START_DATE: &str = "quit_start_date";
    pub const CIGARETTES_PER_DAY: &str = "cigarettes_per_day";
    pub const CIGARETTE_PRICE: &str = "cigarette_price";
    pub const NOTIFICATION_SETTINGS: &str = "notification_settings";
    pub const LAST_APP_LAUNCH: &str = "last_app_launch";

    pub const ALL: [&str; 8] = [
        SMOKING_EVENTS,
        CRAVING_EVENTS,
        USER_SETTINGS,
        QUIT_START_DATE,
        CIGARETTES_PER_DAY,
        CIGARETTE_PRICE,
        NOTIFICATION_SETTINGS,
        LAST_APP_LAUNCH,
    ];
}

/// Retention horizon for the default cleanup sweep.
const RETENTION_DAYS: i64 = 365;

/// Aggregate record for user-initiated export. There is no import path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub smoking_events: Vec<SmokingEvent>,
    pub craving_events: Vec<CravingEvent>,
    pub user_settings: UserConfig,
    pub notification_settings: NotificationPrefs,
    pub export_date: DateTime<Utc>,
}

/// Event collections and settings, persisted through a [`Store`].
pub struct EventLog {
    store: Store,
}

impl EventLog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ── Event collections ────────────────────────────────────────────

    pub fn load_smoking(&self) -> Vec<SmokingEvent> {
        self.load_vec(keys::SMOKING_EVENTS)
    }

    pub fn load_craving(&self) -> Vec<CravingEvent> {
        self.load_vec(keys::CRAVING_EVENTS)
    }

    /// Append one event and rewrite the stored collection.
    pub fn append_smoking(&self, event: SmokingEvent) -> Result<(), CoreError> {
        let mut events = self.load_smoking();
        events.push(event);
        self.save_smoking(&events)
    }

    /// Append one event and rewrite the stored collection.
    pub fn append_craving(&self, event: CravingEvent) -> Result<(), CoreError> {
        let mut events = self.load_craving();
        events.push(event);
        self.save_craving(&events)
    }

    pub fn save_smoking(&self, events: &[SmokingEvent]) -> Result<(), CoreError> {
        self.save_vec(keys::SMOKING_EVENTS, events)
    }

    pub fn save_craving(&self, events: &[CravingEvent]) -> Result<(), CoreError> {
        self.save_vec(keys::CRAVING_EVENTS, events)
    }

    /// Remove all events strictly older than `cutoff` from both collections.
    pub fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<(), CoreError> {
        let smoking: Vec<SmokingEvent> = self
            .load_smoking()
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect();
        self.save_smoking(&smoking)?;

        let craving: Vec<CravingEvent> = self
            .load_craving()
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect();
        self.save_craving(&craving)
    }

    /// Retention sweep with the default one-year horizon.
    pub fn cleanup_old_data(&self, now: DateTime<Utc>) -> Result<(), CoreError> {
        self.purge_older_than(now - Duration::days(RETENTION_DAYS))
    }

    /// Strip the date component from every event timestamp, keeping only
    /// hour and minute (collapsed onto the epoch date, seconds zeroed).
    /// One-way and idempotent; all other fields are preserved.
    pub fn anonymize(&self) -> Result<(), CoreError> {
        let smoking: Vec<SmokingEvent> = self
            .load_smoking()
            .into_iter()
            .map(|mut e| {
                e.timestamp = strip_date(e.timestamp);
                e
            })
            .collect();
        self.save_smoking(&smoking)?;

        let craving: Vec<CravingEvent> = self
            .load_craving()
            .into_iter()
            .map(|mut e| {
                e.timestamp = strip_date(e.timestamp);
                e
            })
            .collect();
        self.save_craving(&craving)
    }

    /// Remove every stored record: events, settings, launch tracking.
    pub fn delete_all(&self) -> Result<(), CoreError> {
        for key in keys::ALL {
            self.store.delete(key)?;
        }
        Ok(())
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Load the user configuration from its scalar keys.
    ///
    /// Zero or negative stored values fall back to the defaults here, at
    /// load time only; nothing re-validates on mutation.
    pub fn load_config(&self) -> UserConfig {
        let cigarettes_per_day = self
            .scalar(keys::CIGARETTES_PER_DAY)
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|&n| n > 0)
            .map_or_else(default_cigarettes_per_day, |n| n as u32);

        let cigarette_price = self
            .scalar(keys::CIGARETTE_PRICE)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|&p| p > 0.0)
            .unwrap_or_else(default_cigarette_price);

        let quit_start_date = self
            .scalar(keys::QUIT_START_DATE)
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            .unwrap_or_else(Utc::now);

        UserConfig {
            cigarettes_per_day,
            cigarette_price,
            quit_start_date,
        }
    }

    /// Persist the configuration: the whole record plus each scalar key.
    pub fn save_config(&self, config: &UserConfig) -> Result<(), CoreError> {
        let json = serde_json::to_string(config)?;
        self.store.set(keys::USER_SETTINGS, &json)?;
        self.store
            .set(keys::CIGARETTES_PER_DAY, &config.cigarettes_per_day.to_string())?;
        self.store
            .set(keys::CIGARETTE_PRICE, &config.cigarette_price.to_string())?;
        self.store
            .set(keys::QUIT_START_DATE, &config.quit_start_date.to_rfc3339())?;
        Ok(())
    }

    pub fn load_prefs(&self) -> NotificationPrefs {
        match self.scalar(keys::NOTIFICATION_SETTINGS) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(key = keys::NOTIFICATION_SETTINGS, error = %e,
                        "corrupt notification settings, using defaults");
                    NotificationPrefs::default()
                }
            },
            None => NotificationPrefs::default(),
        }
    }

    pub fn save_prefs(&self, prefs: &NotificationPrefs) -> Result<(), CoreError> {
        let json = serde_json::to_string(prefs)?;
        self.store.set(keys::NOTIFICATION_SETTINGS, &json)?;
        Ok(())
    }

    // ── App usage tracking ───────────────────────────────────────────

    pub fn record_app_launch(&self) -> Result<(), CoreError> {
        self.store
            .set(keys::LAST_APP_LAUNCH, &Utc::now().to_rfc3339())?;
        Ok(())
    }

    pub fn last_app_launch(&self) -> Option<DateTime<Utc>> {
        self.scalar(keys::LAST_APP_LAUNCH)
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
    }

    pub fn days_since_last_launch(&self, now: DateTime<Utc>) -> i64 {
        self.last_app_launch()
            .map_or(0, |last| (now - last).num_days())
    }

    // ── Export ───────────────────────────────────────────────────────

    /// Assemble the export record. Infallible: load failures have already
    /// degraded to empty collections or defaults.
    pub fn export_all(&self) -> ExportBundle {
        ExportBundle {
            smoking_events: self.load_smoking(),
            craving_events: self.load_craving(),
            user_settings: self.load_config(),
            notification_settings: self.load_prefs(),
            export_date: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn scalar(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value, treating as missing");
                None
            }
        }
    }

    fn load_vec<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.store.get(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(events) => events,
                Err(e) => {
                    warn!(key, error = %e, "corrupt event collection, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read event collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn save_vec<T: Serialize>(&self, key: &str, events: &[T]) -> Result<(), CoreError> {
        let json = serde_json::to_string(events)?;
        self.store.set(key, &json)?;
        Ok(())
    }
}

/// Collapse a timestamp onto the epoch date, keeping hour and minute.
fn strip_date(ts: DateTime<Utc>) -> DateTime<Utc> {
    let secs = i64::from(ts.hour()) * 3600 + i64::from(ts.minute()) * 60;
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
