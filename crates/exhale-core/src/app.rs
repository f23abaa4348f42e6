//! Application coordinator.
//!
//! Services are constructed once at process start and passed in explicitly;
//! there are no global singletons. The coordinator keeps the event
//! collections in memory, persists through the event log, and returns an
//! explicit [`Event`] from every state change instead of mutating observable
//! shared state.
//!
//! Everything here runs on the caller's single execution context. The only
//! asynchronous seams are notification authorization (awaited once at
//! startup, behind the [`Notifier`] trait) and insight generation.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::events::{CravingEvent, Event, SmokingEvent};
use crate::insights::{self, Insight};
use crate::notify::{plan_daily_reminder, plan_encouragements, plan_high_risk, Notifier};
use crate::stats::{self, RiskWindow, RiskWindowAnalyzer, TodayStats, WeeklyStats};
use crate::storage::{EventLog, ExportBundle, NotificationPrefs, UserConfig};
use crate::timer::{InterventionTimer, TimerState};

/// Where the user stands right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    Stable,
    HighRisk,
    Intervention,
    Resisted,
    Smoked,
}

/// The application core: event log, settings, and the notification seam.
pub struct AppCore {
    log: EventLog,
    notifier: Box<dyn Notifier>,
    analyzer: RiskWindowAnalyzer,
    config: UserConfig,
    prefs: NotificationPrefs,
    smoking_events: Vec<SmokingEvent>,
    craving_events: Vec<CravingEvent>,
    status: SmokingStatus,
    last_smoke_time: Option<DateTime<Utc>>,
    notifications_authorized: bool,
}

impl AppCore {
    /// Build the core from its injected services, loading persisted state.
    pub fn new(log: EventLog, notifier: Box<dyn Notifier>) -> Self {
        let config = log.load_config();
        let prefs = log.load_prefs();
        let smoking_events = log.load_smoking();
        let craving_events = log.load_craving();
        let last_smoke_time = smoking_events.iter().map(|e| e.timestamp).max();
        Self {
            log,
            notifier,
            analyzer: RiskWindowAnalyzer::new(),
            config,
            prefs,
            smoking_events,
            craving_events,
            status: SmokingStatus::Stable,
            last_smoke_time,
            notifications_authorized: false,
        }
    }

    /// Startup sequence: record the launch, ask for notification permission,
    /// then schedule the daily reminder, high-risk check-ins, and 1-2
    /// encouragements. A denied permission skips scheduling entirely.
    pub fn initialize(&mut self) -> Result<(), CoreError> {
        self.log.record_app_launch()?;
        self.notifications_authorized = self.notifier.request_authorization();
        if !self.notifications_authorized {
            return Ok(());
        }
        plan_daily_reminder(self.notifier.as_mut(), &self.prefs)?;
        let windows = self.analyzer.schedulable(&self.craving_events, &Local);
        plan_high_risk(self.notifier.as_mut(), &self.prefs, &windows)?;
        plan_encouragements(self.notifier.as_mut(), &self.prefs, &mut rand::thread_rng())?;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    pub fn prefs(&self) -> &NotificationPrefs {
        &self.prefs
    }

    pub fn status(&self) -> SmokingStatus {
        self.status
    }

    pub fn last_smoke_time(&self) -> Option<DateTime<Utc>> {
        self.last_smoke_time
    }

    pub fn notifications_authorized(&self) -> bool {
        self.notifications_authorized
    }

    pub fn today_stats<Tz: TimeZone>(&self, now: DateTime<Tz>) -> TodayStats {
        stats::today_stats(&self.smoking_events, &self.craving_events, &self.config, now)
    }

    pub fn weekly_stats(&self, now: DateTime<Utc>) -> WeeklyStats {
        stats::weekly_stats(&self.smoking_events, &self.craving_events, &self.config, now)
    }

    pub fn lifetime_money_saved(&self, now: DateTime<Utc>) -> f64 {
        stats::lifetime_money_saved(&self.smoking_events, &self.config, now)
    }

    pub fn quit_duration_secs(&self, now: DateTime<Utc>) -> i64 {
        stats::quit_duration_secs(&self.config, now)
    }

    pub fn risk_windows<Tz: TimeZone>(&self, tz: &Tz) -> Vec<RiskWindow> {
        self.analyzer.analyze(&self.craving_events, tz)
    }

    pub fn schedulable_windows<Tz: TimeZone>(&self, tz: &Tz) -> Vec<RiskWindow> {
        self.analyzer.schedulable(&self.craving_events, tz)
    }

    pub async fn insights<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Vec<Insight> {
        insights::generate_insights(
            &self.smoking_events,
            &self.craving_events,
            &self.config,
            now,
            tz,
        )
        .await
    }

    // ── User actions ─────────────────────────────────────────────────

    /// Log an immediate craving (not resisted, high intensity).
    pub fn handle_craving(&mut self, context: &str) -> Result<Event, CoreError> {
        let event = CravingEvent::flagged(context);
        let out = Event::CravingLogged {
            id: event.id,
            intensity: event.intensity,
            at: event.timestamp,
        };
        self.craving_events.push(event);
        self.log.save_craving(&self.craving_events)?;
        self.status = SmokingStatus::HighRisk;
        Ok(out)
    }

    /// Log a smoking occurrence of at least one cigarette.
    pub fn record_smoking(&mut self, cigarettes: u32, context: &str) -> Result<Event, CoreError> {
        if cigarettes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "cigarettes".to_string(),
                message: "count must be at least 1".to_string(),
            }
            .into());
        }
        let event = SmokingEvent::new(cigarettes, context);
        let out = Event::SmokingLogged {
            id: event.id,
            cigarettes: event.cigarettes,
            at: event.timestamp,
        };
        self.last_smoke_time = Some(event.timestamp);
        self.smoking_events.push(event);
        self.log.save_smoking(&self.smoking_events)?;
        self.status = SmokingStatus::Smoked;
        Ok(out)
    }

    /// Log a craving withstood for `duration_secs`.
    pub fn record_resisted(&mut self, duration_secs: u32) -> Result<Event, CoreError> {
        let event = CravingEvent::resisted_for(duration_secs, "intervention");
        let out = Event::CravingResisted {
            id: event.id,
            duration_secs,
            at: event.timestamp,
        };
        self.craving_events.push(event);
        self.log.save_craving(&self.craving_events)?;
        self.status = SmokingStatus::Resisted;
        Ok(out)
    }

    /// Begin a guided intervention episode.
    pub fn begin_intervention(&mut self, total_secs: u32) -> (InterventionTimer, Event) {
        self.status = SmokingStatus::Intervention;
        let timer = InterventionTimer::new(total_secs);
        let event = Event::InterventionStarted {
            total_secs,
            at: Utc::now(),
        };
        (timer, event)
    }

    /// Record the outcome of a finished episode against the log.
    ///
    /// A `Resisted` outcome appends exactly one craving event; `GaveIn`
    /// records nothing. Unresolved episodes are left alone.
    pub fn resolve_intervention(
        &mut self,
        timer: &InterventionTimer,
    ) -> Result<Option<Event>, CoreError> {
        match timer.state() {
            TimerState::Resisted { duration_secs } => {
                Ok(Some(self.record_resisted(duration_secs)?))
            }
            TimerState::GaveIn => {
                self.status = SmokingStatus::HighRisk;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Set a configuration or notification-preference value by key.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match self.config.apply(key, value) {
            Ok(()) => {
                self.log.save_config(&self.config)?;
                Ok(())
            }
            Err(crate::error::ConfigError::UnknownKey(_)) => {
                self.prefs.apply(key, value)?;
                self.log.save_prefs(&self.prefs)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Privacy operations ───────────────────────────────────────────

    pub fn export_data(&self) -> ExportBundle {
        self.log.export_all()
    }

    /// Delete every stored record, reset in-memory state, and cancel all
    /// scheduled notifications.
    pub fn delete_all_data(&mut self) -> Result<(), CoreError> {
        self.log.delete_all()?;
        self.smoking_events.clear();
        self.craving_events.clear();
        self.config = UserConfig::default();
        self.prefs = NotificationPrefs::default();
        self.last_smoke_time = None;
        self.status = SmokingStatus::Stable;
        self.notifier.cancel_all()?;
        Ok(())
    }

    /// Strip dates from stored event timestamps, then reload.
    pub fn anonymize_data(&mut self) -> Result<(), CoreError> {
        self.log.anonymize()?;
        self.reload_events();
        Ok(())
    }

    /// Drop events older than the retention horizon, then reload.
    pub fn cleanup_old_data(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        self.log.cleanup_old_data(now)?;
        self.reload_events();
        Ok(())
    }

    /// Drop events before an explicit cutoff, then reload.
    pub fn purge_events_before(&mut self, cutoff: DateTime<Utc>) -> Result<(), CoreError> {
        self.log.purge_older_than(cutoff)?;
        self.reload_events();
        Ok(())
    }

    fn reload_events(&mut self) {
        self.smoking_events = self.log.load_smoking();
        self.craving_events = self.log.load_craving();
        self.last_smoke_time = self.smoking_events.iter().map(|e| e.timestamp).max();
    }
}
