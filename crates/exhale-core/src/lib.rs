//! # Exhale Core Library
//!
//! This library provides the core logic for Exhale, a smoking-cessation
//! tracker: an append-mostly event log, derived statistics, a guided
//! craving-intervention countdown, and high-risk window analysis feeding a
//! notification seam. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any richer
//! front end being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Event log**: smoking and craving events as whole-collection JSON
//!   blobs in a SQLite key-value store; decode failures degrade to empty
//!   collections rather than errors
//! - **Statistics**: pure functions recomputed on every read - no caching
//! - **Intervention timer**: a caller-driven countdown state machine; the
//!   caller invokes `tick()` once per elapsed second
//! - **Risk windows**: hour-of-day craving histogram feeding notification
//!   scheduling through the [`Notifier`] trait
//!
//! ## Key Components
//!
//! - [`AppCore`]: dependency-injected coordinator over all of the above
//! - [`EventLog`]: event and settings persistence
//! - [`InterventionTimer`]: countdown state machine
//! - [`RiskWindowAnalyzer`]: high-risk hour detection

pub mod app;
pub mod error;
pub mod events;
pub mod insights;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod timer;

pub use app::{AppCore, SmokingStatus};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::{CravingEvent, CravingIntensity, Event, SmokingEvent};
pub use insights::{generate_insights, Confidence, Insight, InsightCategory};
pub use notify::{Notifier, NullNotifier};
pub use stats::{RiskWindow, RiskWindowAnalyzer, TimeOfDay, TodayStats, Trend, WeeklyStats};
pub use storage::{data_dir, EventLog, ExportBundle, NotificationPrefs, Store, UserConfig};
pub use timer::{InterventionTimer, TimerState, DEFAULT_INTERVENTION_SECS};
