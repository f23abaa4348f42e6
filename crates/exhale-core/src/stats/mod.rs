//! Derived statistics.
//!
//! Everything here is a pure function of the event collections, the user
//! configuration, and an instant supplied by the caller. Nothing is cached:
//! recomputation is cheap and every read reflects the log as it is.

mod risk_windows;
mod summary;

pub use risk_windows::{RiskWindow, RiskWindowAnalyzer, TimeOfDay};
pub use summary::{
    lifetime_money_saved, quit_duration_secs, today_stats, weekly_stats, TodayStats, Trend,
    WeeklyStats,
};
