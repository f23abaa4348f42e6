//! Today, weekly, and lifetime summaries.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{CravingEvent, SmokingEvent};
use crate::storage::UserConfig;

/// Today's counters.
///
/// `money_saved` is today's spend at the configured price
/// (`cigarettes x cigarette_price`), not a saving against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TodayStats {
    pub cigarettes: u32,
    pub resisted: usize,
    pub cravings: usize,
    pub money_saved: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
}

/// Trailing seven-day summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub cigarettes_reduction: u32,
    pub resisted_count: usize,
    /// Percentage in [0, 100]; exactly 0 when no cravings fell in the window.
    pub success_rate: f64,
    pub money_saved: f64,
    pub trend: Trend,
}

/// Counters for the calendar day containing `now` in `now`'s time zone.
pub fn today_stats<Tz: TimeZone>(
    smoking: &[SmokingEvent],
    craving: &[CravingEvent],
    config: &UserConfig,
    now: DateTime<Tz>,
) -> TodayStats {
    let tz = now.timezone();
    let today = now.date_naive();

    let cigarettes: u32 = smoking
        .iter()
        .filter(|e| e.timestamp.with_timezone(&tz).date_naive() == today)
        .map(|e| e.cigarettes)
        .sum();

    let todays_cravings: Vec<&CravingEvent> = craving
        .iter()
        .filter(|e| e.timestamp.with_timezone(&tz).date_naive() == today)
        .collect();
    let resisted = todays_cravings.iter().filter(|e| e.resisted).count();

    TodayStats {
        cigarettes,
        resisted,
        cravings: todays_cravings.len(),
        money_saved: f64::from(cigarettes) * config.cigarette_price,
    }
}

/// Seconds since the quit start date. Negative for a start date in the
/// future; deliberately not validated.
pub fn quit_duration_secs(config: &UserConfig, now: DateTime<Utc>) -> i64 {
    (now - config.quit_start_date).num_seconds()
}

/// Projected spend avoided since the quit start date.
///
/// The projection is continuous: the baseline accrues fractionally through
/// the day rather than in whole-day buckets. Negative when actual
/// consumption exceeds the projection; never clamped.
pub fn lifetime_money_saved(
    smoking: &[SmokingEvent],
    config: &UserConfig,
    now: DateTime<Utc>,
) -> f64 {
    let quit_secs = quit_duration_secs(config, now) as f64;
    let expected = f64::from(config.cigarettes_per_day) * (quit_secs / 86_400.0);
    let actual: u32 = smoking.iter().map(|e| e.cigarettes).sum();
    (expected - f64::from(actual)) * config.cigarette_price
}

/// Summary over the trailing window `[now - 7 days, now]`.
pub fn weekly_stats(
    smoking: &[SmokingEvent],
    craving: &[CravingEvent],
    config: &UserConfig,
    now: DateTime<Utc>,
) -> WeeklyStats {
    let week_ago = now - Duration::days(7);
    let in_window = |ts: DateTime<Utc>| ts >= week_ago && ts <= now;

    let actual: u32 = smoking
        .iter()
        .filter(|e| in_window(e.timestamp))
        .map(|e| e.cigarettes)
        .sum();

    let cravings: Vec<&CravingEvent> = craving
        .iter()
        .filter(|e| in_window(e.timestamp))
        .collect();
    let resisted_count = cravings.iter().filter(|e| e.resisted).count();

    let expected = config.cigarettes_per_day * 7;
    let cigarettes_reduction = expected.saturating_sub(actual);

    let success_rate = if cravings.is_empty() {
        0.0
    } else {
        resisted_count as f64 / cravings.len() as f64 * 100.0
    };

    // Coarse binary threshold at half the baseline week, not a regression.
    let trend = if actual < expected / 2 {
        Trend::Improving
    } else {
        Trend::Worsening
    };

    WeeklyStats {
        cigarettes_reduction,
        resisted_count,
        success_rate,
        money_saved: f64::from(cigarettes_reduction) * config.cigarette_price,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn smoking_at(ts: DateTime<Utc>, cigarettes: u32) -> SmokingEvent {
        let mut event = SmokingEvent::new(cigarettes, "");
        event.timestamp = ts;
        event
    }

    fn craving_at(ts: DateTime<Utc>, resisted: bool) -> CravingEvent {
        let mut event = if resisted {
            CravingEvent::resisted_for(300, "")
        } else {
            CravingEvent::flagged("")
        };
        event.timestamp = ts;
        event
    }

    fn config(per_day: u32, price: f64, quit_start: DateTime<Utc>) -> UserConfig {
        UserConfig {
            cigarettes_per_day: per_day,
            cigarette_price: price,
            quit_start_date: quit_start,
        }
    }

    #[test]
    fn today_counts_only_same_calendar_day() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2025, 5, 19, 23, 59, 0).unwrap();
        let smoking = vec![smoking_at(now, 3), smoking_at(yesterday, 5)];
        let craving = vec![
            craving_at(now, true),
            craving_at(now, false),
            craving_at(yesterday, false),
        ];
        let stats = today_stats(&smoking, &craving, &config(10, 2.0, now), now);
        assert_eq!(stats.cigarettes, 3);
        assert_eq!(stats.cravings, 2);
        assert_eq!(stats.resisted, 1);
        assert_eq!(stats.money_saved, 6.0);
        assert!(stats.resisted <= stats.cravings);
    }

    #[test]
    fn quit_duration_is_signed() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let future = config(10, 5.0, now + Duration::days(1));
        assert_eq!(quit_duration_secs(&future, now), -86_400);
    }

    #[test]
    fn lifetime_money_saved_worked_example() {
        // 20/day baseline, 10.0 per cigarette, quit 3 days ago, 10 smoked:
        // (20 * 3 - 10) * 10 = 500.
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let cfg = config(20, 10.0, now - Duration::days(3));
        let smoking = vec![
            smoking_at(now - Duration::days(2), 6),
            smoking_at(now - Duration::days(1), 4),
        ];
        let saved = lifetime_money_saved(&smoking, &cfg, now);
        assert!((saved - 500.0).abs() < 1e-6, "got {saved}");
    }

    #[test]
    fn lifetime_money_saved_can_go_negative() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let cfg = config(1, 5.0, now - Duration::days(1));
        let smoking = vec![smoking_at(now - Duration::hours(2), 10)];
        assert!(lifetime_money_saved(&smoking, &cfg, now) < 0.0);
    }

    #[test]
    fn weekly_success_rate_zero_without_cravings() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let stats = weekly_stats(&[], &[], &config(10, 5.0, now), now);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.cigarettes_reduction, 70);
        assert_eq!(stats.money_saved, 350.0);
    }

    #[test]
    fn weekly_window_excludes_older_events() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let smoking = vec![
            smoking_at(now - Duration::days(2), 30),
            smoking_at(now - Duration::days(8), 100),
        ];
        let craving = vec![
            craving_at(now - Duration::days(1), true),
            craving_at(now - Duration::days(3), false),
            craving_at(now - Duration::days(9), false),
        ];
        let stats = weekly_stats(&smoking, &craving, &config(10, 5.0, now), now);
        assert_eq!(stats.cigarettes_reduction, 40);
        assert_eq!(stats.resisted_count, 1);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(stats.trend, Trend::Improving);
    }

    #[test]
    fn weekly_trend_flips_at_half_baseline() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let cfg = config(10, 5.0, now);
        // Half of the 70-cigarette baseline week is 35.
        let at_half = vec![smoking_at(now - Duration::days(1), 35)];
        assert_eq!(weekly_stats(&at_half, &[], &cfg, now).trend, Trend::Worsening);
        let below_half = vec![smoking_at(now - Duration::days(1), 34)];
        assert_eq!(weekly_stats(&below_half, &[], &cfg, now).trend, Trend::Improving);
    }

    #[test]
    fn weekly_reduction_clamps_at_zero() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap();
        let smoking = vec![smoking_at(now - Duration::days(1), 200)];
        let stats = weekly_stats(&smoking, &[], &config(10, 5.0, now), now);
        assert_eq!(stats.cigarettes_reduction, 0);
        assert_eq!(stats.money_saved, 0.0);
    }
}
