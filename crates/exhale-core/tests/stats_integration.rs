//! Integration tests for the statistics engine invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use exhale_core::stats::{lifetime_money_saved, today_stats, weekly_stats};
use exhale_core::{CravingEvent, SmokingEvent, UserConfig};
use proptest::prelude::*;

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
fn lifetime_money_saved_matches_hand_computation() {
    // 20/day, 10.0 each, quit three days ago, 10 actually smoked:
    // (20 * 3 - 10) * 10.0 = 500.0
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    let cfg = config(20, 10.0, now - Duration::days(3));
    let smoking = vec![
        smoking_at(now - Duration::days(2), 7),
        smoking_at(now - Duration::days(1), 3),
    ];
    let saved = lifetime_money_saved(&smoking, &cfg, now);
    assert!((saved - 500.0).abs() < 1e-6, "got {saved}");
}

#[test]
fn success_rate_is_zero_with_empty_window() {
    let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    // A craving outside the trailing week must not count.
    let craving = vec![craving_at(now - Duration::days(10), true)];
    let stats = weekly_stats(&[], &craving, &config(10, 5.0, now), now);
    assert_eq!(stats.success_rate, 0.0);
    assert_eq!(stats.resisted_count, 0);
}

proptest! {
    #[test]
    fn today_resisted_never_exceeds_cravings(flags in proptest::collection::vec(any::<bool>(), 0..60)) {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        let craving: Vec<CravingEvent> = flags
            .iter()
            .enumerate()
            .map(|(i, &resisted)| craving_at(now - Duration::minutes(i as i64), resisted))
            .collect();
        let cfg = config(10, 5.0, now);

        let today = today_stats(&[], &craving, &cfg, now);
        prop_assert!(today.resisted <= today.cravings);
        prop_assert_eq!(today.cigarettes, 0);
    }

    #[test]
    fn weekly_success_rate_stays_in_bounds(
        flags in proptest::collection::vec(any::<bool>(), 0..60),
        day_offsets in proptest::collection::vec(0i64..14, 0..60),
    ) {
        let now = Utc.with_ymd_and_hms(2025, 7, 14, 12, 0, 0).unwrap();
        let craving: Vec<CravingEvent> = flags
            .iter()
            .zip(day_offsets.iter().chain(std::iter::repeat(&0)))
            .map(|(&resisted, &days)| craving_at(now - Duration::days(days), resisted))
            .collect();
        let cfg = config(10, 5.0, now);

        let weekly = weekly_stats(&[], &craving, &cfg, now);
        prop_assert!(weekly.success_rate >= 0.0);
        prop_assert!(weekly.success_rate <= 100.0);
    }

    #[test]
    fn today_cigarette_spend_scales_with_price(count in 1u32..100, price in 0.01f64..50.0) {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        let smoking = vec![smoking_at(now, count)];
        let cfg = config(10, price, now);

        let today = today_stats(&smoking, &[], &cfg, now);
        prop_assert_eq!(today.cigarettes, count);
        prop_assert!((today.money_saved - f64::from(count) * price).abs() < 1e-9);
    }
}
