//! Notification scheduling seam.
//!
//! The core never talks to a platform notification center directly. It plans
//! against this trait and the front end supplies the binding; a denied
//! permission simply leaves every scheduling call unmade.

use rand::Rng;

use crate::error::CoreError;
use crate::stats::RiskWindow;
use crate::storage::NotificationPrefs;

pub type NotifyResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Every notification back end implements this trait.
pub trait Notifier: Send + Sync {
    /// Ask the platform for permission. A denial degrades scheduling and
    /// nothing else.
    fn request_authorization(&mut self) -> bool {
        true
    }

    /// Schedule the repeating daily logging reminder.
    fn schedule_daily_reminder(&mut self, _hour: u32, _minute: u32) -> NotifyResult {
        Ok(()) // default no-op
    }

    /// Schedule a one-shot encouragement at the given time of day.
    fn schedule_encouragement(&mut self, _message: &str, _hour: u32, _minute: u32) -> NotifyResult {
        Ok(()) // default no-op
    }

    /// Schedule a one-shot check-in at the start of a high-risk hour.
    fn schedule_high_risk_window(&mut self, _hour: u32, _context: &str) -> NotifyResult {
        Ok(()) // default no-op
    }

    /// Cancel everything previously scheduled.
    fn cancel_all(&mut self) -> NotifyResult {
        Ok(()) // default no-op
    }
}

/// No-op notifier for tests and headless use.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {}

/// Encouragement message pool.
pub const ENCOURAGEMENTS: [&str; 5] = [
    "You rode out an urge today - well done.",
    "Every cigarette you skip buys back a little health.",
    "Keeping at it is the whole game. You are doing fine.",
    "Think of how breathing clean air feels.",
    "Your health is worth every bit of this effort.",
];

/// Daytime slot range for encouragement notifications.
const ENCOURAGEMENT_HOURS: std::ops::RangeInclusive<u32> = 9..=20;

/// Schedule the daily reminder at the preferred time, if enabled.
pub fn plan_daily_reminder(
    notifier: &mut dyn Notifier,
    prefs: &NotificationPrefs,
) -> Result<(), CoreError> {
    if !prefs.daily_reminder_enabled {
        return Ok(());
    }
    notifier.schedule_daily_reminder(prefs.daily_reminder_hour, prefs.daily_reminder_minute)?;
    Ok(())
}

/// Forward already-thresholded risk windows to the notifier, if enabled.
pub fn plan_high_risk(
    notifier: &mut dyn Notifier,
    prefs: &NotificationPrefs,
    windows: &[RiskWindow],
) -> Result<(), CoreError> {
    if !prefs.high_risk_enabled {
        return Ok(());
    }
    for window in windows {
        notifier.schedule_high_risk_window(window.hour, window.time_of_day.label())?;
    }
    Ok(())
}

/// Queue 1-2 encouragements at random daytime slots, if enabled.
pub fn plan_encouragements<R: Rng>(
    notifier: &mut dyn Notifier,
    prefs: &NotificationPrefs,
    rng: &mut R,
) -> Result<(), CoreError> {
    if !prefs.encouragement_enabled {
        return Ok(());
    }
    let slots = rng.gen_range(1..=2);
    for _ in 0..slots {
        let message = ENCOURAGEMENTS[rng.gen_range(0..ENCOURAGEMENTS.len())];
        let hour = rng.gen_range(ENCOURAGEMENT_HOURS);
        let minute = rng.gen_range(0..60);
        notifier.schedule_encouragement(message, hour, minute)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::stats::TimeOfDay;

    use super::*;

    /// Records every call for assertions.
    #[derive(Default)]
    struct RecordingNotifier {
        daily: Vec<(u32, u32)>,
        encouragements: Vec<(String, u32, u32)>,
        high_risk: Vec<(u32, String)>,
    }

    impl Notifier for RecordingNotifier {
        fn schedule_daily_reminder(&mut self, hour: u32, minute: u32) -> NotifyResult {
            self.daily.push((hour, minute));
            Ok(())
        }
        fn schedule_encouragement(&mut self, message: &str, hour: u32, minute: u32) -> NotifyResult {
            self.encouragements.push((message.to_string(), hour, minute));
            Ok(())
        }
        fn schedule_high_risk_window(&mut self, hour: u32, context: &str) -> NotifyResult {
            self.high_risk.push((hour, context.to_string()));
            Ok(())
        }
    }

    fn window(hour: u32, count: usize) -> RiskWindow {
        RiskWindow {
            hour,
            craving_count: count,
            time_of_day: TimeOfDay::from_hour(hour),
        }
    }

    #[test]
    fn daily_reminder_uses_preferred_time() {
        let mut notifier = RecordingNotifier::default();
        plan_daily_reminder(&mut notifier, &NotificationPrefs::default()).unwrap();
        assert_eq!(notifier.daily, vec![(20, 0)]);
    }

    #[test]
    fn disabled_prefs_schedule_nothing() {
        let mut notifier = RecordingNotifier::default();
        let prefs = NotificationPrefs {
            daily_reminder_enabled: false,
            high_risk_enabled: false,
            encouragement_enabled: false,
            ..NotificationPrefs::default()
        };
        plan_daily_reminder(&mut notifier, &prefs).unwrap();
        plan_high_risk(&mut notifier, &prefs, &[window(20, 5)]).unwrap();
        plan_encouragements(&mut notifier, &prefs, &mut StdRng::seed_from_u64(7)).unwrap();
        assert!(notifier.daily.is_empty());
        assert!(notifier.high_risk.is_empty());
        assert!(notifier.encouragements.is_empty());
    }

    #[test]
    fn high_risk_windows_carry_context_labels() {
        let mut notifier = RecordingNotifier::default();
        let prefs = NotificationPrefs::default();
        plan_high_risk(&mut notifier, &prefs, &[window(20, 5), window(21, 4)]).unwrap();
        assert_eq!(
            notifier.high_risk,
            vec![(20, "evening".to_string()), (21, "evening".to_string())]
        );
    }

    #[test]
    fn encouragements_pick_one_or_two_daytime_slots() {
        let prefs = NotificationPrefs::default();
        for seed in 0..20 {
            let mut notifier = RecordingNotifier::default();
            let mut rng = StdRng::seed_from_u64(seed);
            plan_encouragements(&mut notifier, &prefs, &mut rng).unwrap();
            assert!((1..=2).contains(&notifier.encouragements.len()));
            for (message, hour, minute) in &notifier.encouragements {
                assert!(ENCOURAGEMENTS.contains(&message.as_str()));
                assert!((9..=20).contains(hour));
                assert!(*minute < 60);
            }
        }
    }
}
