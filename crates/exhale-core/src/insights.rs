//! Insight cards derived from the event log.
//!
//! Generation is async and sleeps briefly to mimic the latency of the
//! service this fronts; the cards themselves are computed locally from the
//! log, so the result is deterministic given the inputs.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{CravingEvent, SmokingEvent};
use crate::stats::{self, RiskWindowAnalyzer};
use crate::storage::UserConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Pattern,
    Strategy,
    Progress,
}

/// One insight card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub confidence: Confidence,
    pub category: InsightCategory,
    pub action_tip: String,
    pub data_points: Vec<String>,
}

/// Simulated service latency.
const GENERATION_DELAY: Duration = Duration::from_secs(1);

/// Derive insight cards from the event log.
///
/// `tz` controls hour-of-day bucketing for the pattern card; `now` anchors
/// the weekly and lifetime projections.
pub async fn generate_insights<Tz: TimeZone>(
    smoking: &[SmokingEvent],
    craving: &[CravingEvent],
    config: &UserConfig,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<Insight> {
    tokio::time::sleep(GENERATION_DELAY).await;

    let mut insights = Vec::new();

    let analyzer = RiskWindowAnalyzer::new();
    if let Some(top) = analyzer.analyze(craving, tz).first() {
        insights.push(Insight {
            title: "Peak craving hour".to_string(),
            description: format!(
                "Your cravings cluster around {}:00 ({}).",
                top.hour,
                top.time_of_day.label()
            ),
            confidence: if top.craving_count >= analyzer.schedule_threshold {
                Confidence::High
            } else {
                Confidence::Low
            },
            category: InsightCategory::Pattern,
            action_tip: "Plan something else for that hour - a walk, water, a short break."
                .to_string(),
            data_points: vec![format!(
                "{} cravings recorded at {}:00",
                top.craving_count, top.hour
            )],
        });
    }

    let weekly = stats::weekly_stats(smoking, craving, config, now);
    if weekly.resisted_count > 0 || weekly.success_rate > 0.0 {
        insights.push(Insight {
            title: "Resistance rate this week".to_string(),
            description: format!(
                "You resisted {:.0}% of this week's cravings.",
                weekly.success_rate
            ),
            confidence: Confidence::Medium,
            category: InsightCategory::Strategy,
            action_tip: "When an urge hits, tell yourself: wait five minutes first.".to_string(),
            data_points: vec![format!("{} cravings resisted", weekly.resisted_count)],
        });
    }

    let saved = stats::lifetime_money_saved(smoking, config, now);
    insights.push(Insight {
        title: "Money projection".to_string(),
        description: if saved >= 0.0 {
            format!(
                "Against a {}-a-day baseline you are ahead by {:.2}.",
                config.cigarettes_per_day, saved
            )
        } else {
            format!(
                "Against a {}-a-day baseline you are behind by {:.2}.",
                config.cigarettes_per_day, -saved
            )
        },
        confidence: Confidence::Medium,
        category: InsightCategory::Progress,
        action_tip: "Put the saved amount somewhere you can see it grow.".to_string(),
        data_points: vec![format!("weekly reduction: {} cigarettes", weekly.cigarettes_reduction)],
    });

    insights
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, TimeZone};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn insights_reflect_the_log() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let config = UserConfig {
            cigarettes_per_day: 10,
            cigarette_price: 5.0,
            quit_start_date: now - ChronoDuration::days(3),
        };
        let craving: Vec<CravingEvent> = (0..4)
            .map(|i| {
                let mut e = CravingEvent::resisted_for(300, "");
                e.timestamp = now - ChronoDuration::hours(i);
                e
            })
            .collect();

        let insights = generate_insights(&[], &craving, &config, now, &Utc).await;
        assert!(insights.len() >= 2);
        assert!(insights
            .iter()
            .any(|i| i.category == InsightCategory::Pattern));
        assert!(insights
            .iter()
            .any(|i| i.category == InsightCategory::Progress));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_log_still_projects_money() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let config = UserConfig {
            cigarettes_per_day: 10,
            cigarette_price: 5.0,
            quit_start_date: now,
        };
        let insights = generate_insights(&[], &[], &config, now, &Utc).await;
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::Progress);
    }
}
