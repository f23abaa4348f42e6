use chrono::{Local, Utc};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's counters
    Today,
    /// Trailing seven-day summary
    Weekly,
    /// Lifetime projection since the quit start date
    Lifetime,
}

#[derive(Serialize)]
struct LifetimeStats {
    money_saved: f64,
    quit_duration_secs: i64,
    days_since_last_launch: i64,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let core = super::open_core()?;

    match action {
        StatsAction::Today => {
            let stats = core.today_stats(Local::now());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Weekly => {
            let stats = core.weekly_stats(Utc::now());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Lifetime => {
            let now = Utc::now();
            let stats = LifetimeStats {
                money_saved: core.lifetime_money_saved(now),
                quit_duration_secs: core.quit_duration_secs(now),
                days_since_last_launch: core.log().days_since_last_launch(now),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
