use chrono::Local;
use clap::Subcommand;
use exhale_core::RiskWindow;
use serde::Serialize;

#[derive(Subcommand)]
pub enum RiskAction {
    /// Top craving hours and which of them cross the scheduling threshold
    Windows,
}

#[derive(Serialize)]
struct RiskReport {
    windows: Vec<RiskWindow>,
    schedulable: Vec<RiskWindow>,
}

pub fn run(action: RiskAction) -> Result<(), Box<dyn std::error::Error>> {
    let core = super::open_core()?;

    match action {
        RiskAction::Windows => {
            let report = RiskReport {
                windows: core.risk_windows(&Local),
                schedulable: core.schedulable_windows(&Local),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
