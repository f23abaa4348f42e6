use clap::Subcommand;
use exhale_core::{NotificationPrefs, UserConfig};
use serde::Serialize;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration
    Show,
    /// Get a single value by key
    Get { key: String },
    /// Set a value by key
    Set { key: String, value: String },
}

#[derive(Serialize)]
struct FullConfig<'a> {
    user: &'a UserConfig,
    notifications: &'a NotificationPrefs,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut core = super::open_core()?;

    match action {
        ConfigAction::Show => {
            let full = FullConfig {
                user: core.config(),
                notifications: core.prefs(),
            };
            println!("{}", serde_json::to_string_pretty(&full)?);
        }
        ConfigAction::Get { key } => {
            let user = serde_json::to_value(core.config())?;
            let prefs = serde_json::to_value(core.prefs())?;
            match user.get(&key).or_else(|| prefs.get(&key)) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown configuration key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            core.set_value(&key, &value)?;
            let user = serde_json::to_value(core.config())?;
            let prefs = serde_json::to_value(core.prefs())?;
            if let Some(value) = user.get(&key).or_else(|| prefs.get(&key)) {
                println!("{value}");
            }
        }
    }
    Ok(())
}
