use chrono::{Duration, Utc};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum DataAction {
    /// Export everything as one JSON document
    Export,
    /// Remove events older than N days
    Purge {
        #[arg(long, default_value = "365")]
        days: u32,
    },
    /// Strip dates from event timestamps, keeping only hour and minute
    Anonymize,
    /// Delete every stored record
    DeleteAll,
}

#[derive(Serialize)]
struct EventCounts {
    smoking_events: usize,
    craving_events: usize,
}

fn print_counts(core: &exhale_core::AppCore) -> Result<(), Box<dyn std::error::Error>> {
    let counts = EventCounts {
        smoking_events: core.log().load_smoking().len(),
        craving_events: core.log().load_craving().len(),
    };
    println!("{}", serde_json::to_string_pretty(&counts)?);
    Ok(())
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut core = super::open_core()?;

    match action {
        DataAction::Export => {
            let bundle = core.export_data();
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        DataAction::Purge { days } => {
            let cutoff = Utc::now() - Duration::days(i64::from(days));
            core.purge_events_before(cutoff)?;
            print_counts(&core)?;
        }
        DataAction::Anonymize => {
            core.anonymize_data()?;
            print_counts(&core)?;
        }
        DataAction::DeleteAll => {
            core.delete_all_data()?;
            println!("{{\"type\": \"all_data_deleted\"}}");
        }
    }
    Ok(())
}
